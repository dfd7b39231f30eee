//! Markdown → HTML rendering for text block previews.
//!
//! Uses pulldown-cmark (the same parser as rustdoc). The editor core only
//! needs the one pure function; styling and sanitization are the embedding
//! application's concern.

use pulldown_cmark::{Options, Parser, html};

/// Render markdown source to an HTML fragment.
pub fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}
