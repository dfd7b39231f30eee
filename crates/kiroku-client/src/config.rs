//! Store client configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the HTTP post store.
///
/// Deserializable from the embedding application's config file; every
/// field has a default so partial configs parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Base URL of the post server, without a trailing path.
    pub base_url: String,
    /// The shared credential, sent as a bearer token when set.
    pub credential: Option<String>,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            credential: None,
            timeout_ms: 10_000,
        }
    }
}
