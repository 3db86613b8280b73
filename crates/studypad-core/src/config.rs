//! Client configuration.

use serde::{Deserialize, Serialize};

/// Default API base path. The remote service runs on a free tier that may
/// cold-start after idling, so callers show a pending indicator instead of
/// imposing timeouts.
pub const DEFAULT_BASE_URL: &str = "https://drex-notes-api.onrender.com/api/";

/// Configuration for the API client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base path of the remote REST API, trailing slash included.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}
