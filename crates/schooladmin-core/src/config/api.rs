//! Backend endpoint configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Remote API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST admin collections.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// URL of the GraphQL endpoint used for login.
    #[serde(default = "default_graphql_url")]
    pub graphql_url: String,
    /// Per-request timeout in seconds enforced by the transport.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl ApiConfig {
    /// Request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            graphql_url: default_graphql_url(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.meccaschool.online/api/admin".to_string()
}

fn default_graphql_url() -> String {
    "https://api.meccaschool.online/graphql".to_string()
}

fn default_request_timeout() -> u64 {
    30
}
