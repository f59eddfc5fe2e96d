//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Credential storage and login configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// File holding the stored token and user between CLI invocations.
    #[serde(default = "default_credential_file")]
    pub credential_file: String,
    /// Role requested at login and required on the returned user.
    #[serde(default = "default_required_role")]
    pub required_role: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            credential_file: default_credential_file(),
            required_role: default_required_role(),
        }
    }
}

fn default_credential_file() -> String {
    "data/credential.json".to_string()
}

fn default_required_role() -> String {
    "admin".to_string()
}
