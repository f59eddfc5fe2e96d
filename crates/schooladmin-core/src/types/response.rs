//! Response body types shared with the backend.

use serde::{Deserialize, Serialize};

/// Error body the backend returns on rejected requests.
///
/// Only `message` is relied upon; it is shown to the user verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Pull the `message` field out of an arbitrary JSON body.
    pub fn message_from(body: &serde_json::Value) -> Option<String> {
        serde_json::from_value::<ApiErrorBody>(body.clone())
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
    }
}
