//! Credential provider trait for the stored login token.

use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// A stored login: bearer token plus the user it was issued to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Bearer token attached to every API request.
    pub token: String,
    /// Login name of the signed-in user.
    #[serde(default)]
    pub username: Option<String>,
    /// Display name of the signed-in user.
    #[serde(default)]
    pub name: Option<String>,
    /// Role reported by the backend at login.
    #[serde(default)]
    pub role: Option<String>,
}

impl Credential {
    /// Create a credential holding only a token.
    pub fn token_only(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: None,
            name: None,
            role: None,
        }
    }
}

/// Process-wide credential source.
///
/// Controllers only ever call [`CredentialProvider::get`]; `set` and
/// `clear` belong to the login flow.
pub trait CredentialProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Current bearer token, or `None` when nobody is signed in.
    fn get(&self) -> Option<String>;

    /// Full stored credential, if any.
    fn credential(&self) -> Option<Credential>;

    /// Store a credential, replacing any previous one.
    fn set(&self, credential: Credential) -> AppResult<()>;

    /// Forget the stored credential.
    fn clear(&self) -> AppResult<()>;
}
