//! Process-local credential store.

use std::sync::RwLock;

use schooladmin_core::result::AppResult;
use schooladmin_core::traits::credential::{Credential, CredentialProvider};

/// Keeps the credential in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: RwLock<Option<Credential>>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            inner: RwLock::new(Some(Credential::token_only(token))),
        }
    }
}

impl CredentialProvider for MemoryCredentialStore {
    fn get(&self) -> Option<String> {
        self.credential().map(|c| c.token)
    }

    fn credential(&self) -> Option<Credential> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set(&self, credential: Credential) -> AppResult<()> {
        *self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(credential);
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        *self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        Ok(())
    }
}
