//! Credential stores implementing [`CredentialProvider`].
//!
//! [`CredentialProvider`]: schooladmin_core::traits::CredentialProvider

pub mod file;
pub mod memory;

pub use file::FileCredentialStore;
pub use memory::MemoryCredentialStore;
