//! Core traits defined in `schooladmin-core` and implemented by other crates.

pub mod confirm;
pub mod credential;
pub mod resource;
pub mod transport;

pub use confirm::{ConfirmGate, FixedAnswer};
pub use credential::{Credential, CredentialProvider};
pub use resource::Resource;
pub use transport::{ApiRequest, ApiResponse, HttpMethod, Transport};
