//! # schooladmin-client
//!
//! Everything that talks to the SchoolAdmin backend: the reqwest-backed
//! [`HttpTransport`], the credential-attaching [`ApiClient`], response
//! envelope normalization, credential stores, the GraphQL login gate,
//! and dashboard statistics.

pub mod api;
pub mod auth;
pub mod credential;
pub mod dashboard;
pub mod envelope;
pub mod http;

pub use api::ApiClient;
pub use auth::{AuthGate, LoginInput};
pub use credential::{FileCredentialStore, MemoryCredentialStore};
pub use dashboard::{DashboardService, DashboardStats};
pub use envelope::{ExtractStrategy, ItemExtractor, PageMeta};
pub use http::HttpTransport;
