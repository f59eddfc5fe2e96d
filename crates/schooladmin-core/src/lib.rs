//! # schooladmin-core
//!
//! Core crate for the SchoolAdmin console. Contains the seam traits the
//! list controller depends on, configuration schemas, pagination and form
//! types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other SchoolAdmin crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
