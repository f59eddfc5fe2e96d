//! Core type definitions used across the SchoolAdmin workspace.

pub mod form;
pub mod pagination;
pub mod response;

pub use form::{FieldValue, FormFields};
pub use pagination::{PageRequest, clamp_page, page_slice, total_pages_for};
pub use response::ApiErrorBody;
