//! Console user entities.

pub mod model;

pub use model::AdminUser;
