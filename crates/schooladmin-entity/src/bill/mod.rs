//! Billing domain entities.

pub mod model;
pub mod status;

pub use model::Bill;
pub use status::BillStatus;
