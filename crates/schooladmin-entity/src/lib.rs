//! # schooladmin-entity
//!
//! Domain entity models for the SchoolAdmin console. Every struct in this
//! crate mirrors a record returned by the admin API. Collection entities
//! implement [`schooladmin_core::traits::Resource`] so a list controller
//! can manage them; joined relations are read-only [`NamedRef`]s.

pub mod academic;
pub mod bill;
pub mod common;
pub mod fee;
pub mod schedule;
pub mod student;
pub mod teacher;
pub mod user;

pub use academic::{ClassItem, Subject};
pub use bill::{Bill, BillStatus};
pub use common::NamedRef;
pub use fee::Fee;
pub use schedule::Schedule;
pub use student::Student;
pub use teacher::Teacher;
pub use user::AdminUser;
