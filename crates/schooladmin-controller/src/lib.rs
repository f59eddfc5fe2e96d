//! # schooladmin-controller
//!
//! The generic [`ListResourceController`] that backs every collection
//! screen of the console: load a page, search with debounce, paginate,
//! edit through a form draft, delete behind a confirmation, and run
//! guarded per-row actions. Renderers observe [`ControllerSnapshot`]s.

pub mod action;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod sequence;
pub mod state;

pub use action::{BulkAction, GuardedAction};
pub use config::{PaginationMode, ResourceConfig};
pub use controller::ListResourceController;
pub use state::{ControllerSnapshot, FormDraft, FormMode, ListState, Notice, NoticeKind};
