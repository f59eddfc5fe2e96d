//! # schooladmin-cli
//!
//! Terminal front end for the SchoolAdmin console. Each resource command
//! drives a [`ListResourceController`](schooladmin_controller::ListResourceController)
//! and renders its snapshot as a table or JSON.

pub mod commands;
pub mod confirm;
pub mod context;
pub mod output;

pub use commands::Cli;
pub use confirm::PromptConfirm;
pub use context::AppContext;
