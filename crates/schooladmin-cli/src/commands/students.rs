//! Student management commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use schooladmin_controller::{GuardedAction, ResourceConfig};
use schooladmin_core::error::AppError;
use schooladmin_core::types::FormFields;
use schooladmin_entity::Student;

use super::resource::{self, CrudCommand};
use crate::context::AppContext;
use crate::output::{OutputFormat, or_dash};

/// Arguments for student commands
#[derive(Debug, Args)]
pub struct StudentArgs {
    /// Student subcommand
    #[command(subcommand)]
    pub command: StudentCommand,
}

/// Student subcommands
#[derive(Debug, Subcommand)]
pub enum StudentCommand {
    #[command(flatten)]
    Crud(CrudCommand),
    /// Promote a student to the next grade level
    Promote {
        /// Student ID
        id: u64,
    },
    /// Activate a pending student account
    Activate {
        /// Student ID
        id: u64,
        /// Grade level to place the student at
        #[arg(short, long)]
        level: u32,
    },
}

/// Student display row for table output
#[derive(Debug, Serialize, Tabled)]
struct StudentRow {
    /// Student ID
    id: u64,
    /// Student number
    nis: String,
    /// Name
    name: String,
    /// Class
    class: String,
    /// Parent
    parent: String,
    /// Account status
    status: String,
    /// Catering
    catering: String,
}

impl From<&Student> for StudentRow {
    fn from(s: &Student) -> Self {
        Self {
            id: s.id,
            nis: or_dash(Some(&s.nis)),
            name: s.name.clone(),
            class: or_dash(s.class_name()),
            parent: or_dash(s.parent_name.as_deref()),
            status: if s.is_active { "Active" } else { "Pending" }.to_string(),
            catering: if s.is_catering { "Yes" } else { "No" }.to_string(),
        }
    }
}

fn config(ctx: &AppContext) -> ResourceConfig<Student> {
    ctx.resource::<Student>()
        .create_form(Student::create_form())
        .action(GuardedAction::promote())
        .action(GuardedAction::activate())
}

/// Execute student commands
pub async fn execute(
    args: &StudentArgs,
    ctx: &AppContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let paged = ctx.controller(config(ctx));
    let lookup = ctx.controller(resource::whole_collection(
        config(ctx),
        ctx.config.controller.bulk_limit,
    ));

    match &args.command {
        StudentCommand::Crud(command) => {
            resource::execute(
                command,
                &paged,
                &lookup,
                format,
                |s: &Student| StudentRow::from(s),
            )
            .await
        }
        StudentCommand::Promote { id } => {
            resource::action(&lookup, "promote", *id, FormFields::new()).await
        }
        StudentCommand::Activate { id, level } => {
            let params = FormFields::new().with("level", level.to_string());
            resource::action(&lookup, "activate", *id, params).await
        }
    }
}
