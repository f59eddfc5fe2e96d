//! Teacher management commands.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use schooladmin_core::error::AppError;
use schooladmin_entity::Teacher;

use super::resource::{self, CrudCommand};
use crate::context::AppContext;
use crate::output::{OutputFormat, or_dash};

/// Arguments for teacher commands
#[derive(Debug, Args)]
pub struct TeacherArgs {
    /// Teacher subcommand
    #[command(subcommand)]
    pub command: CrudCommand,
}

/// Teacher display row for table output
#[derive(Debug, Serialize, Tabled)]
struct TeacherRow {
    /// Teacher ID
    id: u64,
    /// Employee number
    nip: String,
    /// Name
    name: String,
    /// Subject specialization
    specialization: String,
}

impl From<&Teacher> for TeacherRow {
    fn from(t: &Teacher) -> Self {
        Self {
            id: t.id,
            nip: or_dash(Some(&t.nip)),
            name: t.name.clone(),
            specialization: or_dash(t.subject_specialization.as_deref()),
        }
    }
}

/// Execute teacher commands
pub async fn execute(
    args: &TeacherArgs,
    ctx: &AppContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = || ctx.resource::<Teacher>().create_form(Teacher::create_form());
    let paged = ctx.controller(config());
    let lookup = ctx.controller(resource::whole_collection(
        config(),
        ctx.config.controller.bulk_limit,
    ));
    resource::execute(
        &args.command,
        &paged,
        &lookup,
        format,
        |t: &Teacher| TeacherRow::from(t),
    )
    .await
}
