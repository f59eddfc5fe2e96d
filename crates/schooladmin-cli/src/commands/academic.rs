//! Class and subject commands.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use schooladmin_core::error::AppError;
use schooladmin_entity::{ClassItem, Subject};

use super::resource::{self, CrudCommand};
use crate::context::AppContext;
use crate::output::OutputFormat;

/// Arguments for class commands
#[derive(Debug, Args)]
pub struct ClassArgs {
    /// Class subcommand
    #[command(subcommand)]
    pub command: CrudCommand,
}

/// Arguments for subject commands
#[derive(Debug, Args)]
pub struct SubjectArgs {
    /// Subject subcommand
    #[command(subcommand)]
    pub command: CrudCommand,
}

#[derive(Debug, Serialize, Tabled)]
struct ClassRow {
    id: u64,
    name: String,
    level: String,
    capacity: String,
}

impl From<&ClassItem> for ClassRow {
    fn from(c: &ClassItem) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            level: number_or_dash(c.level),
            capacity: number_or_dash(c.capacity),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct SubjectRow {
    id: u64,
    code: String,
    name: String,
    level: String,
}

impl From<&Subject> for SubjectRow {
    fn from(s: &Subject) -> Self {
        Self {
            id: s.id,
            code: s.code.clone(),
            name: s.name.clone(),
            level: number_or_dash(s.level),
        }
    }
}

fn number_or_dash(value: Option<i64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Execute class commands
pub async fn execute_classes(
    args: &ClassArgs,
    ctx: &AppContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = || ctx.resource::<ClassItem>().create_form(ClassItem::create_form());
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
        |c: &ClassItem| ClassRow::from(c),
    )
    .await
}

/// Execute subject commands
pub async fn execute_subjects(
    args: &SubjectArgs,
    ctx: &AppContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = || ctx.resource::<Subject>().create_form(Subject::create_form());
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
        |s: &Subject| SubjectRow::from(s),
    )
    .await
}
