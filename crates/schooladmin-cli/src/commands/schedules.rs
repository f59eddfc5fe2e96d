//! Timetable commands.
//!
//! The timetable is small, so it is fetched whole and paged locally,
//! which lets the class/teacher/subject/day filters work without a
//! round trip.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use schooladmin_controller::{BulkAction, ResourceConfig};
use schooladmin_core::error::AppError;
use schooladmin_entity::Schedule;
use schooladmin_entity::common::NamedRef;

use super::resource::{self, CrudCommand};
use crate::context::AppContext;
use crate::output::{OutputFormat, or_dash};

/// Arguments for schedule commands
#[derive(Debug, Args)]
pub struct ScheduleArgs {
    /// Schedule subcommand
    #[command(subcommand)]
    pub command: ScheduleCommand,
}

/// Schedule subcommands
#[derive(Debug, Subcommand)]
pub enum ScheduleCommand {
    #[command(flatten)]
    Crud(CrudCommand),
    /// Generate the timetable on the server from teacher and class data
    Generate,
    /// Delete every schedule entry
    Reset,
}

#[derive(Debug, Serialize, Tabled)]
struct ScheduleRow {
    id: u64,
    day: String,
    time: String,
    class: String,
    subject: String,
    teacher: String,
}

impl From<&Schedule> for ScheduleRow {
    fn from(s: &Schedule) -> Self {
        let name = |r: &Option<NamedRef>| or_dash(r.as_ref().map(|r| r.name.as_str()));
        Self {
            id: s.id,
            day: s.day.clone(),
            time: s.time_range(),
            class: name(&s.class),
            subject: name(&s.subject),
            teacher: name(&s.teacher),
        }
    }
}

fn config(ctx: &AppContext) -> ResourceConfig<Schedule> {
    ctx.resource::<Schedule>()
        .client_side(ctx.config.controller.bulk_limit)
        .create_form(Schedule::create_form())
        .bulk_action(BulkAction::auto_generate())
        .bulk_action(BulkAction::reset_all())
}

/// Execute schedule commands
pub async fn execute(
    args: &ScheduleArgs,
    ctx: &AppContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let paged = ctx.controller(config(ctx));

    match &args.command {
        ScheduleCommand::Crud(command) => {
            let lookup = ctx.controller(resource::whole_collection(
                config(ctx),
                ctx.config.controller.bulk_limit,
            ));
            resource::execute(
                command,
                &paged,
                &lookup,
                format,
                |s: &Schedule| ScheduleRow::from(s),
            )
            .await
        }
        ScheduleCommand::Generate => resource::bulk(&paged, "auto-generate").await,
        ScheduleCommand::Reset => resource::bulk(&paged, "reset").await,
    }
}
