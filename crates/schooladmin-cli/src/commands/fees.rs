//! Fee type commands. Bills pick their `feeId` from this list.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use schooladmin_core::error::AppError;
use schooladmin_entity::Fee;

use super::resource::{self, CrudCommand};
use crate::context::AppContext;
use crate::output::{OutputFormat, rupiah};

/// Arguments for fee commands
#[derive(Debug, Args)]
pub struct FeeArgs {
    /// Fee subcommand
    #[command(subcommand)]
    pub command: CrudCommand,
}

#[derive(Debug, Serialize, Tabled)]
struct FeeRow {
    id: u64,
    name: String,
    amount: String,
}

impl From<&Fee> for FeeRow {
    fn from(f: &Fee) -> Self {
        Self {
            id: f.id,
            name: f.name.clone(),
            amount: rupiah(f.amount_value()),
        }
    }
}

/// Execute fee commands
pub async fn execute(
    args: &FeeArgs,
    ctx: &AppContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = || ctx.resource::<Fee>().create_form(Fee::create_form());
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
        |f: &Fee| FeeRow::from(f),
    )
    .await
}
