//! Billing commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use schooladmin_controller::{GuardedAction, ResourceConfig};
use schooladmin_core::error::AppError;
use schooladmin_core::types::FormFields;
use schooladmin_entity::Bill;

use super::resource::{self, CrudCommand};
use crate::context::AppContext;
use crate::output::{OutputFormat, or_dash, rupiah};

/// Arguments for bill commands
#[derive(Debug, Args)]
pub struct BillArgs {
    /// Bill subcommand
    #[command(subcommand)]
    pub command: BillCommand,
}

/// Bill subcommands
#[derive(Debug, Subcommand)]
pub enum BillCommand {
    #[command(flatten)]
    Crud(CrudCommand),
    /// Mark a bill as paid after checking its payment proof
    Verify {
        /// Bill ID
        id: u64,
    },
}

/// Bill display row for table output
#[derive(Debug, Serialize, Tabled)]
struct BillRow {
    /// Bill ID
    id: u64,
    /// Bill number
    number: String,
    /// Student
    student: String,
    /// Fee
    fee: String,
    /// Amount
    amount: String,
    /// Due date
    due: String,
    /// Status
    status: String,
    /// Payment proof uploaded
    proof: String,
}

impl From<&Bill> for BillRow {
    fn from(b: &Bill) -> Self {
        Self {
            id: b.id,
            number: or_dash(Some(&b.bill_number)),
            student: or_dash(b.student.as_ref().map(|s| s.name.as_str())),
            fee: or_dash(b.fee.as_ref().map(|f| f.name.as_str())),
            amount: rupiah(b.amount_value()),
            due: or_dash(b.due_date.as_deref()),
            status: b.status.to_string(),
            proof: if b.payment_proof.is_some() { "Yes" } else { "No" }.to_string(),
        }
    }
}

fn config(ctx: &AppContext) -> ResourceConfig<Bill> {
    let today = chrono::Local::now().date_naive();
    ctx.resource::<Bill>()
        .create_form(Bill::create_form(today))
        .action(GuardedAction::verify_payment())
}

/// Execute bill commands
pub async fn execute(
    args: &BillArgs,
    ctx: &AppContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let paged = ctx.controller(config(ctx));
    let lookup = ctx.controller(resource::whole_collection(
        config(ctx),
        ctx.config.controller.bulk_limit,
    ));

    match &args.command {
        BillCommand::Crud(command) => {
            resource::execute(
                command,
                &paged,
                &lookup,
                format,
                |b: &Bill| BillRow::from(b),
            )
            .await
        }
        BillCommand::Verify { id } => {
            resource::action(&lookup, "verify", *id, FormFields::new()).await
        }
    }
}
