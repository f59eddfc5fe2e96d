//! Dashboard summary command.

use schooladmin_client::DashboardService;
use schooladmin_core::error::AppError;

use crate::context::AppContext;
use crate::output::{self, OutputFormat, rupiah};

/// Fetch and print the headline numbers.
pub async fn execute(ctx: &AppContext, format: OutputFormat) -> Result<(), AppError> {
    let service = DashboardService::new(ctx.client.clone(), ctx.config.controller.bulk_limit);
    let stats = service.fetch().await?;

    match format {
        OutputFormat::Json => output::print_item(&stats, format),
        OutputFormat::Table => {
            println!("Dashboard");
            output::print_kv("Students", &stats.total_students.to_string());
            output::print_kv("Teachers", &stats.total_teachers.to_string());
            output::print_kv("Pending bills", &stats.pending_bills.to_string());
            output::print_kv("Revenue", &rupiah(stats.total_revenue));
        }
    }
    Ok(())
}
