//! Operations shared by every collection command.
//!
//! Each function drives a [`ListResourceController`] through one
//! operation and turns the resulting snapshot into terminal output. A
//! one-shot CLI has no stale rows to fall back on, so a failed load is
//! reported as an error.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use schooladmin_controller::{ControllerSnapshot, ListResourceController, ResourceConfig};
use schooladmin_core::error::AppError;
use schooladmin_core::result::AppResult;
use schooladmin_core::traits::Resource;
use schooladmin_core::types::FormFields;

use crate::output::{self, OutputFormat};

/// Arguments for listing one page of a collection
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Page number (1-based)
    #[arg(short, long, default_value_t = 1)]
    pub page: u64,
    /// Search term
    #[arg(short, long, default_value = "")]
    pub search: String,
    /// Show only rows where KEY equals VALUE (repeatable)
    #[arg(long = "filter", value_name = "KEY=VALUE")]
    pub filters: Vec<String>,
}

/// Subcommands every collection supports
#[derive(Debug, Subcommand)]
pub enum CrudCommand {
    /// List one page
    List(ListArgs),
    /// Create a record
    Create {
        /// Field values (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },
    /// Edit a record
    Edit {
        /// Record ID
        id: u64,
        /// Field values to change (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },
    /// Delete a record
    Delete {
        /// Record ID
        id: u64,
    },
}

/// Dispatch a shared subcommand.
///
/// `lookup` is used where the row must be found first (edit); it should
/// fetch the whole collection.
pub async fn execute<T, R>(
    command: &CrudCommand,
    paged: &ListResourceController<T>,
    lookup: &ListResourceController<T>,
    format: OutputFormat,
    to_row: impl Fn(&T) -> R,
) -> AppResult<()>
where
    T: Resource,
    R: Serialize + Tabled,
{
    match command {
        CrudCommand::List(args) => list(paged, args, format, to_row).await,
        CrudCommand::Create { fields } => create(paged, fields).await,
        CrudCommand::Edit { id, fields } => edit(lookup, *id, fields).await,
        CrudCommand::Delete { id } => remove(paged, *id).await,
    }
}

/// Configuration that fetches the whole collection as one page.
pub fn whole_collection<T: Resource>(config: ResourceConfig<T>, bulk_limit: u64) -> ResourceConfig<T> {
    config.client_side(bulk_limit).page_size(bulk_limit)
}

/// Load and print one page.
pub async fn list<T, R>(
    controller: &ListResourceController<T>,
    args: &ListArgs,
    format: OutputFormat,
    to_row: impl Fn(&T) -> R,
) -> AppResult<()>
where
    T: Resource,
    R: Serialize + Tabled,
{
    for raw in &args.filters {
        let (key, value) = parse_assignment(raw)?;
        controller.set_filter(&key, value);
    }

    controller.load(args.page, &args.search).await;
    let snapshot = controller.snapshot();
    settle(&snapshot)?;

    let rows: Vec<R> = snapshot.list.items.iter().map(to_row).collect();
    output::print_list(&rows, format);
    if format == OutputFormat::Table {
        output::print_page_footer(&snapshot.list);
    }
    Ok(())
}

/// Find row `id` by loading the collection through `controller`.
pub async fn find<T: Resource>(controller: &ListResourceController<T>, id: u64) -> AppResult<T> {
    controller.load(1, "").await;
    let snapshot = controller.snapshot();
    settle(&snapshot)?;
    snapshot
        .list
        .items
        .into_iter()
        .find(|row| row.id() == id)
        .ok_or_else(|| AppError::not_found(format!("{} #{id} not found", T::LABEL)))
}

/// Open a create draft, apply `assignments`, and submit.
pub async fn create<T: Resource>(
    controller: &ListResourceController<T>,
    assignments: &[String],
) -> AppResult<()> {
    let fields = parse_assignments(assignments)?;
    controller.open_create();
    for (name, raw) in &fields {
        controller.set_field_raw(name, raw);
    }
    let result = controller.submit().await.map(|()| true);
    report(controller, result)
}

/// Open an edit draft for `id`, apply `assignments`, and submit.
pub async fn edit<T: Resource>(
    controller: &ListResourceController<T>,
    id: u64,
    assignments: &[String],
) -> AppResult<()> {
    let fields = parse_assignments(assignments)?;
    if fields.is_empty() {
        return Err(AppError::validation("Nothing to change; pass --set KEY=VALUE"));
    }
    let row = find(controller, id).await?;
    controller.open_edit(&row);
    for (name, raw) in &fields {
        controller.set_field_raw(name, raw);
    }
    let result = controller.submit().await.map(|()| true);
    report(controller, result)
}

/// Delete `id` after confirmation.
pub async fn remove<T: Resource>(controller: &ListResourceController<T>, id: u64) -> AppResult<()> {
    let result = controller.remove(id).await;
    report(controller, result)
}

/// Run the per-row action `name` on `id`. The row is looked up first.
pub async fn action<T: Resource>(
    controller: &ListResourceController<T>,
    name: &str,
    id: u64,
    params: FormFields,
) -> AppResult<()> {
    find(controller, id).await?;
    let result = controller.run_action(name, id, params).await;
    report(controller, result)
}

/// Run the collection-level action `name`.
pub async fn bulk<T: Resource>(controller: &ListResourceController<T>, name: &str) -> AppResult<()> {
    let result = controller.run_bulk(name).await;
    report(controller, result)
}

/// Turn a write outcome into output or an error.
fn report<T: Resource>(
    controller: &ListResourceController<T>,
    result: Result<bool, String>,
) -> AppResult<()> {
    let snapshot = controller.snapshot();
    match result {
        Ok(true) => {
            let message = snapshot
                .notice
                .map(|n| n.message)
                .unwrap_or_else(|| "Done".to_string());
            output::print_success(&message);
            Ok(())
        }
        Ok(false) => {
            output::print_warning("Cancelled.");
            Ok(())
        }
        Err(_) if snapshot.auth_required => Err(AppError::auth_missing()),
        Err(message) => Err(AppError::internal(message)),
    }
}

/// Fail when the last load did not succeed.
fn settle<T>(snapshot: &ControllerSnapshot<T>) -> AppResult<()> {
    if snapshot.auth_required {
        return Err(AppError::auth_missing());
    }
    match &snapshot.list.last_error {
        Some(message) => Err(AppError::internal(message.clone())),
        None => Ok(()),
    }
}

/// Parse `KEY=VALUE`. The value is kept as typed; the open draft decides
/// whether it is text or a checkbox.
pub fn parse_assignment(raw: &str) -> AppResult<(String, String)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(AppError::validation(format!(
            "Expected KEY=VALUE, got '{raw}'"
        ))),
    }
}

/// Parse a list of `KEY=VALUE`.
pub fn parse_assignments(raw: &[String]) -> AppResult<Vec<(String, String)>> {
    raw.iter().map(|item| parse_assignment(item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        let (key, value) = parse_assignment("name=Budi Santoso").unwrap();
        assert_eq!(key, "name");
        assert_eq!(value, "Budi Santoso");

        let (_, flag) = parse_assignment("isCatering=true").unwrap();
        assert_eq!(flag, "true");

        let (_, empty) = parse_assignment("address=").unwrap();
        assert_eq!(empty, "");
    }

    #[test]
    fn test_parse_assignment_rejects_malformed() {
        assert!(parse_assignment("name").is_err());
        assert!(parse_assignment("=x").is_err());
    }

    #[test]
    fn test_value_may_contain_equals() {
        let fields = parse_assignments(&["note=a=b".to_string()]).unwrap();
        assert_eq!(fields, vec![("note".to_string(), "a=b".to_string())]);
    }
}
