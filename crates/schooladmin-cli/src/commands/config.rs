//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use schooladmin_core::config::AppConfig;
use schooladmin_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Validate the configuration
    Validate,
    /// Generate a default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "config/generated.toml")]
        output: String,
    },
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => match format {
            OutputFormat::Json => output::print_item(config, format),
            OutputFormat::Table => print_summary(config),
        },
        ConfigCommand::Validate => {
            validate(config)?;
            output::print_success(&format!("Configuration '{config_path}' is valid"));
            print_summary(config);
        }
        ConfigCommand::Generate { output: out_path } => {
            let default_config = include_str!("../../../../config/default.toml");

            if let Some(parent) = std::path::Path::new(out_path).parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| AppError::internal(format!("Failed to create dir: {e}")))?;
            }

            tokio::fs::write(out_path, default_config)
                .await
                .map_err(|e| AppError::internal(format!("Failed to write config: {e}")))?;

            output::print_success(&format!("Default config written to '{out_path}'"));
        }
    }

    Ok(())
}

fn print_summary(config: &AppConfig) {
    output::print_kv("API", &config.api.base_url);
    output::print_kv("GraphQL", &config.api.graphql_url);
    output::print_kv(
        "Request timeout",
        &format!("{}s", config.api.request_timeout_seconds),
    );
    output::print_kv("Credential file", &config.auth.credential_file);
    output::print_kv("Required role", &config.auth.required_role);
    output::print_kv("Page size", &config.controller.page_size.to_string());
    output::print_kv(
        "Search debounce",
        &format!("{}ms", config.controller.search_debounce_ms),
    );
    output::print_kv("Bulk limit", &config.controller.bulk_limit.to_string());
    output::print_kv(
        "Load watchdog",
        &format!("{}s", config.controller.load_watchdog_seconds),
    );
    output::print_kv(
        "Logging",
        &format!("{} ({})", config.logging.level, config.logging.format),
    );
}

/// Reject values that would make the console unusable.
pub fn validate(config: &AppConfig) -> Result<(), AppError> {
    for (name, url) in [
        ("api.base_url", &config.api.base_url),
        ("api.graphql_url", &config.api.graphql_url),
    ] {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AppError::configuration(format!(
                "{name} must be an http(s) URL, got '{url}'"
            )));
        }
    }
    if config.api.request_timeout_seconds == 0 {
        return Err(AppError::configuration(
            "api.request_timeout_seconds must be positive",
        ));
    }
    if config.controller.page_size == 0 || config.controller.bulk_limit == 0 {
        return Err(AppError::configuration(
            "controller.page_size and controller.bulk_limit must be positive",
        ));
    }
    if config.auth.credential_file.trim().is_empty() {
        return Err(AppError::configuration("auth.credential_file is empty"));
    }
    if !matches!(config.logging.format.as_str(), "json" | "pretty") {
        return Err(AppError::configuration(format!(
            "logging.format must be 'json' or 'pretty', got '{}'",
            config.logging.format
        )));
    }
    Ok(())
}
