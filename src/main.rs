//! SchoolAdmin console
//!
//! Main entry point: parses the command line, loads configuration,
//! initializes logging, and dispatches the command.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use schooladmin_cli::Cli;
use schooladmin_cli::output;
use schooladmin_core::config::AppConfig;
use schooladmin_core::error::AppError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .or_else(|| std::env::var("SCHOOLADMIN_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    let config = match load_configuration(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = cli.execute(config, &config_path).await {
        tracing::error!(error = %e, "Command failed");
        if e.is_auth_missing() {
            output::print_error("You are not signed in. Run `schooladmin login` first.");
        } else {
            output::print_error(&e.user_message(&e.message));
        }
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration(config_path: &str) -> Result<AppConfig, AppError> {
    let env = std::env::var("SCHOOLADMIN_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load(config_path, &env)
}

/// Initialize tracing/logging
///
/// Logs go to stderr so that `--format json` output stays parseable.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
