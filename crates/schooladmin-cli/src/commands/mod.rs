//! CLI command definitions and dispatch.

pub mod academic;
pub mod auth;
pub mod bills;
pub mod config;
pub mod dashboard;
pub mod fees;
pub mod resource;
pub mod schedules;
pub mod students;
pub mod teachers;

use clap::{Parser, Subcommand};

use schooladmin_core::config::AppConfig;
use schooladmin_core::error::AppError;

use crate::context::AppContext;
use crate::output::OutputFormat;

/// SchoolAdmin: administrative console for the school backend
#[derive(Debug, Parser)]
#[command(name = "schooladmin", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults to $SCHOOLADMIN_CONFIG, then
    /// config/default.toml)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in as an administrator
    Login(auth::LoginArgs),
    /// Forget the stored sign-in
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Headline statistics
    Dashboard,
    /// Student management
    Students(students::StudentArgs),
    /// Teacher management
    Teachers(teachers::TeacherArgs),
    /// Class management
    Classes(academic::ClassArgs),
    /// Subject management
    Subjects(academic::SubjectArgs),
    /// Timetable management
    Schedules(schedules::ScheduleArgs),
    /// Billing management
    Bills(bills::BillArgs),
    /// Fee types billed to students
    Fees(fees::FeeArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig, config_path: &str) -> Result<(), AppError> {
        if let Commands::Config(args) = &self.command {
            return config::execute(args, &config, config_path, self.format).await;
        }

        let ctx = AppContext::build(config, self.yes)?;
        match &self.command {
            Commands::Login(args) => auth::login(args, &ctx).await,
            Commands::Logout => auth::logout(&ctx),
            Commands::Whoami => auth::whoami(&ctx, self.format),
            Commands::Dashboard => dashboard::execute(&ctx, self.format).await,
            Commands::Students(args) => students::execute(args, &ctx, self.format).await,
            Commands::Teachers(args) => teachers::execute(args, &ctx, self.format).await,
            Commands::Classes(args) => academic::execute_classes(args, &ctx, self.format).await,
            Commands::Subjects(args) => academic::execute_subjects(args, &ctx, self.format).await,
            Commands::Schedules(args) => schedules::execute(args, &ctx, self.format).await,
            Commands::Bills(args) => bills::execute(args, &ctx, self.format).await,
            Commands::Fees(args) => fees::execute(args, &ctx, self.format).await,
            Commands::Config(_) => Ok(()),
        }
    }
}
