//! Sign-in commands.

use clap::Args;

use schooladmin_client::LoginInput;
use schooladmin_core::error::AppError;

use crate::context::AppContext;
use crate::output::{self, OutputFormat};

/// Arguments for login
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username (will prompt if not provided)
    #[arg(short, long)]
    pub username: Option<String>,
    /// Password (will prompt if not provided)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Sign in and store the token.
pub async fn login(args: &LoginArgs, ctx: &AppContext) -> Result<(), AppError> {
    let username = match &args.username {
        Some(u) => u.clone(),
        None => dialoguer::Input::new()
            .with_prompt("Username")
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
    };

    let password = match &args.password {
        Some(p) => p.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
    };

    let user = ctx.auth.login(LoginInput::new(username, password)).await?;
    output::print_success(&format!("Signed in as {}", user.display_name()));
    Ok(())
}

/// Forget the stored token.
pub fn logout(ctx: &AppContext) -> Result<(), AppError> {
    ctx.auth.logout()?;
    output::print_success("Signed out");
    Ok(())
}

/// Show who is signed in.
pub fn whoami(ctx: &AppContext, format: OutputFormat) -> Result<(), AppError> {
    ctx.auth.require()?;
    let credential = ctx.auth.current().ok_or_else(AppError::auth_missing)?;
    match format {
        OutputFormat::Json => {
            // The token stays out of printed output.
            let summary = serde_json::json!({
                "username": credential.username,
                "name": credential.name,
                "role": credential.role,
            });
            output::print_item(&summary, format);
        }
        OutputFormat::Table => {
            output::print_kv("Username", credential.username.as_deref().unwrap_or("-"));
            output::print_kv("Name", credential.name.as_deref().unwrap_or("-"));
            output::print_kv("Role", credential.role.as_deref().unwrap_or("-"));
        }
    }
    Ok(())
}
