//! Login, logout, and status commands.

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::output::{self, OutputFormat};
use mentorhub_client::AuthApi;
use mentorhub_core::error::AppError;
use mentorhub_core::result::AppResult;

use super::Context;

/// Arguments for auth commands
#[derive(Debug, Args)]
pub struct AuthArgs {
    /// Auth subcommand
    #[command(subcommand)]
    pub command: AuthCommand,
}

/// Auth subcommands
#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Log in and store the session
    Login {
        /// Account email (prompted if omitted)
        #[arg(long)]
        email: Option<String>,
        /// Account password (prompted if omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show who is logged in
    Status,
}

/// Current session, with tokens masked
#[derive(Debug, Serialize)]
struct SessionStatus {
    user_id: String,
    user_type: String,
    access_token: String,
    refresh_token: String,
}

/// Execute auth commands
pub async fn execute(args: &AuthArgs, ctx: &Context, format: OutputFormat) -> AppResult<()> {
    let auth = AuthApi::new(ctx.client.clone());

    match &args.command {
        AuthCommand::Login { email, password } => {
            let email = match email {
                Some(email) => email.clone(),
                None => dialoguer::Input::<String>::new()
                    .with_prompt("Email")
                    .interact_text()
                    .map_err(input_error)?,
            };
            let password = match password {
                Some(password) => password.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .interact()
                    .map_err(input_error)?,
            };

            // Logging in happens from a public page, so a rejected login
            // never triggers a redirect.
            ctx.navigator.navigate(ctx.config.routes.home.clone());

            let creds = auth.login(&email, &password).await?;
            output::print_success(&format!(
                "Logged in as {} ({})",
                creds.user_id, creds.user_type
            ));
        }
        AuthCommand::Logout => {
            auth.logout().await?;
            output::print_success("Logged out");
        }
        AuthCommand::Status => match auth.current_session().await? {
            Some(creds) => {
                let status = SessionStatus {
                    user_id: creds.user_id,
                    user_type: creds.user_type.to_string(),
                    access_token: output::mask_secret(&creds.access_token),
                    refresh_token: output::mask_secret(&creds.refresh_token),
                };
                match format {
                    OutputFormat::Json => output::print_item(&status, format),
                    OutputFormat::Table => {
                        output::print_kv("User", &status.user_id);
                        output::print_kv("Type", &status.user_type);
                        output::print_kv("Access token", &status.access_token);
                        output::print_kv("Refresh token", &status.refresh_token);
                    }
                }
            }
            None => output::print_warning("Not logged in"),
        },
    }

    Ok(())
}

fn input_error(e: dialoguer::Error) -> AppError {
    AppError::internal(format!("Input error: {e}"))
}
