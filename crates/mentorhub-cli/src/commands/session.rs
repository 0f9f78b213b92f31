//! Session inspection commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use mentorhub_core::result::AppResult;
use mentorhub_core::traits::SessionStore;
use mentorhub_session::keys;

use super::Context;

/// Arguments for session commands
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Session subcommand
    #[command(subcommand)]
    pub command: SessionCommand,
}

/// Session subcommands
#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// Show the stored session keys
    Show,
}

/// Session key display row
#[derive(Debug, Serialize, Tabled)]
struct SessionRow {
    /// Key
    key: String,
    /// Present
    present: String,
    /// Value
    value: String,
    /// Expires
    expires: String,
}

/// Execute session commands
pub async fn execute(args: &SessionArgs, ctx: &Context, format: OutputFormat) -> AppResult<()> {
    match &args.command {
        SessionCommand::Show => {
            let entries = ctx.store.entries().await?;

            let rows: Vec<SessionRow> = keys::ALL_KEYS
                .iter()
                .map(|key| {
                    let entry = entries.iter().find(|e| e.key == *key);
                    SessionRow {
                        key: key.to_string(),
                        present: if entry.is_some() { "✓" } else { "✗" }.to_string(),
                        value: entry
                            .map(|e| {
                                if keys::is_secret(key) {
                                    output::mask_secret(&e.value)
                                } else {
                                    e.value.clone()
                                }
                            })
                            .unwrap_or_default(),
                        expires: entry
                            .and_then(|e| e.expires_at)
                            .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                            .unwrap_or_else(|| "-".to_string()),
                    }
                })
                .collect();

            output::print_list(&rows, format);
        }
    }

    Ok(())
}
