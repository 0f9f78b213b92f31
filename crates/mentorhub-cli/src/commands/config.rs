//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use mentorhub_core::config::AppConfig;
use mentorhub_core::result::AppResult;

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
    /// Show current configuration
    Show,
    /// Validate the configuration
    Validate,
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    env: &str,
    format: OutputFormat,
) -> AppResult<()> {
    match &args.command {
        ConfigCommand::Show => output::print_item(config, format),
        ConfigCommand::Validate => match config.validate() {
            Ok(()) => {
                output::print_success(&format!("Configuration for '{env}' is valid"));
                output::print_kv("API", &config.api.base_url);
                output::print_kv("Session store", &config.session.store);
                output::print_kv(
                    "Access token TTL",
                    &format!("{} days", config.session.access_token_ttl_days),
                );
                let idle = match config.session.idle_timeout_minutes {
                    0 => "disabled".to_string(),
                    minutes => format!("{minutes} min"),
                };
                output::print_kv("Idle timeout", &idle);
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {e}"));
                return Err(e);
            }
        },
    }

    Ok(())
}
