//! CLI command definitions and dispatch.

pub mod auth;
pub mod config;
pub mod request;
pub mod session;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use mentorhub_client::{ApiClient, RouteNavigator};
use mentorhub_core::config::AppConfig;
use mentorhub_core::result::AppResult;
use mentorhub_session::SessionStoreManager;

/// MentorHub: authenticated command-line client
#[derive(Debug, Parser)]
#[command(name = "mentorhub", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (selects config/<env>.toml)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Route the client is on; decides where a forced logout redirects
    #[arg(short, long)]
    pub path: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in, log out, or show the current user
    Auth(auth::AuthArgs),
    /// Inspect the stored session
    Session(session::SessionArgs),
    /// Send an authenticated request to the API
    Request(request::RequestArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Load configuration for the selected environment.
    pub fn load_config(&self) -> AppResult<AppConfig> {
        AppConfig::load(&self.env)
    }

    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> AppResult<()> {
        if let Commands::Config(args) = &self.command {
            return config::execute(args, &config, &self.env, self.format);
        }

        let ctx = Context::new(config, self.path.as_deref()).await?;
        match &self.command {
            Commands::Auth(args) => auth::execute(args, &ctx, self.format).await,
            Commands::Session(args) => session::execute(args, &ctx, self.format).await,
            Commands::Request(args) => request::execute(args, &ctx, self.format).await,
            Commands::Config(_) => Ok(()),
        }
    }
}

/// Everything a command needs to talk to the API.
#[derive(Debug)]
pub struct Context {
    /// Loaded configuration.
    pub config: AppConfig,
    /// Configured session store.
    pub store: SessionStoreManager,
    /// Route tracker receiving forced redirects.
    pub navigator: Arc<RouteNavigator>,
    /// Authenticated API client.
    pub client: ApiClient,
}

impl Context {
    /// Validate the configuration, open the session store and build the
    /// client, starting on `path` (or the configured start route).
    pub async fn new(config: AppConfig, path: Option<&str>) -> AppResult<Self> {
        config.validate()?;
        let store = SessionStoreManager::new(&config.session).await?;
        let start = path.unwrap_or(&config.routes.start_path).to_string();
        let navigator = Arc::new(RouteNavigator::new(start));
        let client = ApiClient::new(&config, Arc::new(store.clone()), navigator.clone())?;

        Ok(Self {
            config,
            store,
            navigator,
            client,
        })
    }

    /// Target of the most recent forced redirect, if any.
    pub fn redirected_to(&self) -> Option<String> {
        self.navigator.redirects().last().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "mentorhub",
            "--env",
            "staging",
            "--format",
            "json",
            "--path",
            "/admin/users",
            "auth",
            "status",
        ])
        .unwrap();

        assert_eq!(cli.env, "staging");
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.path.as_deref(), Some("/admin/users"));
        assert!(matches!(cli.command, Commands::Auth(_)));
    }

    #[tokio::test]
    async fn test_context_starts_on_configured_route() {
        let mut config = AppConfig::default();
        config.session.store = "memory".to_string();

        let ctx = Context::new(config.clone(), None).await.unwrap();
        assert_eq!(
            mentorhub_core::traits::Navigator::current_path(ctx.navigator.as_ref()),
            "/dashboard"
        );
        assert_eq!(ctx.redirected_to(), None);

        let ctx = Context::new(config, Some("/admin/users")).await.unwrap();
        assert_eq!(
            mentorhub_core::traits::Navigator::current_path(ctx.navigator.as_ref()),
            "/admin/users"
        );
    }

    #[tokio::test]
    async fn test_context_rejects_invalid_config() {
        let mut config = AppConfig::default();
        config.session.store = "memory".to_string();
        config.api.timeout_seconds = 0;

        let err = Context::new(config, None).await.unwrap_err();
        assert_eq!(err.kind, mentorhub_core::error::ErrorKind::Configuration);
        assert!(err.message.contains("timeout_seconds"));
    }
}
