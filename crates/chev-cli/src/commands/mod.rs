//! CLI command definitions and dispatch.

pub mod config;
pub mod dump;
pub mod hooks;
pub mod route;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use chev_core::config::AppConfig;
use chev_core::error::AppError;
use chev_core::result::AppResult;
use chev_plugin::RequestContext;

/// Chevereto hook and variable inspection
#[derive(Debug, Parser)]
#[command(name = "chev-cli", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Route a query string through the `parse_url` hook
    Route(route::RouteArgs),
    /// List declared hooks with their attachment counts
    Hooks,
    /// Dump every registry variable as JSON
    Dump(dump::DumpArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(&self) -> AppResult<()> {
        match &self.command {
            Commands::Route(args) => route::execute(args, &self.config, self.format),
            Commands::Hooks => hooks::execute(&self.config, self.format),
            Commands::Dump(args) => dump::execute(args, &self.config),
            Commands::Config(args) => config::execute(args, &self.config, self.format),
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> AppResult<AppConfig> {
    AppConfig::load(config_path)
        .map_err(|e| AppError::configuration(format!("Failed to load config: {}", e)))
}

/// Helper: load configuration and bootstrap a request context
pub fn bootstrap(config_path: &str) -> AppResult<RequestContext> {
    let config = load_config(config_path)?;
    Ok(RequestContext::bootstrap(&config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
        assert_eq!(Cli::command().get_name(), "chev-cli");
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from(["chev-cli", "--format", "json", "hooks"]).expect("parses");
        assert_eq!(cli.config, "config/default.toml");
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Hooks));
    }
}
