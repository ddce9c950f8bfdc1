//! Configuration management CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use chev_core::ErrorLog;
use chev_core::config::AppConfig;
use chev_core::result::AppResult;
use chev_plugin::{PluginError, RequestContext, SystemHook};

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
    /// Validate configuration file
    Validate,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config_path: &str, format: OutputFormat) -> AppResult<()> {
    match &args.command {
        ConfigCommand::Show => {
            let config = super::load_config(config_path)?;
            output::print_item(&config, format);
        }
        ConfigCommand::Validate => match super::load_config(config_path) {
            Ok(config) => {
                if let Err(e) = check_hooks(&config) {
                    output::print_error(&format!("Configuration invalid: {}", e));
                    return Err(e.into());
                }
                output::print_success(&format!("Configuration '{}' is valid", config_path));
                output::print_kv("Site", &config.site.name);
                output::print_kv("Debug", &config.site.debug.to_string());
                output::print_kv("Extra hooks", &config.plugins.extra_hooks.join(", "));
                output::print_kv("Log level", &config.logging.level);
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {}", e));
                return Err(e);
            }
        },
    }

    Ok(())
}

/// Declares the built-in and extra hooks in a scratch context, failing on
/// any collision.
fn check_hooks(config: &AppConfig) -> Result<(), PluginError> {
    let mut ctx = RequestContext::new(Arc::new(ErrorLog::new()));
    let mut names: Vec<&str> = SystemHook::ALL.iter().map(SystemHook::as_str).collect();
    names.extend(config.plugins.extra_hooks.iter().map(String::as_str));
    ctx.hooks_mut().add_hooks(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_hooks_accepts_default_config() {
        assert!(check_hooks(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_check_hooks_rejects_colliding_extra_hooks() {
        let mut config = AppConfig::default();
        config.plugins.extra_hooks = vec!["set_var".into(), "render_page".into()];

        assert_eq!(
            check_hooks(&config),
            Err(PluginError::DeclarationFailed(vec!["set_var".into()]))
        );
    }
}
