//! Application configuration schemas.
//!
//! All configuration structs are deserialized from an optional TOML file
//! via the `config` crate, overlaid with `CHEV__`-prefixed environment
//! variables. Every section has defaults, so a missing file is not an
//! error.

pub mod logging;
pub mod plugin;
pub mod site;

use serde::{Deserialize, Serialize};

use self::logging::LoggingConfig;
use self::plugin::PluginConfig;
use self::site::SiteConfig;

use crate::error::AppError;
use crate::result::AppResult;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// General site settings.
    #[serde(default)]
    pub site: SiteConfig,
    /// Plugin system settings.
    #[serde(default)]
    pub plugins: PluginConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file and the environment.
    ///
    /// The file is optional. Environment variables use the `CHEV` prefix
    /// with `__` as the section separator, e.g. `CHEV__SITE__DEBUG=true`.
    /// `CHEV__PLUGINS__EXTRA_HOOKS` takes a comma separated list.
    pub fn load(path: &str) -> AppResult<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("CHEV")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("plugins.extra_hooks")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml(source: &str) -> AppResult<Self> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let config = AppConfig::from_toml("").expect("empty config parses");
        assert_eq!(config.site.name, "Chevereto");
        assert!(!config.site.debug);
        assert!(config.plugins.extra_hooks.is_empty());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [site]
            debug = true

            [plugins]
            extra_hooks = ["render_page", "upload_image"]

            [logging]
            format = "json"
            "#,
        )
        .expect("config parses");

        assert!(config.site.debug);
        assert_eq!(config.site.name, "Chevereto");
        assert_eq!(config.plugins.extra_hooks, vec!["render_page", "upload_image"]);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let config = AppConfig::load("config/does-not-exist").expect("optional file");
        assert_eq!(config.site.name, "Chevereto");
    }
}
