//! Site-wide configuration.

use serde::{Deserialize, Serialize};

/// General site settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Display name of the site.
    #[serde(default = "default_name")]
    pub name: String,
    /// Echo every recorded diagnostic to the log at `warn` level.
    #[serde(default)]
    pub debug: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            debug: false,
        }
    }
}

fn default_name() -> String {
    "Chevereto".to_string()
}
