//! Plugin system configuration.

use serde::{Deserialize, Serialize};

/// Plugin system configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Hook names declared at bootstrap in addition to the built-in ones.
    #[serde(default)]
    pub extra_hooks: Vec<String>,
}
