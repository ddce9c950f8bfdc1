//! Plugin registry: records which plugins were loaded into a request.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::PluginError;
use crate::hooks::HookDispatcher;

/// Metadata about a loaded plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Unique plugin identifier. Also the conventional user-variable namespace.
    pub id: String,
    /// Human-readable plugin name.
    pub name: String,
    /// Plugin version string.
    pub version: String,
    /// Plugin description.
    pub description: String,
}

/// Trait that all plugins must implement.
pub trait Plugin {
    /// Returns plugin metadata.
    fn info(&self) -> PluginInfo;

    /// Declares the plugin's own hooks and attaches its actions and filters.
    fn register(&self, hooks: &mut HookDispatcher) -> Result<(), PluginError>;
}

/// Plugins loaded so far, in load order.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    loaded: Vec<PluginInfo>,
}

impl PluginRegistry {
    /// Creates an empty plugin registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `plugin` against `hooks` and records it.
    ///
    /// A duplicate id fails with [`PluginError::AlreadyLoaded`], reported
    /// through the dispatcher's registry. If the plugin's own `register`
    /// fails, it is not recorded.
    pub fn load(&mut self, plugin: &dyn Plugin, hooks: &mut HookDispatcher) -> Result<(), PluginError> {
        let info = plugin.info();

        if self.contains(&info.id) {
            return hooks.registry().fail(PluginError::AlreadyLoaded(info.id));
        }

        plugin.register(hooks)?;

        info!(plugin_id = %info.id, name = %info.name, version = %info.version, "Plugin loaded");
        self.loaded.push(info);
        Ok(())
    }

    /// Lists loaded plugin metadata in load order.
    pub fn list(&self) -> &[PluginInfo] {
        &self.loaded
    }

    /// Checks whether a plugin id is loaded.
    pub fn contains(&self, plugin_id: &str) -> bool {
        self.loaded.iter().any(|info| info.id == plugin_id)
    }
}
