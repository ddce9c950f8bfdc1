//! Request context: owns the hook and variable state of one request.
//!
//! Nothing in this crate is global. A context is built per request (or per
//! test), so independent contexts never observe each other.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{info, warn};
use uuid::Uuid;

use chev_core::config::AppConfig;
use chev_core::ErrorLog;

use crate::error::PluginError;
use crate::hooks::{HookDispatcher, SystemHook};
use crate::plugin::{Plugin, PluginInfo, PluginRegistry};
use crate::registry::Registry;
use crate::router::Router;

/// Everything a request needs: hooks, variables, diagnostics, plugins, and
/// the routed query.
#[derive(Debug)]
pub struct RequestContext {
    /// Request identifier, used to correlate log output.
    id: Uuid,
    /// Hook dispatcher, which owns the variable registry.
    hooks: HookDispatcher,
    /// Shared diagnostic log the registry reports into.
    errors: Arc<ErrorLog>,
    /// Plugins loaded into this request.
    plugins: PluginRegistry,
    /// Parsed query of this request.
    router: Router,
}

impl RequestContext {
    /// Creates an empty context with no hooks declared.
    pub fn new(errors: Arc<ErrorLog>) -> Self {
        let registry = Registry::new(errors.clone());

        Self {
            id: Uuid::new_v4(),
            hooks: HookDispatcher::new(registry),
            errors,
            plugins: PluginRegistry::new(),
            router: Router::default(),
        }
    }

    /// Creates a context and declares the built-in hooks plus
    /// `plugins.extra_hooks` from `config`.
    ///
    /// Diagnostics are echoed to the log when `site.debug` is set.
    ///
    /// A name that collides with an already declared hook is reported to
    /// the error log and skipped. Every other name is still declared, so
    /// the caller always gets a usable context.
    pub fn bootstrap(config: &AppConfig) -> Self {
        let mut ctx = Self::new(Arc::new(ErrorLog::with_echo(config.site.debug)));

        let mut names: Vec<&str> = SystemHook::ALL.iter().map(SystemHook::as_str).collect();
        names.extend(config.plugins.extra_hooks.iter().map(String::as_str));
        if let Err(err) = ctx.hooks.add_hooks(names) {
            warn!(request_id = %ctx.id, error = %err, "Some hooks could not be declared");
        }

        info!(
            request_id = %ctx.id,
            hooks = ctx.hooks.declared_hooks().len(),
            "Request context bootstrapped"
        );
        ctx
    }

    /// Returns the request identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the hook dispatcher.
    pub fn hooks(&self) -> &HookDispatcher {
        &self.hooks
    }

    /// Returns the hook dispatcher for declarations, attachments and hooked writes.
    pub fn hooks_mut(&mut self) -> &mut HookDispatcher {
        &mut self.hooks
    }

    /// Returns the variable registry.
    pub fn registry(&self) -> &Registry {
        self.hooks.registry()
    }

    /// Returns the diagnostic log.
    pub fn errors(&self) -> &ErrorLog {
        &self.errors
    }

    /// Loads a plugin into this request.
    pub fn load_plugin(&mut self, plugin: &dyn Plugin) -> Result<(), PluginError> {
        self.plugins.load(plugin, &mut self.hooks)
    }

    /// Lists loaded plugins in load order.
    pub fn loaded_plugins(&self) -> &[PluginInfo] {
        self.plugins.list()
    }

    /// Parses `query_string` through the `parse_url` hook and keeps the result.
    pub fn route(&mut self, query_string: &str) -> &Map<String, Value> {
        self.router = Router::load(&self.hooks, query_string);
        self.router.query_vars()
    }

    /// Returns the routed query variables. Empty until [`route`](Self::route) runs.
    pub fn query_vars(&self) -> &Map<String, Value> {
        self.router.query_vars()
    }
}
