//! # chev-plugin
//!
//! Hook framework for the Chevereto bootstrap. Provides:
//!
//! - A namespaced variable registry with system and user namespaces
//! - Named hooks with priority-ordered actions and filters
//! - Two-phase execution: filters transform the arguments, then actions observe them
//! - A request-scoped context that owns all of the above
//! - Query string routing through the `parse_url` hook

pub mod context;
pub mod error;
pub mod hooks;
pub mod macros;
pub mod plugin;
pub mod prelude;
pub mod registry;
pub mod router;

pub use context::RequestContext;
pub use error::PluginError;
pub use hooks::{HookArgs, HookDispatcher, Priority, SystemHook};
pub use plugin::{Plugin, PluginInfo, PluginRegistry};
pub use registry::{Registry, SystemValue, UserVar};
pub use router::Router;

#[doc(hidden)]
pub mod __private {
    pub use serde_json::json;
}
