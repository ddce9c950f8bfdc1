//! Prelude for convenient imports in plugin code.

pub use serde_json::Value;

pub use crate::context::RequestContext;
pub use crate::error::PluginError;
pub use crate::hooks::{Action, Filter, HookArgs, HookDispatcher, Priority, SystemHook};
pub use crate::plugin::{Plugin, PluginInfo};

pub use crate::hook_args;
