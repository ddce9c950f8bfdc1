//! Hook system.

pub mod definitions;
pub mod dispatcher;
pub mod registry;

pub use definitions::{HookArgs, Priority, SystemHook};
pub use dispatcher::HookDispatcher;
pub use registry::{Action, ActionList, Filter, FilterList, PriorityList};
