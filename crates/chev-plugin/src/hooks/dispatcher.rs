//! Hook dispatcher: declaration, attachment, and execution.
//!
//! A hook must be declared with [`HookDispatcher::add_hook`] before actions
//! can attach to it. Filters need no declaration and may target any name.
//!
//! Execution runs in two phases:
//! - Filters run in priority order. Each one receives the current argument
//!   list and returns its replacement.
//! - Actions run in the same order with the filtered list. Their results
//!   are discarded.
//!
//! The contract is deliberately asymmetric. Attaching to an undeclared hook
//! is a reported error, but executing an undeclared or removed hook is a
//! silent no-op that returns the arguments unchanged. Optional modules rely
//! on the latter: their hooks may simply not exist in a given setup.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::PluginError;
use crate::registry::{FILTERS_SECTION, HOOKS_SECTION, Registry, SystemValue};

use super::definitions::{HookArgs, Priority, SystemHook};
use super::registry::{Action, ActionList, Filter, FilterList};

/// Dispatches hooks against the tables stored in its [`Registry`].
#[derive(Debug)]
pub struct HookDispatcher {
    /// Variable store holding the hook and filter tables.
    registry: Registry,
}

impl HookDispatcher {
    /// Creates a dispatcher that owns `registry`.
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// Returns the underlying registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns the underlying registry for raw, unhooked writes.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    // ── Declaration ──

    /// Declares a hook with an empty action list.
    pub fn add_hook(&mut self, name: &str) -> Result<(), PluginError> {
        if self.hook_exists(name) {
            return self.registry.fail(PluginError::AlreadyDeclared(name.to_string()));
        }

        self.registry
            .set_system_var(HOOKS_SECTION, name, SystemValue::Actions(ActionList::new()));
        debug!(hook = %name, "Hook declared");
        Ok(())
    }

    /// Declares every name in `names`.
    ///
    /// All names are attempted even after a failure. Fails with
    /// [`PluginError::DeclarationFailed`] listing the names that could not
    /// be declared, or [`PluginError::EmptyHookList`] if `names` is empty.
    pub fn add_hooks<I, S>(&mut self, names: I) -> Result<(), PluginError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut attempted = 0usize;
        let mut failed = Vec::new();

        for name in names {
            attempted += 1;
            let name = name.as_ref();
            if self.add_hook(name).is_err() {
                failed.push(name.to_string());
            }
        }

        if attempted == 0 {
            Err(PluginError::EmptyHookList)
        } else if failed.is_empty() {
            Ok(())
        } else {
            Err(PluginError::DeclarationFailed(failed))
        }
    }

    /// Removes a declared hook.
    ///
    /// Filters stored under the same name are left in place. They stay
    /// inert while the hook is undeclared, and fire again if the name is
    /// declared later.
    pub fn remove_hook(&mut self, name: &str) -> Result<(), PluginError> {
        if !self.hook_exists(name) {
            return self.registry.fail(PluginError::NotDeclared(name.to_string()));
        }

        self.registry.remove_system_var(HOOKS_SECTION, name)?;
        debug!(hook = %name, "Hook removed");
        Ok(())
    }

    /// Returns whether `name` is currently declared.
    pub fn hook_exists(&self, name: &str) -> bool {
        self.registry.system_var_exists(HOOKS_SECTION, name)
    }

    /// Returns every declared hook name, sorted.
    pub fn declared_hooks(&self) -> Vec<&str> {
        self.registry.section_items(HOOKS_SECTION)
    }

    // ── Attachment ──

    /// Attaches an action to a declared hook.
    ///
    /// Fails with [`PluginError::NotDeclared`] if `name` was never declared
    /// or has been removed.
    pub fn attach_to_hook(
        &mut self,
        name: &str,
        action: impl Action + 'static,
        priority: Priority,
    ) -> Result<(), PluginError> {
        self.attach_shared(name, Arc::new(action), priority)
    }

    /// Attaches an already shared action to a declared hook.
    pub fn attach_shared(
        &mut self,
        name: &str,
        action: Arc<dyn Action>,
        priority: Priority,
    ) -> Result<(), PluginError> {
        let Some(value) = self.registry.system_var_mut(HOOKS_SECTION, name) else {
            return self.registry.fail(PluginError::NotDeclared(name.to_string()));
        };

        match value {
            SystemValue::Actions(list) => list.insert(priority, action),
            other => {
                // Plain data written straight into the hooks section; the
                // hook stays declared and gets a fresh list.
                let mut list = ActionList::new();
                list.insert(priority, action);
                *other = SystemValue::Actions(list);
            }
        }

        debug!(hook = %name, priority = %priority, "Action attached");
        Ok(())
    }

    /// Adds a filter to `name`. Always succeeds; the hook need not exist.
    pub fn add_filter(&mut self, name: &str, filter: impl Filter + 'static, priority: Priority) {
        self.add_shared_filter(name, Arc::new(filter), priority);
    }

    /// Adds an already shared filter to `name`.
    pub fn add_shared_filter(&mut self, name: &str, filter: Arc<dyn Filter>, priority: Priority) {
        match self.registry.system_var_mut(FILTERS_SECTION, name) {
            Some(SystemValue::Filters(list)) => list.insert(priority, filter),
            _ => {
                let mut list = FilterList::new();
                list.insert(priority, filter);
                self.registry
                    .set_system_var(FILTERS_SECTION, name, SystemValue::Filters(list));
            }
        }

        debug!(hook = %name, priority = %priority, "Filter added");
    }

    /// Returns the number of actions attached to `name`.
    pub fn action_count(&self, name: &str) -> usize {
        self.actions(name).map_or(0, ActionList::len)
    }

    /// Returns the number of filters stored for `name`, declared or not.
    pub fn filter_count(&self, name: &str) -> usize {
        self.filters(name).map_or(0, FilterList::len)
    }

    fn actions(&self, name: &str) -> Option<&ActionList> {
        self.registry
            .system_var(HOOKS_SECTION, name)
            .and_then(SystemValue::as_actions)
    }

    fn filters(&self, name: &str) -> Option<&FilterList> {
        self.registry
            .system_var(FILTERS_SECTION, name)
            .and_then(SystemValue::as_filters)
    }

    // ── Execution ──

    /// Runs the filters, then the actions, of `name` and returns the
    /// filtered arguments.
    ///
    /// An undeclared or removed hook returns `args` unchanged and reports
    /// nothing. A declared hook with no actions attached still runs its
    /// filters, so a filter-only hook such as `parse_url` can reshape its
    /// arguments without a listener.
    pub fn execute(&self, name: &str, args: HookArgs) -> HookArgs {
        if !self.hook_exists(name) {
            trace!(hook = %name, "Hook not declared, skipping");
            return args;
        }

        let filters = self.filters(name);
        let actions = self.actions(name);

        debug!(
            hook = %name,
            filter_count = filters.map_or(0, FilterList::len),
            action_count = actions.map_or(0, ActionList::len),
            "Executing hook"
        );

        let args = match filters {
            Some(list) => list.iter().fold(args, |args, filter| filter.filter(args)),
            None => args,
        };

        if let Some(list) = actions.filter(|list| !list.is_empty()) {
            for action in list.iter() {
                action.run(&args);
            }
        }

        args
    }

    // ── Hooked variable writes ──

    /// Writes a user variable after running the `set_var` hook.
    ///
    /// Filters receive `[namespace, key, value, overridable]` and may change
    /// any of them. A filter result of the wrong shape aborts the write with
    /// [`PluginError::InvalidArguments`].
    pub fn set_var(
        &mut self,
        namespace: &str,
        key: &str,
        value: Value,
        overridable: bool,
    ) -> Result<(), PluginError> {
        let hook = SystemHook::SetVar.as_str();
        let args = self.execute(
            hook,
            vec![
                Value::from(namespace),
                Value::from(key),
                value,
                Value::from(overridable),
            ],
        );

        match <[Value; 4]>::try_from(args) {
            Ok([Value::String(namespace), Value::String(key), value, Value::Bool(overridable)]) => {
                self.registry
                    .set_user_var(&namespace, &key, value, overridable)
            }
            _ => self.registry.fail(PluginError::InvalidArguments {
                hook: hook.to_string(),
                reason: "expected [namespace: string, key: string, value, overridable: bool]"
                    .to_string(),
            }),
        }
    }

    /// Writes a system data variable after running the `set_system_var` hook.
    ///
    /// Filters receive `[section, item, value]` and may change any of them.
    /// A filter result of the wrong shape aborts the write with
    /// [`PluginError::InvalidArguments`]. Internal table writes made by the
    /// dispatcher itself do not pass through this hook.
    pub fn set_system_var(&mut self, section: &str, item: &str, value: Value) -> Result<(), PluginError> {
        let hook = SystemHook::SetSystemVar.as_str();
        let args = self.execute(
            hook,
            vec![Value::from(section), Value::from(item), value],
        );

        match <[Value; 3]>::try_from(args) {
            Ok([Value::String(section), Value::String(item), value]) => {
                self.registry.set_system_var(&section, &item, value);
                Ok(())
            }
            _ => self.registry.fail(PluginError::InvalidArguments {
                hook: hook.to_string(),
                reason: "expected [section: string, item: string, value]".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chev_core::ErrorLog;
    use serde_json::json;

    fn dispatcher() -> (HookDispatcher, Arc<ErrorLog>) {
        let log = Arc::new(ErrorLog::new());
        (HookDispatcher::new(Registry::new(log.clone())), log)
    }

    fn noop(_: &[Value]) {}

    #[test]
    fn test_add_hook_twice() {
        let (mut hooks, log) = dispatcher();
        assert!(hooks.add_hook("init").is_ok());
        assert_eq!(
            hooks.add_hook("init"),
            Err(PluginError::AlreadyDeclared("init".into()))
        );
        assert_eq!(log.errors("already_declared").len(), 1);
    }

    #[test]
    fn test_add_hooks_attempts_every_name() {
        let (mut hooks, _log) = dispatcher();
        hooks.add_hook("b").expect("declare");

        let err = hooks.add_hooks(["a", "b", "c"]).expect_err("b collides");
        assert_eq!(err, PluginError::DeclarationFailed(vec!["b".into()]));
        assert!(hooks.hook_exists("a"));
        assert!(hooks.hook_exists("c"));
        assert_eq!(hooks.declared_hooks(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_add_hooks_empty() {
        let (mut hooks, _log) = dispatcher();
        assert_eq!(
            hooks.add_hooks(Vec::<String>::new()),
            Err(PluginError::EmptyHookList)
        );
    }

    #[test]
    fn test_attach_requires_declaration() {
        let (mut hooks, log) = dispatcher();
        assert_eq!(
            hooks.attach_to_hook("init", noop, Priority::LAST),
            Err(PluginError::NotDeclared("init".into()))
        );
        assert_eq!(log.errors("not_declared").len(), 1);

        hooks.add_hook("init").expect("declare");
        assert!(hooks.attach_to_hook("init", noop, Priority::LAST).is_ok());
        assert_eq!(hooks.action_count("init"), 1);
    }

    #[test]
    fn test_remove_undeclared_hook() {
        let (mut hooks, log) = dispatcher();
        assert_eq!(
            hooks.remove_hook("init"),
            Err(PluginError::NotDeclared("init".into()))
        );
        assert_eq!(log.codes(), vec!["not_declared"]);
    }

    #[test]
    fn test_execute_undeclared_is_identity() {
        let (mut hooks, log) = dispatcher();
        hooks.add_filter("ghost", |_: HookArgs| vec![json!("changed")], Priority::FIRST);

        let args = vec![json!(1), json!("two")];
        assert_eq!(hooks.execute("ghost", args.clone()), args);
        assert!(log.is_empty());
    }

    #[test]
    fn test_filters_run_without_actions() {
        let (mut hooks, _log) = dispatcher();
        hooks.add_hook("title").expect("declare");
        hooks.add_filter(
            "title",
            |args: HookArgs| vec![json!(format!("[{}]", args[0].as_str().unwrap_or_default()))],
            Priority::LAST,
        );

        assert_eq!(hooks.execute("title", vec![json!("home")]), vec![json!("[home]")]);
    }

    #[test]
    fn test_data_in_hooks_section_counts_as_declared() {
        let (mut hooks, log) = dispatcher();
        hooks.registry_mut().set_system_var(HOOKS_SECTION, "x", json!(1));
        hooks.registry_mut().set_system_var(HOOKS_SECTION, "x", json!(2));
        assert!(log.is_empty());

        assert!(hooks.hook_exists("x"));
        assert_eq!(hooks.action_count("x"), 0);
        assert!(hooks.attach_to_hook("x", noop, Priority::LAST).is_ok());
        assert_eq!(hooks.action_count("x"), 1);
    }

    #[test]
    fn test_set_var_rejects_malformed_filter_output() {
        let (mut hooks, log) = dispatcher();
        hooks.add_hook(SystemHook::SetVar.as_str()).expect("declare");
        hooks.add_filter(
            SystemHook::SetVar.as_str(),
            |mut args: HookArgs| {
                args.pop();
                args
            },
            Priority::LAST,
        );

        let err = hooks
            .set_var("theme", "color", json!("red"), true)
            .expect_err("malformed");
        assert_eq!(err.code(), "invalid_arguments");
        assert_eq!(log.errors("invalid_arguments").len(), 1);
        assert!(!hooks.registry().user_var_exists("theme", "color"));
    }

    #[test]
    fn test_set_system_var_without_hook_declared() {
        let (mut hooks, log) = dispatcher();
        hooks
            .set_system_var("site", "title", json!("Gallery"))
            .expect("write");
        hooks
            .set_system_var("site", "title", json!("Photos"))
            .expect("rewrite still succeeds");

        assert_eq!(log.errors("already_set").len(), 1);
        assert_eq!(
            hooks
                .registry()
                .get_system_var("site", "title")
                .and_then(SystemValue::as_data),
            Some(&json!("Photos"))
        );
    }
}
