//! Namespaced variable store.
//!
//! The registry holds two independent maps:
//!
//! - **system** variables, keyed by `(section, item)`, owned by the framework.
//!   The hook engine keeps its tables here under the `hooks` and `filters`
//!   sections.
//! - **user** variables, keyed by `(namespace, key)`, owned by plugins and
//!   themes. Each entry carries an `overridable` flag set by its last writer.
//!
//! Every miss and collision is reported to the [`ErrorReporter`]. Nothing
//! here is fatal.
//!
//! The registry itself never fires hooks. The hooked write paths
//! (`set_var`, `set_system_var`) live on
//! [`HookDispatcher`](crate::hooks::HookDispatcher), which owns the registry.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::trace;

use chev_core::ErrorReporter;

use crate::error::PluginError;
use crate::hooks::registry::{ActionList, FilterList};

/// System section holding the action list of every declared hook.
pub const HOOKS_SECTION: &str = "hooks";

/// System section holding filter lists, keyed by hook name.
pub const FILTERS_SECTION: &str = "filters";

/// Value stored in a system variable.
#[derive(Debug, Clone)]
pub enum SystemValue {
    /// Plain data.
    Data(Value),
    /// Actions attached to a declared hook.
    Actions(ActionList),
    /// Filters attached to a hook name.
    Filters(FilterList),
}

impl SystemValue {
    /// Returns the data if this is a plain value.
    pub fn as_data(&self) -> Option<&Value> {
        match self {
            Self::Data(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the action list if this holds one.
    pub fn as_actions(&self) -> Option<&ActionList> {
        match self {
            Self::Actions(list) => Some(list),
            _ => None,
        }
    }

    /// Returns the filter list if this holds one.
    pub fn as_filters(&self) -> Option<&FilterList> {
        match self {
            Self::Filters(list) => Some(list),
            _ => None,
        }
    }

    /// JSON view used by [`Registry::dump`]. Callback lists become
    /// per-priority counts.
    fn snapshot(&self) -> Value {
        match self {
            Self::Data(v) => v.clone(),
            Self::Actions(list) => json!({ "actions": list.counts_by_priority() }),
            Self::Filters(list) => json!({ "filters": list.counts_by_priority() }),
        }
    }
}

impl From<Value> for SystemValue {
    fn from(value: Value) -> Self {
        Self::Data(value)
    }
}

/// A plugin- or theme-owned variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserVar {
    /// The stored value.
    pub value: Value,
    /// Whether a later write may replace it.
    pub overridable: bool,
}

/// Request-scoped variable store.
#[derive(Debug)]
pub struct Registry {
    /// Section → item → value.
    system: BTreeMap<String, BTreeMap<String, SystemValue>>,
    /// Namespace → key → variable.
    user: BTreeMap<String, BTreeMap<String, UserVar>>,
    /// Sink for misses and collisions.
    reporter: Arc<dyn ErrorReporter>,
}

impl Registry {
    /// Creates an empty registry reporting to `reporter`.
    pub fn new(reporter: Arc<dyn ErrorReporter>) -> Self {
        Self {
            system: BTreeMap::new(),
            user: BTreeMap::new(),
            reporter,
        }
    }

    /// Reports `err` and returns it as the failure of the calling operation.
    pub(crate) fn fail<T>(&self, err: PluginError) -> Result<T, PluginError> {
        self.report(&err);
        Err(err)
    }

    /// Reports `err` without failing.
    pub(crate) fn report(&self, err: &PluginError) {
        self.reporter.report(err.code(), &err.to_string());
    }

    // ── User variables ──

    /// Stores a user variable.
    ///
    /// Fails with [`PluginError::NotOverridable`] if the existing entry was
    /// written with `overridable = false`. On success the flag is replaced
    /// by this call's flag.
    pub fn set_user_var(
        &mut self,
        namespace: &str,
        key: &str,
        value: Value,
        overridable: bool,
    ) -> Result<(), PluginError> {
        let locked = self
            .user
            .get(namespace)
            .and_then(|vars| vars.get(key))
            .is_some_and(|var| !var.overridable);

        if locked {
            return self.fail(PluginError::NotOverridable {
                namespace: namespace.to_string(),
                key: key.to_string(),
            });
        }

        trace!(namespace = %namespace, key = %key, overridable, "Setting user variable");

        self.user
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), UserVar { value, overridable });
        Ok(())
    }

    /// Returns a user variable, reporting a miss.
    pub fn get_user_var(&self, namespace: &str, key: &str) -> Option<&Value> {
        match self.user.get(namespace).and_then(|vars| vars.get(key)) {
            Some(var) => Some(&var.value),
            None => {
                self.report(&PluginError::UserVarNotSet {
                    namespace: namespace.to_string(),
                    key: key.to_string(),
                });
                None
            }
        }
    }

    /// Returns the full entry of a user variable, without reporting a miss.
    pub fn user_var(&self, namespace: &str, key: &str) -> Option<&UserVar> {
        self.user.get(namespace).and_then(|vars| vars.get(key))
    }

    /// Silent existence check for a user variable.
    pub fn user_var_exists(&self, namespace: &str, key: &str) -> bool {
        self.user_var(namespace, key).is_some()
    }

    /// Removes a user variable and returns its value.
    pub fn remove_user_var(&mut self, namespace: &str, key: &str) -> Result<Value, PluginError> {
        let removed = self.user.get_mut(namespace).and_then(|vars| vars.remove(key));

        match removed {
            Some(var) => {
                if self.user.get(namespace).is_some_and(BTreeMap::is_empty) {
                    self.user.remove(namespace);
                }
                Ok(var.value)
            }
            None => self.fail(PluginError::UserVarNotSet {
                namespace: namespace.to_string(),
                key: key.to_string(),
            }),
        }
    }

    // ── System variables ──

    /// Stores a system variable, replacing any previous value.
    ///
    /// Replacing an existing item reports [`PluginError::AlreadySet`],
    /// except in the [`HOOKS_SECTION`] where rewriting a hook's action list
    /// is routine. The write happens either way.
    pub fn set_system_var(&mut self, section: &str, item: &str, value: impl Into<SystemValue>) {
        if section != HOOKS_SECTION && self.system_var_exists(section, item) {
            self.report(&PluginError::AlreadySet {
                section: section.to_string(),
                item: item.to_string(),
            });
        }

        trace!(section = %section, item = %item, "Setting system variable");

        self.system
            .entry(section.to_string())
            .or_default()
            .insert(item.to_string(), value.into());
    }

    /// Returns a system variable, reporting a miss.
    pub fn get_system_var(&self, section: &str, item: &str) -> Option<&SystemValue> {
        let value = self.system_var(section, item);
        if value.is_none() {
            self.report(&PluginError::SystemVarNotSet {
                section: section.to_string(),
                item: item.to_string(),
            });
        }
        value
    }

    /// Returns a system variable without reporting a miss.
    pub(crate) fn system_var(&self, section: &str, item: &str) -> Option<&SystemValue> {
        self.system.get(section).and_then(|items| items.get(item))
    }

    /// Mutable access to a system variable without reporting a miss.
    pub(crate) fn system_var_mut(&mut self, section: &str, item: &str) -> Option<&mut SystemValue> {
        self.system.get_mut(section).and_then(|items| items.get_mut(item))
    }

    /// Silent existence check for a system variable.
    pub fn system_var_exists(&self, section: &str, item: &str) -> bool {
        self.system_var(section, item).is_some()
    }

    /// Removes a system variable and returns it.
    pub fn remove_system_var(&mut self, section: &str, item: &str) -> Result<SystemValue, PluginError> {
        let removed = self.system.get_mut(section).and_then(|items| items.remove(item));

        match removed {
            Some(value) => {
                if self.system.get(section).is_some_and(BTreeMap::is_empty) {
                    self.system.remove(section);
                }
                Ok(value)
            }
            None => self.fail(PluginError::SystemVarNotSet {
                section: section.to_string(),
                item: item.to_string(),
            }),
        }
    }

    /// Returns the item names of a system section, sorted.
    pub fn section_items(&self, section: &str) -> Vec<&str> {
        self.system
            .get(section)
            .map(|items| items.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// JSON snapshot of every variable, for debugging.
    pub fn dump(&self) -> Value {
        let system: BTreeMap<&str, BTreeMap<&str, Value>> = self
            .system
            .iter()
            .map(|(section, items)| {
                let items = items
                    .iter()
                    .map(|(item, value)| (item.as_str(), value.snapshot()))
                    .collect();
                (section.as_str(), items)
            })
            .collect();

        json!({ "system": system, "user": self.user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chev_core::ErrorLog;

    fn registry() -> (Registry, Arc<ErrorLog>) {
        let log = Arc::new(ErrorLog::new());
        (Registry::new(log.clone()), log)
    }

    #[test]
    fn test_non_overridable_keeps_first_value() {
        let (mut reg, log) = registry();
        reg.set_user_var("theme", "color", json!("red"), false)
            .expect("first write");

        let err = reg
            .set_user_var("theme", "color", json!("blue"), true)
            .expect_err("locked");
        assert_eq!(err.code(), "not_overridable");
        assert_eq!(reg.get_user_var("theme", "color"), Some(&json!("red")));
        assert_eq!(log.errors("not_overridable").len(), 1);
    }

    #[test]
    fn test_overridable_flag_follows_last_write() {
        let (mut reg, _log) = registry();
        reg.set_user_var("theme", "color", json!("red"), true)
            .expect("first write");
        reg.set_user_var("theme", "color", json!("green"), false)
            .expect("overridable");

        assert!(
            reg.set_user_var("theme", "color", json!("blue"), true)
                .is_err()
        );
        assert_eq!(
            reg.user_var("theme", "color"),
            Some(&UserVar {
                value: json!("green"),
                overridable: false,
            })
        );
    }

    #[test]
    fn test_user_var_miss_is_reported() {
        let (reg, log) = registry();
        assert_eq!(reg.get_user_var("theme", "missing"), None);
        assert_eq!(log.codes(), vec!["not_found"]);

        assert!(!reg.user_var_exists("theme", "missing"));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_remove_user_var() {
        let (mut reg, log) = registry();
        reg.set_user_var("gallery", "per_page", json!(20), true)
            .expect("write");

        assert_eq!(reg.remove_user_var("gallery", "per_page"), Ok(json!(20)));
        assert!(!reg.user_var_exists("gallery", "per_page"));
        assert!(log.is_empty());

        assert!(reg.remove_user_var("gallery", "per_page").is_err());
        assert_eq!(log.errors("not_found").len(), 1);
    }

    #[test]
    fn test_hooks_section_rewrite_is_silent() {
        let (mut reg, log) = registry();
        reg.set_system_var(HOOKS_SECTION, "x", json!(1));
        reg.set_system_var(HOOKS_SECTION, "x", json!(2));

        assert!(log.is_empty());
        assert_eq!(
            reg.get_system_var(HOOKS_SECTION, "x").and_then(SystemValue::as_data),
            Some(&json!(2))
        );
    }

    #[test]
    fn test_other_section_rewrite_reports_already_set() {
        let (mut reg, log) = registry();
        reg.set_system_var("cache", "x", json!(1));
        reg.set_system_var("cache", "x", json!(2));

        assert_eq!(log.errors("already_set").len(), 1);
        assert_eq!(
            reg.get_system_var("cache", "x").and_then(SystemValue::as_data),
            Some(&json!(2))
        );
    }

    #[test]
    fn test_system_var_lookup_and_existence_check() {
        let (mut reg, log) = registry();
        assert!(!reg.system_var_exists("query", "page"));
        assert!(log.is_empty());

        assert!(reg.get_system_var("query", "page").is_none());
        assert_eq!(log.errors("not_found").len(), 1);

        reg.set_system_var("query", "page", json!("home"));
        assert!(reg.system_var_exists("query", "page"));
    }

    #[test]
    fn test_remove_system_var() {
        let (mut reg, log) = registry();
        reg.set_system_var("query", "page", json!("home"));

        let removed = reg.remove_system_var("query", "page").expect("present");
        assert_eq!(removed.as_data(), Some(&json!("home")));
        assert!(reg.section_items("query").is_empty());

        assert!(reg.remove_system_var("query", "page").is_err());
        assert_eq!(log.errors("not_found").len(), 1);
    }

    #[test]
    fn test_dump_shape() {
        let (mut reg, _log) = registry();
        reg.set_system_var("site", "title", json!("Gallery"));
        reg.set_system_var(HOOKS_SECTION, "init", SystemValue::Actions(ActionList::new()));
        reg.set_user_var("theme", "color", json!("red"), false)
            .expect("write");

        let dump = reg.dump();
        assert_eq!(dump["system"]["site"]["title"], json!("Gallery"));
        assert_eq!(dump["system"]["hooks"]["init"], json!({ "actions": {} }));
        assert_eq!(
            dump["user"]["theme"]["color"],
            json!({ "value": "red", "overridable": false })
        );
    }
}
