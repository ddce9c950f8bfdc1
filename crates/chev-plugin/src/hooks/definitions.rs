//! Built-in hook names, the argument list type, and callback priorities.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PluginError;

/// Ordered argument list passed through a hook.
///
/// Filters receive the whole list and return a whole replacement list.
pub type HookArgs = Vec<Value>;

/// Hooks the framework declares at bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemHook {
    /// Fired by the router with `[query]` after the query string is parsed.
    ParseUrl,
    /// Fired before a user variable write with `[namespace, key, value, overridable]`.
    SetVar,
    /// Fired before a system variable write with `[section, item, value]`.
    SetSystemVar,
}

impl SystemHook {
    /// Every built-in hook, in declaration order.
    pub const ALL: [SystemHook; 3] = [Self::ParseUrl, Self::SetVar, Self::SetSystemVar];

    /// Returns the string name of this hook.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ParseUrl => "parse_url",
            Self::SetVar => "set_var",
            Self::SetSystemVar => "set_system_var",
        }
    }
}

impl std::fmt::Display for SystemHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AsRef<str> for SystemHook {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Execution rank of a callback: 1 runs first, 10 runs last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Priority(u8);

impl Priority {
    /// Lowest accepted value.
    pub const MIN: u8 = 1;
    /// Highest accepted value.
    pub const MAX: u8 = 10;

    /// Runs before everything else.
    pub const FIRST: Priority = Priority(Self::MIN);
    /// Runs after everything else. Used when no priority is given.
    pub const LAST: Priority = Priority(Self::MAX);

    /// Builds a priority, rejecting values outside `1..=10`.
    pub fn new(value: i64) -> Result<Self, PluginError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(PluginError::InvalidPriority(value))
        }
    }

    /// Returns the numeric rank.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::LAST
    }
}

impl TryFrom<i64> for Priority {
    type Error = PluginError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_bounds() {
        assert_eq!(Priority::new(1).map(Priority::get), Ok(1));
        assert_eq!(Priority::new(10).map(Priority::get), Ok(10));
        assert_eq!(Priority::new(0), Err(PluginError::InvalidPriority(0)));
        assert_eq!(Priority::new(11), Err(PluginError::InvalidPriority(11)));
        assert_eq!(Priority::new(-3), Err(PluginError::InvalidPriority(-3)));
    }

    #[test]
    fn test_default_priority_is_last() {
        assert_eq!(Priority::default(), Priority::LAST);
        assert!(Priority::FIRST < Priority::LAST);
    }

    #[test]
    fn test_priority_serde_rejects_out_of_range() {
        let p: Priority = serde_json::from_str("5").expect("in range");
        assert_eq!(p.get(), 5);
        assert!(serde_json::from_str::<Priority>("42").is_err());
    }

    #[test]
    fn test_system_hook_names() {
        let names: Vec<&str> = SystemHook::ALL.iter().map(SystemHook::as_str).collect();
        assert_eq!(names, vec!["parse_url", "set_var", "set_system_var"]);
        assert_eq!(SystemHook::SetVar.to_string(), "set_var");
    }
}
