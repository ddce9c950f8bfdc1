//! Request query parsing and the `parse_url` hook.

use serde_json::{Map, Value};
use tracing::debug;
use url::form_urlencoded;

use crate::error::PluginError;
use crate::hooks::{HookDispatcher, SystemHook};

/// Parsed query variables of one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Router {
    query_vars: Map<String, Value>,
}

impl Router {
    /// Parses `query_string`, passes the result through the `parse_url`
    /// hook, and keeps whatever the filters return.
    ///
    /// Filters receive `[query]` and must return `[query]` with `query` a
    /// JSON object. Anything else is reported as
    /// [`PluginError::InvalidArguments`] and the unfiltered query is kept.
    pub fn load(hooks: &HookDispatcher, query_string: &str) -> Self {
        let parsed = parse_query(query_string);
        let hook = SystemHook::ParseUrl.as_str();

        let mut args = hooks.execute(hook, vec![Value::Object(parsed.clone())]);
        let query_vars = match (args.len(), args.pop()) {
            (1, Some(Value::Object(vars))) => vars,
            _ => {
                hooks.registry().report(&PluginError::InvalidArguments {
                    hook: hook.to_string(),
                    reason: "expected [query: object]".to_string(),
                });
                parsed
            }
        };

        debug!(count = query_vars.len(), "Query variables parsed");
        Self { query_vars }
    }

    /// Returns every query variable.
    pub fn query_vars(&self) -> &Map<String, Value> {
        &self.query_vars
    }
}

/// Parses an `application/x-www-form-urlencoded` query into a JSON object.
///
/// - A leading `?` is ignored, as are pairs with an empty key.
/// - A repeated plain key keeps its last value.
/// - `key[]=v` appends `v` to the array `key`.
/// - `key[sub]=v` sets `sub` in the object `key`.
///
/// Only one bracket level is understood; anything deeper is kept as a
/// literal key. Every value is a string.
pub fn parse_query(query: &str) -> Map<String, Value> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut vars = Map::new();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if key.is_empty() {
            continue;
        }
        let value = Value::String(value.into_owned());

        match split_key(&key) {
            (name, None) => {
                vars.insert(name.to_string(), value);
            }
            (name, Some("")) => {
                let slot = vars
                    .entry(name.to_string())
                    .or_insert_with(|| Value::Array(Vec::new()));
                if !slot.is_array() {
                    *slot = Value::Array(Vec::new());
                }
                if let Value::Array(items) = slot {
                    items.push(value);
                }
            }
            (name, Some(sub)) => {
                let slot = vars
                    .entry(name.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
                if !slot.is_object() {
                    *slot = Value::Object(Map::new());
                }
                if let Value::Object(fields) = slot {
                    fields.insert(sub.to_string(), value);
                }
            }
        }
    }

    vars
}

/// Splits `name[sub]` into `("name", Some("sub"))`.
fn split_key(key: &str) -> (&str, Option<&str>) {
    if let Some(open) = key.find('[') {
        let inner = key[open + 1..].strip_suffix(']');
        if let Some(inner) = inner {
            if open > 0 && !inner.contains(['[', ']']) {
                return (&key[..open], Some(inner));
            }
        }
    }
    (key, None)
}
