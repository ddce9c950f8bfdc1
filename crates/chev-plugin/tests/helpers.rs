//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use chev_core::config::AppConfig;
use chev_plugin::RequestContext;

/// Records which callbacks ran, in order.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an action that records `label` each time it runs.
    pub fn action(&self, label: &str) -> impl Fn(&[Value]) + Send + Sync + 'static {
        let calls = self.calls.clone();
        let label = label.to_string();
        move |_: &[Value]| calls.lock().push(label.clone())
    }

    /// Returns an action that records the arguments it observed.
    pub fn capture(&self) -> impl Fn(&[Value]) + Send + Sync + 'static {
        let calls = self.calls.clone();
        move |args: &[Value]| calls.lock().push(Value::from(args.to_vec()).to_string())
    }

    /// Returns everything recorded so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

/// Builds a bootstrapped context from the default configuration.
pub fn context() -> RequestContext {
    RequestContext::bootstrap(&AppConfig::default())
}
