//! In-memory error log.
//!
//! [`ErrorLog`] is the default [`ErrorReporter`]. It keeps every diagnostic
//! in the order it was reported and lets callers query them by code. Each
//! instance is independent: the request context owns the shared log, and a
//! plugin may keep its own log for errors that concern only itself.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::traits::ErrorReporter;

/// A single recorded diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Grouping code, e.g. `"not_found"`.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// When the diagnostic was recorded.
    pub timestamp: DateTime<Utc>,
}

/// Ordered collection of diagnostics.
#[derive(Debug, Default)]
pub struct ErrorLog {
    entries: Mutex<Vec<Diagnostic>>,
    /// Also emit each diagnostic as a `warn` event.
    echo: bool,
}

impl ErrorLog {
    /// Creates an empty log that records silently.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty log, echoing entries to the tracing output when `echo` is set.
    pub fn with_echo(echo: bool) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            echo,
        }
    }

    /// Appends a diagnostic.
    pub fn add(&self, code: &str, message: &str) {
        if self.echo {
            warn!(code = %code, "{message}");
        } else {
            trace!(code = %code, "{message}");
        }

        self.entries.lock().push(Diagnostic {
            code: code.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
        });
    }

    /// Returns the messages recorded under `code`, oldest first.
    pub fn errors(&self, code: &str) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .filter(|d| d.code == code)
            .map(|d| d.message.clone())
            .collect()
    }

    /// Returns every code that has at least one entry, sorted.
    pub fn codes(&self) -> Vec<String> {
        self.grouped().into_keys().collect()
    }

    /// Returns all messages grouped by code.
    pub fn grouped(&self) -> BTreeMap<String, Vec<String>> {
        let entries = self.entries.lock();
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for d in entries.iter() {
            grouped
                .entry(d.code.clone())
                .or_default()
                .push(d.message.clone());
        }
        grouped
    }

    /// Returns a copy of every diagnostic in report order.
    pub fn all(&self) -> Vec<Diagnostic> {
        self.entries.lock().clone()
    }

    /// Returns the number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drops every recorded diagnostic.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl ErrorReporter for ErrorLog {
    fn report(&self, code: &str, message: &str) {
        self.add(code, message);
    }
}
