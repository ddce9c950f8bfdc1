//! Diagnostic sink trait.

/// Fire-and-forget sink for non-fatal diagnostics.
///
/// The hook engine and the variable registry call this on every collision
/// or lookup miss. Nothing is returned; a reporter must never fail the
/// operation that reported to it.
pub trait ErrorReporter: Send + Sync + std::fmt::Debug {
    /// Records one diagnostic under a grouping `code`.
    fn report(&self, code: &str, message: &str);
}
