//! Core traits defined in `chev-core` and implemented by other crates.

pub mod reporter;

pub use reporter::ErrorReporter;
