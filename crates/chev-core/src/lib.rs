//! # chev-core
//!
//! Core crate for the Chevereto bootstrap. Contains configuration schemas,
//! the diagnostic reporter trait with its in-memory error log, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other Chevereto crates.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod result;
pub mod traits;

pub use diagnostics::{Diagnostic, ErrorLog};
pub use error::AppError;
pub use result::AppResult;
pub use traits::ErrorReporter;
