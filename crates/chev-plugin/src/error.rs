//! Errors raised by the registry and the hook engine.
//!
//! None of these are fatal. The failing operation returns the error and,
//! at the point of failure, reports it to the registry's
//! [`ErrorReporter`](chev_core::ErrorReporter) under [`PluginError::code`].

use thiserror::Error;

use chev_core::error::{AppError, ErrorKind};

/// Failure of a registry or dispatcher operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PluginError {
    /// `add_hook` on a name that is already declared.
    #[error("The hook `{0}` has already been defined")]
    AlreadyDeclared(String),

    /// Attaching to, or removing, a hook that was never declared.
    #[error("The hook `{0}` does not exist")]
    NotDeclared(String),

    /// Writing a user variable whose last write marked it non-overridable.
    #[error("The value `{key}` in `{namespace}` has already been set and isn't overridable")]
    NotOverridable {
        /// Plugin or theme namespace.
        namespace: String,
        /// Variable key.
        key: String,
    },

    /// Lookup or removal of a missing user variable.
    #[error("The user variable `{namespace}` => `{key}` is not set")]
    UserVarNotSet {
        /// Plugin or theme namespace.
        namespace: String,
        /// Variable key.
        key: String,
    },

    /// Lookup or removal of a missing system variable.
    #[error("The system variable `{section}` => `{item}` is not set")]
    SystemVarNotSet {
        /// System section.
        section: String,
        /// Item within the section.
        item: String,
    },

    /// A system variable was replaced outside the `hooks` section.
    #[error("The system variable `{section}` => `{item}` is already set")]
    AlreadySet {
        /// System section.
        section: String,
        /// Item within the section.
        item: String,
    },

    /// Priority outside `1..=10`.
    #[error("Priority {0} is out of range, expected 1 to 10")]
    InvalidPriority(i64),

    /// A filter returned an argument list the caller cannot use.
    #[error("Filters on hook `{hook}` returned unusable arguments: {reason}")]
    InvalidArguments {
        /// Hook whose filters produced the arguments.
        hook: String,
        /// What was wrong with them.
        reason: String,
    },

    /// `add_hooks` where at least one declaration failed.
    #[error("Failed to declare hooks: {}", .0.join(", "))]
    DeclarationFailed(Vec<String>),

    /// `add_hooks` with nothing to declare.
    #[error("No hook names were given")]
    EmptyHookList,

    /// Loading a plugin whose id is already loaded.
    #[error("Plugin `{0}` is already loaded")]
    AlreadyLoaded(String),
}

impl PluginError {
    /// Stable diagnostic code used when reporting this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::AlreadyDeclared(_) => "already_declared",
            Self::NotDeclared(_) => "not_declared",
            Self::NotOverridable { .. } => "not_overridable",
            Self::UserVarNotSet { .. } | Self::SystemVarNotSet { .. } => "not_found",
            Self::AlreadySet { .. } => "already_set",
            Self::InvalidPriority(_) => "invalid_priority",
            Self::InvalidArguments { .. } => "invalid_arguments",
            Self::DeclarationFailed(_) => "declaration_failed",
            Self::EmptyHookList => "empty_hook_list",
            Self::AlreadyLoaded(_) => "already_loaded",
        }
    }

    /// Application-level category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AlreadyDeclared(_)
            | Self::NotOverridable { .. }
            | Self::AlreadySet { .. }
            | Self::AlreadyLoaded(_) => ErrorKind::Conflict,
            Self::NotDeclared(_) | Self::UserVarNotSet { .. } | Self::SystemVarNotSet { .. } => {
                ErrorKind::NotFound
            }
            Self::InvalidPriority(_) | Self::EmptyHookList => ErrorKind::Validation,
            Self::InvalidArguments { .. } | Self::DeclarationFailed(_) => ErrorKind::Plugin,
        }
    }
}

impl From<PluginError> for AppError {
    fn from(err: PluginError) -> Self {
        AppError::new(err.kind(), err.to_string())
    }
}
