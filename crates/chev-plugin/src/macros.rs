//! Convenience macros for hook callers.

/// Builds a [`HookArgs`](crate::hooks::HookArgs) list, converting each item
/// with `serde_json::json!`.
///
/// # Example
/// ```rust
/// use chev_plugin::hook_args;
///
/// let args = hook_args!["theme", "color", 3, true];
/// assert_eq!(args.len(), 4);
/// assert_eq!(args[2], 3);
/// ```
#[macro_export]
macro_rules! hook_args {
    () => {
        $crate::hooks::HookArgs::new()
    };
    ($($value:expr),+ $(,)?) => {{
        let args: $crate::hooks::HookArgs = vec![$($crate::__private::json!($value)),+];
        args
    }};
}
