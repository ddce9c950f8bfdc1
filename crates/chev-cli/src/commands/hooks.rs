//! Hook listing CLI command.

use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use chev_core::result::AppResult;

/// One declared hook
#[derive(Debug, Serialize, Tabled)]
pub struct HookRow {
    /// Hook name
    #[tabled(rename = "Hook")]
    pub name: String,
    /// Attached actions
    #[tabled(rename = "Actions")]
    pub actions: usize,
    /// Stored filters
    #[tabled(rename = "Filters")]
    pub filters: usize,
}

/// Execute the hooks command
pub fn execute(config_path: &str, format: OutputFormat) -> AppResult<()> {
    let ctx = super::bootstrap(config_path)?;
    let hooks = ctx.hooks();

    let rows: Vec<HookRow> = hooks
        .declared_hooks()
        .into_iter()
        .map(|name| HookRow {
            name: name.to_string(),
            actions: hooks.action_count(name),
            filters: hooks.filter_count(name),
        })
        .collect();

    output::print_list(&rows, format);
    Ok(())
}
