//! Query routing CLI command.

use clap::Args;

use crate::output::{self, OutputFormat};
use chev_core::result::AppResult;

/// Arguments for the route command
#[derive(Debug, Args)]
pub struct RouteArgs {
    /// Query string to parse, e.g. `page=view&id=3`
    pub query: String,
}

/// Execute the route command
pub fn execute(args: &RouteArgs, config_path: &str, format: OutputFormat) -> AppResult<()> {
    let mut ctx = super::bootstrap(config_path)?;

    let vars = ctx.route(&args.query);
    output::print_item(vars, format);

    output::print_diagnostics(&ctx.errors().all());
    Ok(())
}
