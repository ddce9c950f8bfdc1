//! Registry dump CLI command.

use clap::Args;

use chev_core::result::AppResult;

/// Arguments for the dump command
#[derive(Debug, Args)]
pub struct DumpArgs {
    /// Route this query string before dumping
    #[arg(short, long)]
    pub query: Option<String>,
}

/// Execute the dump command
pub fn execute(args: &DumpArgs, config_path: &str) -> AppResult<()> {
    let mut ctx = super::bootstrap(config_path)?;

    if let Some(query) = &args.query {
        ctx.route(query);
    }

    println!("{}", serde_json::to_string_pretty(&ctx.registry().dump())?);
    Ok(())
}
