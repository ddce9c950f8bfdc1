//! Chevereto request entry point.
//!
//! Bootstraps one request context, routes the CGI `QUERY_STRING` through the
//! `parse_url` hook, and prints the resulting query variables as JSON.

use tracing_subscriber::{EnvFilter, fmt};

use chev_core::config::AppConfig;
use chev_core::error::AppError;
use chev_core::result::AppResult;
use chev_plugin::RequestContext;

fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(&config) {
        tracing::error!("Request failed: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> AppResult<AppConfig> {
    let config_path =
        std::env::var("CHEV_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());

    AppConfig::load(&config_path)
        .map_err(|e| AppError::configuration(format!("Config load error: {}", e)))
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

/// Handle a single request
fn run(config: &AppConfig) -> AppResult<()> {
    let mut ctx = RequestContext::bootstrap(config);

    let span = tracing::info_span!("request", id = %ctx.id());
    let _guard = span.enter();

    tracing::info!("Handling request for {}", config.site.name);

    let query = std::env::var("QUERY_STRING").unwrap_or_default();
    let vars = ctx.route(&query);
    println!("{}", serde_json::to_string_pretty(vars)?);

    tracing::debug!(registry = %ctx.registry().dump(), "Registry dump");
    if !ctx.errors().is_empty() {
        tracing::debug!(diagnostics = ctx.errors().len(), "Request recorded diagnostics");
    }

    Ok(())
}
