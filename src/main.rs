//! AskDB server entrypoint.
//!
//! The heavy lifting (state construction, middleware wiring, HTTP serving)
//! lives in dedicated modules so this file remains a thin orchestrator.

use anyhow::Result;
use askdb_server::config::ServerConfig;
use askdb_server::{lifecycle, logging};
use log::info;

const CONFIG_PATH: &str = "config.toml";

#[actix_web::main]
async fn main() -> Result<()> {
    // Load configuration (fallback to defaults when the config file is missing)
    let config = match ServerConfig::load_or_default(CONFIG_PATH) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("FATAL: failed to load {}: {}", CONFIG_PATH, e);
            std::process::exit(1);
        }
    };

    // Logging before any other side effects
    let server_log_path = format!("{}/server.log", config.logging.logs_path);
    logging::init_logging(
        &config.logging.level,
        &server_log_path,
        config.logging.log_to_console,
        &config.logging.format,
    )?;

    info!("AskDB server v{}", env!("CARGO_PKG_VERSION"));
    info!("Host: {}  Port: {}", config.server.host, config.server.port);

    let state = lifecycle::bootstrap(&config)?;
    lifecycle::run(&config, state).await
}
