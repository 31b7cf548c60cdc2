//! Server lifecycle management helpers.
//!
//! This module encapsulates the heavy lifting otherwise handled directly in
//! `main.rs`: constructing the model client and shared state, wiring the
//! HTTP server, and running it to completion.

use crate::config::ServerConfig;
use crate::{middleware, routes};
use actix_web::{web, App, HttpServer};
use anyhow::Result;
use askdb_api::AppState;
use askdb_core::llm::GeminiClient;
use askdb_core::QueryTranslator;
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Build the shared application state: resolve the API key, construct the
/// Gemini client and translator, and record the database path.
pub fn bootstrap(config: &ServerConfig) -> Result<web::Data<AppState>> {
    let api_key = config.llm.resolve_api_key()?;

    let db_path = PathBuf::from(&config.storage.db_path);
    if !db_path.exists() {
        // The database is an external, pre-populated store; a missing file
        // means every /ask request will fail with a schema-read error.
        warn!("Database file not found at {}", db_path.display());
    } else {
        info!("Using database at {}", db_path.display());
    }

    let client = GeminiClient::builder()
        .api_key(api_key)
        .model(&config.llm.model)
        .base_url(&config.llm.base_url)
        .timeout(Duration::from_secs(config.llm.timeout_seconds))
        .build()?;
    info!("Model client ready: model={}", client.model());

    let translator = QueryTranslator::new(Arc::new(client));
    Ok(web::Data::new(AppState::new(translator, db_path)))
}

/// Bind and run the HTTP server until it is shut down (ctrl-c triggers
/// actix's graceful shutdown).
pub async fn run(config: &ServerConfig, state: web::Data<AppState>) -> Result<()> {
    let bind_addr = (config.server.host.clone(), config.server.port);
    info!(
        "Starting HTTP server on {}:{} ({} workers)",
        config.server.host, config.server.port, config.server.workers
    );

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::request_logger())
            .wrap(middleware::permissive_cors())
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .workers(config.server.workers)
    .bind(bind_addr)?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}
