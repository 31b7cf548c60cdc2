//! API routes configuration.
//!
//! - `GET /ask` — translate a natural-language question to SQL and execute it
//! - `GET /healthcheck` — liveness probe

use crate::handlers;
use actix_web::{web, HttpResponse};
use serde_json::json;

/// Configure all HTTP routes for the AskDB API.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/ask", web::get().to(handlers::ask))
        .route("/healthcheck", web::get().to(healthcheck_handler));
}

async fn healthcheck_handler() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
