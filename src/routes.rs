//! HTTP route registration for the AskDB server.
//!
//! Wires the Actix-Web application to the shared `askdb-api` route
//! configuration so the server keeps its entrypoint lightweight.

use actix_web::web;

/// Register all HTTP routes for the server.
pub fn configure(cfg: &mut web::ServiceConfig) {
    askdb_api::routes::configure_routes(cfg);
}
