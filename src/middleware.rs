//! Server-wide middleware constructors.
//!
//! Keeps the Actix application setup focused by providing reusable
//! constructors for the CORS and request-logging layers.

use actix_cors::Cors;
use actix_web::middleware::Logger;

/// Permissive CORS: the service is a read-only query endpoint intended to be
/// called from scripts and notebooks, so any origin may issue GETs.
pub fn permissive_cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

/// Standard request/response logger.
pub fn request_logger() -> Logger {
    Logger::default()
}
