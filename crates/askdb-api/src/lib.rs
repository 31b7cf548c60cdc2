//! HTTP surface for AskDB: route registration, request handlers, and
//! response models.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;

pub use state::AppState;
