//! AskDB server library: configuration, logging, middleware, lifecycle,
//! and route wiring for the HTTP binary.

pub mod config;
pub mod lifecycle;
pub mod logging;
pub mod middleware;
pub mod routes;
