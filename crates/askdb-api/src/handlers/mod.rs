//! Request handlers.

pub mod ask;

pub use ask::ask;
