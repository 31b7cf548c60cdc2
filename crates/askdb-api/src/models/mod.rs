//! Response models for the AskDB HTTP API.

mod ask_response;
mod error_response;

pub use ask_response::AskResponse;
pub use error_response::ErrorResponse;
