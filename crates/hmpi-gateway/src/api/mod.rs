//! HTTP API surface: handlers, response envelopes and error rendering.

pub mod error;
pub mod handlers;
pub mod response;

pub use error::ApiError;
