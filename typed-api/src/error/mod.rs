//! Layered error types for the typed API crate.
//!
//! The error hierarchy separates the phase in which a failure happens:
//! - [`ApiError`] - Top-level error type for all operations
//! - [`ConfigError`] - Schema, route and method lookups (construction time)
//! - [`ParameterError`] - Path, query and body checks (call time, before any I/O)
//! - [`TransportError`] - Whatever the injected transport failed with
//! - [`ClientError`] - HTTP failures raised by the default JSON transport
//! - [`ValidationError`] - Response bodies that do not parse or deserialize

mod api_error;
mod client_error;
mod config_error;
mod parameter_error;
mod transport_error;
mod validation_error;

pub use api_error::ApiError;
pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use parameter_error::{ParamLocation, ParameterError};
pub use transport_error::TransportError;
pub use validation_error::ValidationError;
