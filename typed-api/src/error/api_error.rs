//! Top-level API error type.

use super::{ConfigError, ParameterError, TransportError, ValidationError};
use thiserror::Error;

/// Top-level error type for all typed API operations.
///
/// Each variant corresponds to the phase in which the failure happened, so
/// callers can tell a misconfigured schema from a bad argument or a failed
/// network call.
///
/// ## Examples
///
/// ```rust,ignore
/// use typed_api::ApiError;
///
/// fn handle_error(err: ApiError) {
///     match err {
///         ApiError::Config(e) => eprintln!("Schema misuse: {e}"),
///         ApiError::Parameter(e) => eprintln!("Bad arguments: {e}"),
///         ApiError::Transport(e) => eprintln!("Request failed: {e}"),
///         ApiError::Validation(e) => eprintln!("Unexpected response: {e}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// Unknown route or method, or an invalid schema/transport setup.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Path parameters, query or body do not fit the endpoint descriptor.
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// The transport failed; the original error is preserved inside.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The transport's response does not deserialize into the response type.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ApiError {
    /// Returns the transport error if this failure came from the transport.
    pub fn as_transport(&self) -> Option<&TransportError> {
        match self {
            Self::Transport(e) => Some(e),
            _ => None,
        }
    }

    /// Returns `true` if the failure happened before any network I/O.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Parameter(_))
    }
}
