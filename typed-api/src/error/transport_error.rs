//! Errors surfaced by a transport.

use std::error::Error as StdError;
use std::fmt;

/// The error a [`Transport`](crate::transport::Transport) failed with.
///
/// The original error value is kept as-is so callers can downcast to the
/// concrete type their transport produces. `Display` and `source` delegate
/// to it without adding context.
pub struct TransportError(Box<dyn StdError + Send + Sync + 'static>);

impl TransportError {
    /// Wraps any error produced by a transport.
    pub fn new<E>(error: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        Self(error.into())
    }

    /// Creates a transport error from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self(message.into())
    }

    /// Returns a reference to the original error if it is of type `E`.
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }

    /// Returns the original error.
    pub fn into_inner(self) -> Box<dyn StdError + Send + Sync + 'static> {
        self.0
    }
}

impl fmt::Debug for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl StdError for TransportError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<super::ClientError> for TransportError {
    fn from(error: super::ClientError) -> Self {
        Self::new(error)
    }
}

impl From<super::ValidationError> for TransportError {
    fn from(error: super::ValidationError) -> Self {
        Self::new(error)
    }
}
