//! Call-time argument errors.

use std::fmt;

use thiserror::Error;

/// Where a parameter was supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    /// A `:name` placeholder in the route pattern.
    Path,
    /// The query string.
    Query,
    /// The JSON request body.
    Body,
}

impl fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path => f.write_str("path parameter"),
            Self::Query => f.write_str("query parameter"),
            Self::Body => f.write_str("body field"),
        }
    }
}

/// Errors raised while turning call arguments into a URL and body.
///
/// These are returned synchronously, before the transport is invoked.
#[derive(Debug, Error)]
pub enum ParameterError {
    /// A required parameter has no value.
    #[error("Missing {location} `{name}` for {route}")]
    Missing {
        /// The parameter name.
        name: String,
        /// Where it was expected.
        location: ParamLocation,
        /// The route pattern being built.
        route: String,
    },

    /// A path parameter key that is not legal for the route.
    #[error("Unknown path parameter `{name}` for {route}")]
    UnknownPathParam {
        /// The offending key.
        name: String,
        /// The route pattern being built.
        route: String,
    },

    /// A query key that is not legal for the route (or method).
    #[error("Unknown query parameter `{name}` for {route}")]
    UnknownQueryKey {
        /// The offending key.
        name: String,
        /// The route pattern being built.
        route: String,
    },

    /// A request body field not declared by the endpoint.
    #[error("Unknown body field `{name}` for {route}")]
    UnknownBodyField {
        /// The offending key.
        name: String,
        /// The route pattern being built.
        route: String,
    },

    /// A value outside the declared domain of its key.
    #[error("Invalid value {value} for {location} `{name}`: expected {expected}")]
    InvalidValue {
        /// The parameter name.
        name: String,
        /// Where it was supplied.
        location: ParamLocation,
        /// The supplied value, JSON encoded.
        value: String,
        /// Description of the accepted domain.
        expected: String,
    },

    /// Parameters or body did not serialize to a JSON object.
    #[error("Expected {location}s to form an object, got {found}")]
    NotAnObject {
        /// Which argument was malformed.
        location: ParamLocation,
        /// The JSON kind that was supplied instead.
        found: &'static str,
    },

    /// An argument could not be serialized at all.
    #[error("Failed to serialize {location}s: {source}")]
    Serialize {
        /// Which argument failed.
        location: ParamLocation,
        /// The serializer error.
        #[source]
        source: serde_json::Error,
    },
}

impl ParameterError {
    /// Returns `true` if this is a missing parameter error.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }

    /// Returns `true` if a key was supplied that the endpoint does not declare.
    pub fn is_unknown_key(&self) -> bool {
        matches!(
            self,
            Self::UnknownPathParam { .. }
                | Self::UnknownQueryKey { .. }
                | Self::UnknownBodyField { .. }
        )
    }

    /// Returns the name of the offending parameter, if there is one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Missing { name, .. }
            | Self::UnknownPathParam { name, .. }
            | Self::UnknownQueryKey { name, .. }
            | Self::UnknownBodyField { name, .. }
            | Self::InvalidValue { name, .. } => Some(name),
            Self::NotAnObject { .. } | Self::Serialize { .. } => None,
        }
    }
}
