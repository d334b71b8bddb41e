//! Schema and configuration errors.

use thiserror::Error;

use crate::endpoint_id::EndpointIdError;
use crate::method::RestMethod;

/// Errors in the route schema or in how it is being used.
///
/// These errors occur at construction time, when a schema is built or when a
/// URL builder or request function is created for a route. They indicate
/// programmer errors and are never retried.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The route is not a key of the schema.
    #[error("Unknown route: {route}")]
    UnknownRoute {
        /// The route pattern that was requested.
        route: String,
    },

    /// The route exists but does not declare the method.
    #[error("Method {method} is not declared for route {route}")]
    UnknownMethod {
        /// The route pattern that was requested.
        route: String,
        /// The undeclared method.
        method: RestMethod,
    },

    /// Route pattern contains invalid placeholder syntax.
    #[error("Invalid path template: {message}")]
    InvalidPathTemplate {
        /// Description of the path template error.
        message: String,
    },

    /// Declared path parameters differ from the placeholders in the pattern.
    #[error("Path parameters of {method} {route} do not match its placeholders: {message}")]
    PathParamMismatch {
        /// The route pattern.
        route: String,
        /// The method whose descriptor is inconsistent.
        method: RestMethod,
        /// Which names are missing or extra.
        message: String,
    },

    /// The same method was declared twice for one route.
    #[error("Duplicate endpoint: {method} {route}")]
    DuplicateEndpoint {
        /// The route pattern.
        route: String,
        /// The duplicated method.
        method: RestMethod,
    },

    /// A placeholder has no value accepted by every method of its route, so
    /// a method-less URL function could never render it.
    #[error("Path parameter {name} of {route} has no value accepted by every method")]
    DisjointPathParam {
        /// The route pattern.
        route: String,
        /// The placeholder name.
        name: String,
    },

    /// A base URL for the default transport could not be parsed.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// A default header name or value is not valid HTTP.
    #[error("Invalid header {name}: {message}")]
    InvalidHeader {
        /// The header name as supplied.
        name: String,
        /// Why it was rejected.
        message: String,
    },

    /// A derived operation identifier failed validation.
    #[error("Invalid endpoint ID: {0}")]
    InvalidEndpointId(#[from] EndpointIdError),
}

impl ConfigError {
    /// Creates an invalid path template error.
    pub fn invalid_path(message: impl Into<String>) -> Self {
        Self::InvalidPathTemplate {
            message: message.into(),
        }
    }

    /// Creates an unknown route error.
    pub fn unknown_route(route: impl Into<String>) -> Self {
        Self::UnknownRoute {
            route: route.into(),
        }
    }
}
