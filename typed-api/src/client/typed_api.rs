use std::sync::Arc;

use crate::error::{ClientError, ConfigError};
use crate::method::RestMethod;
use crate::schema::RouteSchema;
use crate::transport::{JsonTransport, Transport};
use crate::url_builder::UrlBuilder;

use super::endpoint::{Endpoint, EndpointFn};
use super::request::RequestFn;

/// Typed request functions for every route in a [`RouteSchema`].
///
/// Each accessor looks the route up once and hands back a [`RequestFn`]
/// bound to the schema's shapes for that method. Unknown routes and
/// undeclared methods fail here rather than on the wire.
///
/// ## Examples
///
/// ```rust,no_run
/// use serde_json::{json, Value};
/// use typed_api::{EndpointDescriptor, RestMethod, RouteSchema, Shape, TypedApi, ValueDomain};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let schema = RouteSchema::builder()
///     .endpoint(
///         "/users",
///         RestMethod::Post,
///         EndpointDescriptor::new().body(
///             Shape::new()
///                 .required("name", ValueDomain::String)
///                 .required("age", ValueDomain::Integer),
///         ),
///     )
///     .build()?;
///
/// let api = TypedApi::new(schema)?.with_prefix("https://example.com/api");
/// let user: Value = api
///     .post("/users")?
///     .call_with(&(), &json!({ "name": "Fred", "age": 42 }))
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct TypedApi<T = JsonTransport> {
    urls: UrlBuilder,
    transport: Arc<T>,
}

impl<T> Clone for TypedApi<T> {
    fn clone(&self) -> Self {
        Self {
            urls: self.urls.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T> std::fmt::Debug for TypedApi<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedApi")
            .field("prefix", &self.urls.prefix())
            .field("routes", &self.urls.schema().len())
            .finish_non_exhaustive()
    }
}

impl TypedApi<JsonTransport> {
    /// Creates a client that sends JSON over HTTP with the default transport.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(schema: impl Into<Arc<RouteSchema>>) -> Result<Self, ClientError> {
        Ok(Self::with_transport(schema, JsonTransport::new()?))
    }
}

impl<T: Transport> TypedApi<T> {
    /// Creates a client that routes every request through `transport`.
    pub fn with_transport(schema: impl Into<Arc<RouteSchema>>, transport: T) -> Self {
        Self {
            urls: UrlBuilder::new(schema),
            transport: Arc::new(transport),
        }
    }

    /// Prepends `prefix` verbatim to every URL.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.urls = self.urls.with_prefix(prefix);
        self
    }

    pub fn schema(&self) -> &RouteSchema {
        self.urls.schema()
    }

    pub fn url_builder(&self) -> &UrlBuilder {
        &self.urls
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Binds a request function to `method` on `route`.
    ///
    /// ## Errors
    ///
    /// [`ConfigError::UnknownRoute`] or [`ConfigError::UnknownMethod`].
    pub fn request(&self, method: RestMethod, route: &str) -> Result<RequestFn<T>, ConfigError> {
        let descriptor = self.urls.schema().descriptor(route, method)?;
        let body_shape = if method.has_body() {
            descriptor.body_shape().cloned()
        } else {
            None
        };
        let route = self.urls.route(route, Some(method))?;
        Ok(RequestFn::new(
            route,
            method,
            body_shape,
            Arc::clone(&self.transport),
        ))
    }

    pub fn get(&self, route: &str) -> Result<RequestFn<T>, ConfigError> {
        self.request(RestMethod::Get, route)
    }

    pub fn post(&self, route: &str) -> Result<RequestFn<T>, ConfigError> {
        self.request(RestMethod::Post, route)
    }

    pub fn put(&self, route: &str) -> Result<RequestFn<T>, ConfigError> {
        self.request(RestMethod::Put, route)
    }

    pub fn patch(&self, route: &str) -> Result<RequestFn<T>, ConfigError> {
        self.request(RestMethod::Patch, route)
    }

    pub fn delete(&self, route: &str) -> Result<RequestFn<T>, ConfigError> {
        self.request(RestMethod::Delete, route)
    }

    pub fn head(&self, route: &str) -> Result<RequestFn<T>, ConfigError> {
        self.request(RestMethod::Head, route)
    }

    pub fn options(&self, route: &str) -> Result<RequestFn<T>, ConfigError> {
        self.request(RestMethod::Options, route)
    }

    pub fn trace(&self, route: &str) -> Result<RequestFn<T>, ConfigError> {
        self.request(RestMethod::Trace, route)
    }

    /// Binds a request function typed by `E`.
    ///
    /// ## Errors
    ///
    /// As [`request`](Self::request), for `E::ROUTE` and `E::METHOD`.
    pub fn endpoint<E: Endpoint>(&self) -> Result<EndpointFn<E, T>, ConfigError> {
        self.request(E::METHOD, E::ROUTE).map(EndpointFn::new)
    }
}
