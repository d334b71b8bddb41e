//! Request functions bound to one route and method.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument, Span};

use crate::error::{ApiError, ParamLocation, ParameterError, ValidationError};
use crate::method::RestMethod;
use crate::schema::Shape;
use crate::transport::Transport;
use crate::url_builder::query::json_kind;
use crate::url_builder::RouteUrl;

/// A request function for one (route, method) pair.
///
/// The second argument is interpreted by method: query parameters for
/// query-class methods (`get`, `delete`, ...), the request body for `post`,
/// `put` and `patch`. Each call makes exactly one transport call; nothing is
/// cached, retried or deduplicated.
///
/// ## Examples
///
/// ```rust,ignore
/// let get_users = api.get("/users")?;
/// let all: UsersResponse = get_users.call(&()).await?;
/// let some: UsersResponse = get_users.call_with(&(), &json!({"nameIncludes": "red"})).await?;
///
/// let create_user = api.post("/users")?;
/// let fred: User = create_user.call_with(&(), &NewUser { name: "Fred", age: 42 }).await?;
/// ```
pub struct RequestFn<T> {
    route: RouteUrl,
    method: RestMethod,
    body_shape: Option<Shape>,
    transport: Arc<T>,
}

impl<T> Clone for RequestFn<T> {
    fn clone(&self) -> Self {
        Self {
            route: self.route.clone(),
            method: self.method,
            body_shape: self.body_shape.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T> std::fmt::Debug for RequestFn<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestFn")
            .field("route", &self.route.pattern().as_str())
            .field("method", &self.method)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> RequestFn<T> {
    pub(crate) fn new(
        route: RouteUrl,
        method: RestMethod,
        body_shape: Option<Shape>,
        transport: Arc<T>,
    ) -> Self {
        Self {
            route,
            method,
            body_shape,
            transport,
        }
    }

    pub fn method(&self) -> RestMethod {
        self.method
    }

    /// The URL function this request function builds with.
    pub fn route(&self) -> &RouteUrl {
        &self.route
    }

    /// Location of the second argument for this method.
    pub fn input_location(&self) -> ParamLocation {
        if self.method.has_body() {
            ParamLocation::Body
        } else {
            ParamLocation::Query
        }
    }

    /// Builds the URL and body without sending anything.
    ///
    /// ## Errors
    ///
    /// Any [`ParameterError`]; these surface here, before the transport runs.
    pub fn prepare<P>(&self, params: &P) -> Result<PreparedRequest<'_, T>, ParameterError>
    where
        P: Serialize + ?Sized,
    {
        let params = serialize(params, ParamLocation::Path)?;
        self.prepare_values(params, None)
    }

    /// Builds the URL and body for `params` plus a query or body argument.
    ///
    /// ## Errors
    ///
    /// Any [`ParameterError`]; these surface here, before the transport runs.
    pub fn prepare_with<P, I>(
        &self,
        params: &P,
        input: &I,
    ) -> Result<PreparedRequest<'_, T>, ParameterError>
    where
        P: Serialize + ?Sized,
        I: Serialize + ?Sized,
    {
        let params = serialize(params, ParamLocation::Path)?;
        let input = serialize(input, self.input_location())?;
        self.prepare_values(params, Some(input))
    }

    pub(crate) fn prepare_values(
        &self,
        params: Value,
        input: Option<Value>,
    ) -> Result<PreparedRequest<'_, T>, ParameterError> {
        let (url, body) = if self.method.has_body() {
            let body = input.unwrap_or(Value::Null);
            self.check_body(&body)?;
            (self.route.render_values(params, None)?, body)
        } else {
            (self.route.render_values(params, input)?, Value::Null)
        };

        Ok(PreparedRequest {
            transport: self.transport.as_ref(),
            route: self.route.pattern().as_str(),
            method: self.method,
            url,
            body,
        })
    }

    fn check_body(&self, body: &Value) -> Result<(), ParameterError> {
        let Some(shape) = &self.body_shape else {
            return Ok(());
        };
        let route = self.route.pattern().as_str();
        match body {
            Value::Object(map) => shape.check(map, ParamLocation::Body, route),
            Value::Null => shape.check(&Map::new(), ParamLocation::Body, route),
            other => Err(ParameterError::NotAnObject {
                location: ParamLocation::Body,
                found: json_kind(other),
            }),
        }
    }

    /// Calls the endpoint with path parameters only.
    ///
    /// ## Errors
    ///
    /// [`ApiError::Parameter`] for bad arguments, [`ApiError::Transport`] if
    /// the transport fails, [`ApiError::Validation`] if the response does not
    /// deserialize into `R`.
    pub async fn call<R, P>(&self, params: &P) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.prepare(params)?.send().await
    }

    /// Calls the endpoint with path parameters and a query or body argument.
    ///
    /// ## Errors
    ///
    /// As [`call`](Self::call).
    pub async fn call_with<R, P, I>(&self, params: &P, input: &I) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        P: Serialize + ?Sized,
        I: Serialize + ?Sized,
    {
        self.prepare_with(params, input)?.send().await
    }
}

/// A fully built request, ready to hand to the transport.
pub struct PreparedRequest<'a, T> {
    transport: &'a T,
    route: &'a str,
    method: RestMethod,
    url: String,
    body: Value,
}

impl<T> std::fmt::Debug for PreparedRequest<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedRequest")
            .field("route", &self.route)
            .field("method", &self.method)
            .field("url", &self.url)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> PreparedRequest<'_, T> {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> RestMethod {
        self.method
    }

    /// The body handed to the transport (`null` for query-class methods).
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Sends the request and deserializes the response into `R`.
    ///
    /// Use `R = serde_json::Value` to get the transport's value untouched.
    ///
    /// ## Errors
    ///
    /// [`ApiError::Transport`] with the transport's error unchanged, or
    /// [`ApiError::Validation`] if the response does not fit `R`.
    #[instrument(
        name = "api_request",
        skip(self),
        fields(
            http.method = tracing::field::Empty,
            http.route = tracing::field::Empty,
            http.url = tracing::field::Empty,
            otel.kind = "client",
        )
    )]
    pub async fn send<R: DeserializeOwned>(self) -> Result<R, ApiError> {
        let span = Span::current();
        span.record("http.method", self.method.as_str());
        span.record("http.route", self.route);
        span.record("http.url", self.url.as_str());
        debug!("dispatching request");

        let value = self.transport.fetch(&self.url, self.method, self.body).await?;

        serde_json::from_value(value).map_err(|source| {
            ValidationError::Deserialize {
                type_name: std::any::type_name::<R>(),
                source,
            }
            .into()
        })
    }
}

fn serialize<S>(value: &S, location: ParamLocation) -> Result<Value, ParameterError>
where
    S: Serialize + ?Sized,
{
    serde_json::to_value(value).map_err(|source| ParameterError::Serialize { location, source })
}
