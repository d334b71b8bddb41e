//! Compile-time endpoint descriptions.
//!
//! [`RequestFn`](super::RequestFn) checks arguments against the runtime
//! [`RouteSchema`](crate::RouteSchema). An [`Endpoint`] additionally pins the
//! Rust types of the path parameters, the query/body argument and the
//! response, so a mismatched argument is a compile error rather than a
//! [`ParameterError`].

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ApiError, ParamLocation, ParameterError};
use crate::method::RestMethod;
use crate::transport::Transport;

use super::request::{PreparedRequest, RequestFn};

/// One (route, method) pair with its argument and response types.
///
/// ## Examples
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use typed_api::{Endpoint, RestMethod};
///
/// #[derive(Serialize)]
/// struct UserPath {
///     #[serde(rename = "userId")]
///     user_id: u64,
/// }
///
/// #[derive(Deserialize)]
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// struct GetUser;
///
/// impl Endpoint for GetUser {
///     const ROUTE: &'static str = "/users/:userId";
///     const METHOD: RestMethod = RestMethod::Get;
///     type PathParams = UserPath;
///     type Input = ();
///     type Response = User;
/// }
/// ```
pub trait Endpoint: 'static {
    /// Route key as declared in the schema.
    const ROUTE: &'static str;
    const METHOD: RestMethod;

    /// Serializes to an object of path parameters (`()` when there are none).
    type PathParams: Serialize;
    /// Query parameters for query-class methods, the body otherwise.
    type Input: Serialize;
    type Response: DeserializeOwned;
}

/// A [`RequestFn`] with argument and response types fixed by `E`.
pub struct EndpointFn<E, T> {
    inner: RequestFn<T>,
    _endpoint: PhantomData<fn() -> E>,
}

impl<E, T> Clone for EndpointFn<E, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _endpoint: PhantomData,
        }
    }
}

impl<E: Endpoint, T> std::fmt::Debug for EndpointFn<E, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointFn")
            .field("route", &E::ROUTE)
            .field("method", &E::METHOD)
            .finish_non_exhaustive()
    }
}

impl<E: Endpoint, T: Transport> EndpointFn<E, T> {
    pub(crate) fn new(inner: RequestFn<T>) -> Self {
        Self {
            inner,
            _endpoint: PhantomData,
        }
    }

    /// The untyped request function underneath.
    pub fn request_fn(&self) -> &RequestFn<T> {
        &self.inner
    }

    /// Builds the URL and body without sending anything.
    ///
    /// ## Errors
    ///
    /// Values the schema rejects (a domain mismatch, a missing required key).
    pub fn prepare(
        &self,
        params: &E::PathParams,
        input: Option<&E::Input>,
    ) -> Result<PreparedRequest<'_, T>, ParameterError> {
        let params = serde_json::to_value(params).map_err(|source| ParameterError::Serialize {
            location: ParamLocation::Path,
            source,
        })?;
        let input = input
            .map(|input| {
                serde_json::to_value(input).map_err(|source| ParameterError::Serialize {
                    location: self.inner.input_location(),
                    source,
                })
            })
            .transpose()?;
        self.inner.prepare_values(params, input)
    }

    /// Calls the endpoint and deserializes into `E::Response`.
    ///
    /// ## Errors
    ///
    /// As [`RequestFn::call`].
    pub async fn call(
        &self,
        params: &E::PathParams,
        input: Option<&E::Input>,
    ) -> Result<E::Response, ApiError> {
        self.prepare(params, input)?.send::<E::Response>().await
    }
}
