//! The transport seam: the single place network I/O happens.
//!
//! A [`Transport`] receives the finished URL, the method, and the JSON body
//! (`null` for query-class methods) and resolves with the parsed response.
//! [`JsonTransport`] is the default; any other implementation (a mock, a
//! recorder, a different HTTP client) can be injected into
//! [`TypedApi`](crate::TypedApi).

mod json;

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;

use crate::error::TransportError;
use crate::method::RestMethod;

pub use json::{JsonTransport, JsonTransportBuilder};

/// Performs one request and returns the parsed response body.
pub trait Transport: Send + Sync {
    /// Issues `method` against `url` with `body` and resolves with the
    /// response data.
    fn fetch(
        &self,
        url: &str,
        method: RestMethod,
        body: Value,
    ) -> impl Future<Output = Result<Value, TransportError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn fetch(
        &self,
        url: &str,
        method: RestMethod,
        body: Value,
    ) -> impl Future<Output = Result<Value, TransportError>> + Send {
        (**self).fetch(url, method, body)
    }
}

/// A transport backed by a closure.
///
/// ## Examples
///
/// ```rust
/// use serde_json::{json, Value};
/// use typed_api::transport::FnTransport;
/// use typed_api::{RestMethod, TransportError};
///
/// let transport = FnTransport::new(|url: String, method: RestMethod, body: Value| async move {
///     Ok::<_, TransportError>(json!({ "url": url, "method": method, "body": body }))
/// });
/// ```
#[derive(Debug, Clone)]
pub struct FnTransport<F>(F);

impl<F> FnTransport<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F, Fut> Transport for FnTransport<F>
where
    F: Fn(String, RestMethod, Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, TransportError>> + Send,
{
    fn fetch(
        &self,
        url: &str,
        method: RestMethod,
        body: Value,
    ) -> impl Future<Output = Result<Value, TransportError>> + Send {
        (self.0)(url.to_string(), method, body)
    }
}
