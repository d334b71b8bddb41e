//! Default JSON transport over `reqwest`.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use tracing::{instrument, Span};
use url::Url;

use super::Transport;
use crate::error::{ClientError, ConfigError, TransportError, ValidationError};
use crate::method::RestMethod;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const APPLICATION_JSON: &str = "application/json";

/// Builder for configuring a [`JsonTransport`].
#[derive(Debug)]
pub struct JsonTransportBuilder {
    base_url: Option<Url>,
    timeout: Duration,
    default_headers: HeaderMap,
}

impl JsonTransportBuilder {
    fn new() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_headers: HeaderMap::new(),
        }
    }

    /// Sets the URL that relative request URLs are resolved against.
    ///
    /// Without a base URL every generated URL must already be absolute,
    /// e.g. by giving the URL builder an absolute prefix.
    pub fn base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Parses and sets the base URL.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if `base_url` is not an absolute URL.
    pub fn base_url_str(self, base_url: &str) -> Result<Self, ConfigError> {
        Ok(self.base_url(Url::parse(base_url)?))
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a header sent with every request.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidHeader`] if the header name or value is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ConfigError> {
        let invalid = |message: String| ConfigError::InvalidHeader {
            name: name.as_ref().to_string(),
            message,
        };
        let header_name =
            HeaderName::try_from(name.as_ref()).map_err(|e| invalid(e.to_string()))?;
        let header_value =
            HeaderValue::try_from(value.as_ref()).map_err(|e| invalid(e.to_string()))?;
        self.default_headers.insert(header_name, header_value);
        Ok(self)
    }

    /// Builds the [`JsonTransport`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<JsonTransport, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(self.default_headers)
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(JsonTransport {
            client,
            base_url: self.base_url,
        })
    }
}

/// Transport that exchanges JSON over HTTP.
///
/// Every request carries `Accept: application/json` and
/// `Content-Type: application/json`, and its body is the JSON encoding of the
/// supplied value (`null` included). The response body is parsed as JSON
/// whatever the HTTP status: a `404` with a JSON error document resolves
/// normally. Wrap the transport if status codes must fail the call.
///
/// The method goes on the wire as the standard uppercase token (`GET`,
/// `PATCH`), not the lowercase [`RestMethod`] name handed to
/// [`Transport::fetch`].
///
/// ## Examples
///
/// ```rust,ignore
/// use typed_api::JsonTransport;
/// use url::Url;
///
/// let transport = JsonTransport::builder()
///     .base_url(Url::parse("https://api.example.com")?)
///     .build()?;
/// let value = transport
///     .fetch_json("/api/v0/hello", RestMethod::Get, json!({"payload": 42}))
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct JsonTransport {
    client: reqwest::Client,
    base_url: Option<Url>,
}

impl JsonTransport {
    /// Creates a new builder.
    pub fn builder() -> JsonTransportBuilder {
        JsonTransportBuilder::new()
    }

    /// Creates a transport with default settings and no base URL.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new() -> Result<Self, ClientError> {
        Self::builder().build()
    }

    /// Creates a transport resolving relative URLs against `base_url`.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn with_base_url(base_url: Url) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    fn resolve(&self, url: &str) -> Result<Url, ClientError> {
        let resolved = match &self.base_url {
            Some(base) => base.join(url),
            None => Url::parse(url),
        };
        resolved.map_err(|source| ClientError::InvalidUrl {
            url: url.to_string(),
            source,
        })
    }

    /// Sends one JSON request and parses the JSON response.
    ///
    /// ## Errors
    ///
    /// - [`ClientError`] if the URL cannot be resolved or the exchange fails
    /// - [`ValidationError::JsonParse`] if the response body is not JSON
    #[instrument(
        name = "json_fetch",
        skip(self, body),
        fields(
            http.method = %method,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
        )
    )]
    pub async fn fetch_json(
        &self,
        url: &str,
        method: RestMethod,
        body: Value,
    ) -> Result<Value, TransportError> {
        let full_url = self.resolve(url)?;
        Span::current().record("http.url", full_url.as_str());

        let payload = serde_json::to_vec(&body).map_err(ClientError::Encode)?;

        let response = self
            .client
            .request(method.to_reqwest(), full_url)
            .header(ACCEPT, APPLICATION_JSON)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .body(bytes::Bytes::from(payload))
            .send()
            .await
            .map_err(ClientError::Request)?;

        Span::current().record("http.status_code", response.status().as_u16());

        let body: bytes::Bytes = response.bytes().await.map_err(ClientError::Request)?;
        let parsed = serde_json::from_slice(&body).map_err(ValidationError::JsonParse)?;
        Ok(parsed)
    }
}

impl Transport for JsonTransport {
    async fn fetch(
        &self,
        url: &str,
        method: RestMethod,
        body: Value,
    ) -> Result<Value, TransportError> {
        self.fetch_json(url, method, body).await
    }
}
