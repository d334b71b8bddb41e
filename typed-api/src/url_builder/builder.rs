//! URL builder factory.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::trace;

use super::query::{encode_query, into_object, scalar_text, to_object};
use crate::error::{ConfigError, ParamLocation, ParameterError};
use crate::method::RestMethod;
use crate::schema::{PathPattern, RouteSchema, Shape};

/// Creates URL functions for the routes of a schema.
///
/// The builder itself only holds the shared schema and a prefix; all
/// per-route work happens in [`route`](Self::route), which returns a
/// [`RouteUrl`] with the legal parameter shapes already computed.
///
/// ## Examples
///
/// ```rust
/// use serde_json::json;
/// use typed_api::{EndpointDescriptor, RestMethod, RouteSchema, UrlBuilder, ValueDomain};
///
/// let schema = RouteSchema::builder()
///     .endpoint("/users/:userId", RestMethod::Get, EndpointDescriptor::new()
///         .path_param("userId", ValueDomain::String))
///     .build()
///     .unwrap();
///
/// let urls = UrlBuilder::new(schema).with_prefix("/api/v0");
/// let user_url = urls.route("/users/:userId", None).unwrap();
/// assert_eq!(user_url.url(&json!({"userId": "fred"})).unwrap(), "/api/v0/users/fred");
/// ```
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    schema: Arc<RouteSchema>,
    prefix: String,
}

impl UrlBuilder {
    /// Creates a builder with an empty prefix.
    pub fn new(schema: impl Into<Arc<RouteSchema>>) -> Self {
        Self {
            schema: schema.into(),
            prefix: String::new(),
        }
    }

    /// Sets the string prepended verbatim to every URL.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn schema(&self) -> &Arc<RouteSchema> {
        &self.schema
    }

    /// Binds a URL function to `route`, optionally narrowed to one method.
    ///
    /// With a method, the function accepts exactly that method's path and
    /// query parameters. Without one, it accepts only the keys (and values)
    /// legal for every method declared on the route.
    ///
    /// ## Errors
    ///
    /// - [`ConfigError::UnknownRoute`] or [`ConfigError::UnknownMethod`]
    /// - [`ConfigError::DisjointPathParam`] without a method, if no value of
    ///   some placeholder is accepted by every method of the route
    pub fn route(
        &self,
        route: &str,
        method: Option<RestMethod>,
    ) -> Result<RouteUrl, ConfigError> {
        let entry = self.schema.entry(route)?;

        let (path_params, query) = match method {
            Some(method) => {
                let descriptor = self.schema.descriptor(route, method)?;
                (
                    descriptor.path_params().clone(),
                    descriptor.query_shape().clone(),
                )
            }
            None => {
                let mut descriptors = entry.methods().map(|(_, d)| d);
                let first = descriptors
                    .next()
                    .ok_or_else(|| ConfigError::unknown_route(route))?;
                let (path, query) = descriptors.fold(
                    (first.path_params().clone(), first.query_shape().clone()),
                    |(path, query), d| {
                        (
                            path.intersect(d.path_params()),
                            query.intersect(d.query_shape()),
                        )
                    },
                );
                if let Some(name) = entry
                    .pattern()
                    .placeholders()
                    .find(|name| path.field(name).is_none())
                {
                    return Err(ConfigError::DisjointPathParam {
                        route: route.to_string(),
                        name: name.to_string(),
                    });
                }
                (path, query)
            }
        };

        Ok(RouteUrl {
            prefix: self.prefix.clone(),
            pattern: entry.pattern().clone(),
            method,
            path_params,
            query,
        })
    }
}

/// A URL function bound to one route (and optionally one method).
#[derive(Debug, Clone, PartialEq)]
pub struct RouteUrl {
    prefix: String,
    pattern: PathPattern,
    method: Option<RestMethod>,
    path_params: Shape,
    query: Shape,
}

impl RouteUrl {
    /// Builds the URL for `params` with no query string.
    ///
    /// `params` may be any value serializing to a JSON object; `&()` stands
    /// for "no parameters".
    ///
    /// ## Errors
    ///
    /// - [`ParameterError::Missing`] if a placeholder has no value
    /// - [`ParameterError::UnknownPathParam`] for keys the route does not declare
    /// - [`ParameterError::InvalidValue`] for values outside a key's domain
    pub fn url<P>(&self, params: &P) -> Result<String, ParameterError>
    where
        P: Serialize + ?Sized,
    {
        let params = to_object(params, ParamLocation::Path)?;
        self.render(&params, &Map::new())
    }

    /// Builds the URL for `params` followed by a query string.
    ///
    /// Query keys appear in the order `query` serializes them; `None` fields
    /// are left out.
    ///
    /// ## Errors
    ///
    /// As [`url`](Self::url), plus [`ParameterError::UnknownQueryKey`] for
    /// keys outside the route's legal query set.
    pub fn url_with_query<P, Q>(&self, params: &P, query: &Q) -> Result<String, ParameterError>
    where
        P: Serialize + ?Sized,
        Q: Serialize + ?Sized,
    {
        let params = to_object(params, ParamLocation::Path)?;
        let query = to_object(query, ParamLocation::Query)?;
        self.render(&params, &query)
    }

    /// Builds a URL from already-serialized arguments.
    pub(crate) fn render_values(
        &self,
        params: Value,
        query: Option<Value>,
    ) -> Result<String, ParameterError> {
        let params = into_object(params, ParamLocation::Path)?;
        let query = match query {
            Some(query) => into_object(query, ParamLocation::Query)?,
            None => Map::new(),
        };
        self.render(&params, &query)
    }

    fn render(
        &self,
        params: &Map<String, Value>,
        query: &Map<String, Value>,
    ) -> Result<String, ParameterError> {
        let route = self.pattern.as_str();

        self.path_params.check(params, ParamLocation::Path, route)?;
        self.query.check(query, ParamLocation::Query, route)?;

        let path = self.pattern.render(|name| {
            let value = params.get(name).filter(|v| !v.is_null());
            let Some(value) = value else {
                return Err(ParameterError::Missing {
                    name: name.to_string(),
                    location: ParamLocation::Path,
                    route: route.to_string(),
                });
            };
            scalar_text(value).ok_or_else(|| ParameterError::InvalidValue {
                name: name.to_string(),
                location: ParamLocation::Path,
                value: value.to_string(),
                expected: "a string, number or boolean".to_string(),
            })
        })?;

        let query_string = encode_query(query)?;
        let url = if query_string.is_empty() {
            format!("{}{path}", self.prefix)
        } else {
            format!("{}{path}?{query_string}", self.prefix)
        };

        trace!(route, url = %url, "built url");
        Ok(url)
    }

    /// The route pattern this function is bound to.
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// The method this function is narrowed to, if any.
    pub fn method(&self) -> Option<RestMethod> {
        self.method
    }

    /// The path parameters this function accepts.
    pub fn path_shape(&self) -> &Shape {
        &self.path_params
    }

    /// The query parameters this function accepts.
    pub fn query_shape(&self) -> &Shape {
        &self.query
    }
}
