//! The route schema: routes, their methods, and endpoint descriptors.

use std::collections::{BTreeMap, BTreeSet};

use super::{PathPattern, Shape, ValueDomain};
use crate::error::ConfigError;
use crate::method::RestMethod;

/// Declared shapes for one (route, method) pair.
///
/// Path parameters are always required; every other field is optional
/// unless declared required in its [`Shape`].
///
/// ## Examples
///
/// ```rust
/// use typed_api::{EndpointDescriptor, Shape, ValueDomain};
///
/// let get_user = EndpointDescriptor::new()
///     .path_param("userId", ValueDomain::String)
///     .response(Shape::new().required("id", ValueDomain::String))
///     .summary("Fetch one user");
///
/// assert_eq!(get_user.path_params().keys().collect::<Vec<_>>(), vec!["userId"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EndpointDescriptor {
    path_params: Shape,
    query: Shape,
    body: Option<Shape>,
    response: Option<Shape>,
    summary: Option<String>,
}

impl EndpointDescriptor {
    /// Creates a descriptor with no params, no query, and untyped body/response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a path parameter.
    pub fn path_param(mut self, name: impl Into<String>, domain: ValueDomain) -> Self {
        self.path_params = self.path_params.required(name, domain);
        self
    }

    /// Declares an optional query parameter.
    pub fn query_param(mut self, name: impl Into<String>, domain: ValueDomain) -> Self {
        self.query = self.query.optional(name, domain);
        self
    }

    /// Replaces the whole query shape.
    pub fn query(mut self, shape: Shape) -> Self {
        self.query = shape;
        self
    }

    /// Sets the request body shape.
    pub fn body(mut self, shape: Shape) -> Self {
        self.body = Some(shape);
        self
    }

    /// Sets the response body shape.
    pub fn response(mut self, shape: Shape) -> Self {
        self.response = Some(shape);
        self
    }

    /// Sets a one-line summary.
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn path_params(&self) -> &Shape {
        &self.path_params
    }

    pub fn query_shape(&self) -> &Shape {
        &self.query
    }

    /// The request body shape, or `None` if any body is accepted.
    pub fn body_shape(&self) -> Option<&Shape> {
        self.body.as_ref()
    }

    pub fn response_shape(&self) -> Option<&Shape> {
        self.response.as_ref()
    }

    pub fn summary_text(&self) -> Option<&str> {
        self.summary.as_deref()
    }
}

/// A route pattern together with the methods declared on it.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEntry {
    pattern: PathPattern,
    methods: Vec<(RestMethod, EndpointDescriptor)>,
}

impl RouteEntry {
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// Declared methods with their descriptors, in declaration order.
    pub fn methods(&self) -> impl Iterator<Item = (RestMethod, &EndpointDescriptor)> {
        self.methods.iter().map(|(m, d)| (*m, d))
    }

    /// The descriptor for `method`, if declared.
    pub fn descriptor(&self, method: RestMethod) -> Option<&EndpointDescriptor> {
        self.methods
            .iter()
            .find(|(m, _)| *m == method)
            .map(|(_, d)| d)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let placeholders: BTreeSet<&str> = self.pattern.placeholders().collect();

        for (method, descriptor) in &self.methods {
            let declared: BTreeSet<&str> = descriptor.path_params.keys().collect();
            if declared == placeholders {
                continue;
            }

            let mut problems = Vec::new();
            let undeclared: Vec<_> = placeholders.difference(&declared).collect();
            if !undeclared.is_empty() {
                problems.push(format!("undeclared placeholders {undeclared:?}"));
            }
            let extra: Vec<_> = declared.difference(&placeholders).collect();
            if !extra.is_empty() {
                problems.push(format!("params not in pattern {extra:?}"));
            }

            return Err(ConfigError::PathParamMismatch {
                route: self.pattern.as_str().to_string(),
                method: *method,
                message: problems.join(", "),
            });
        }

        Ok(())
    }
}

/// An immutable mapping from route pattern to declared methods.
///
/// Built once with [`RouteSchema::builder`]; building validates every route
/// pattern and checks that each method's path parameters match the pattern's
/// placeholders exactly.
///
/// ## Examples
///
/// ```rust
/// use typed_api::{EndpointDescriptor, RestMethod, RouteSchema, Shape, ValueDomain};
///
/// let schema = RouteSchema::builder()
///     .endpoint("/users", RestMethod::Get, EndpointDescriptor::new()
///         .query_param("nameIncludes", ValueDomain::String))
///     .endpoint("/users/:userId", RestMethod::Get, EndpointDescriptor::new()
///         .path_param("userId", ValueDomain::String))
///     .build()
///     .unwrap();
///
/// assert!(schema.route("/users").is_some());
/// assert!(schema.descriptor("/users", RestMethod::Post).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteSchema {
    routes: BTreeMap<String, RouteEntry>,
}

impl RouteSchema {
    /// Creates a new schema builder.
    pub fn builder() -> RouteSchemaBuilder {
        RouteSchemaBuilder::default()
    }

    /// Looks up a route by its exact pattern.
    pub fn route(&self, route: &str) -> Option<&RouteEntry> {
        self.routes.get(route)
    }

    /// All routes, ordered by pattern.
    pub fn routes(&self) -> impl Iterator<Item = &RouteEntry> {
        self.routes.values()
    }

    /// Looks up a route, failing with [`ConfigError::UnknownRoute`].
    pub fn entry(&self, route: &str) -> Result<&RouteEntry, ConfigError> {
        self.route(route)
            .ok_or_else(|| ConfigError::unknown_route(route))
    }

    /// Looks up a (route, method) descriptor.
    ///
    /// ## Errors
    ///
    /// [`ConfigError::UnknownRoute`] or [`ConfigError::UnknownMethod`].
    pub fn descriptor(
        &self,
        route: &str,
        method: RestMethod,
    ) -> Result<&EndpointDescriptor, ConfigError> {
        self.entry(route)?
            .descriptor(method)
            .ok_or_else(|| ConfigError::UnknownMethod {
                route: route.to_string(),
                method,
            })
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Builder for [`RouteSchema`].
#[derive(Debug, Default)]
pub struct RouteSchemaBuilder {
    endpoints: Vec<(String, RestMethod, EndpointDescriptor)>,
}

impl RouteSchemaBuilder {
    /// Declares `method` on `route`.
    pub fn endpoint(
        mut self,
        route: impl Into<String>,
        method: RestMethod,
        descriptor: EndpointDescriptor,
    ) -> Self {
        self.endpoints.push((route.into(), method, descriptor));
        self
    }

    /// Builds and validates the schema.
    ///
    /// ## Errors
    ///
    /// - [`ConfigError::InvalidPathTemplate`] for malformed patterns
    /// - [`ConfigError::DuplicateEndpoint`] if a method is declared twice on a route
    /// - [`ConfigError::PathParamMismatch`] if path params differ from placeholders
    pub fn build(self) -> Result<RouteSchema, ConfigError> {
        let mut routes: BTreeMap<String, RouteEntry> = BTreeMap::new();

        for (route, method, descriptor) in self.endpoints {
            if !routes.contains_key(&route) {
                let pattern = PathPattern::parse(route.as_str())?;
                routes.insert(
                    route.clone(),
                    RouteEntry {
                        pattern,
                        methods: Vec::new(),
                    },
                );
            }
            let Some(entry) = routes.get_mut(&route) else {
                continue;
            };
            if entry.descriptor(method).is_some() {
                return Err(ConfigError::DuplicateEndpoint { route, method });
            }
            entry.methods.push((method, descriptor));
        }

        for entry in routes.values() {
            entry.validate()?;
        }

        Ok(RouteSchema { routes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users_schema() -> RouteSchemaBuilder {
        RouteSchema::builder()
            .endpoint(
                "/users",
                RestMethod::Get,
                EndpointDescriptor::new().query_param("nameIncludes", ValueDomain::String),
            )
            .endpoint(
                "/users",
                RestMethod::Post,
                EndpointDescriptor::new().body(Shape::new().required("name", ValueDomain::String)),
            )
            .endpoint(
                "/users/:userId",
                RestMethod::Get,
                EndpointDescriptor::new().path_param("userId", ValueDomain::String),
            )
    }

    #[test]
    fn test_build_groups_methods_by_route() {
        let schema = users_schema().build().unwrap();
        assert_eq!(schema.len(), 2);

        let users = schema.route("/users").unwrap();
        let methods: Vec<_> = users.methods().map(|(m, _)| m).collect();
        assert_eq!(methods, vec![RestMethod::Get, RestMethod::Post]);
    }

    #[test]
    fn test_descriptor_lookup_errors() {
        let schema = users_schema().build().unwrap();
        assert!(matches!(
            schema.descriptor("/nope", RestMethod::Get),
            Err(ConfigError::UnknownRoute { .. })
        ));
        assert!(matches!(
            schema.descriptor("/users/:userId", RestMethod::Delete),
            Err(ConfigError::UnknownMethod { method: RestMethod::Delete, .. })
        ));
        assert!(schema.descriptor("/users", RestMethod::Post).unwrap().body_shape().is_some());
    }

    #[test]
    fn test_duplicate_method_rejected() {
        let result = users_schema()
            .endpoint("/users", RestMethod::Get, EndpointDescriptor::new())
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::DuplicateEndpoint { method: RestMethod::Get, .. })
        ));
    }

    #[test]
    fn test_undeclared_placeholder_rejected() {
        let result = RouteSchema::builder()
            .endpoint("/users/:userId", RestMethod::Delete, EndpointDescriptor::new())
            .build();
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::PathParamMismatch { .. }));
        assert!(err.to_string().contains("userId"));
    }

    #[test]
    fn test_extra_path_param_rejected() {
        let result = RouteSchema::builder()
            .endpoint(
                "/users",
                RestMethod::Get,
                EndpointDescriptor::new().path_param("userId", ValueDomain::String),
            )
            .build();
        assert!(matches!(result, Err(ConfigError::PathParamMismatch { .. })));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let result = RouteSchema::builder()
            .endpoint("/users/:", RestMethod::Get, EndpointDescriptor::new())
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidPathTemplate { .. })));
    }

    #[test]
    fn test_empty_schema() {
        let schema = RouteSchema::builder().build().unwrap();
        assert!(schema.is_empty());
        assert_eq!(schema.routes().count(), 0);
    }
}
