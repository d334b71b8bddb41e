//! Typed REST Client
//!
//! This crate turns a declarative description of a REST API into URL
//! builders and request functions that check their arguments against that
//! description. The network call itself goes through a pluggable
//! [`Transport`]; the default [`JsonTransport`] sends and receives JSON over
//! HTTP with `reqwest`.
//!
//! ## Core Types
//!
//! ### Declaring an API
//!
//! - [`RouteSchema`] - Every route of the API, keyed by path pattern
//! - [`EndpointDescriptor`] - Path params, query, body and response of one method
//! - [`Shape`] - An ordered record of named fields
//! - [`ValueDomain`] - The values a single field accepts
//! - [`RestMethod`] - HTTP methods (GET, POST, PUT, etc.)
//!
//! ### Calling an API
//!
//! - [`UrlBuilder`] / [`RouteUrl`] - Build URLs for a route, optionally narrowed to a method
//! - [`TypedApi`] - Hands out one [`RequestFn`] per (route, method) pair
//! - [`Endpoint`] / [`EndpointFn`] - Compile-time typed variant of a request function
//! - [`Transport`] - The seam where network I/O happens
//!
//! ## Examples
//!
//! ```
//! use serde_json::json;
//! use typed_api::{EndpointDescriptor, RestMethod, RouteSchema, UrlBuilder, ValueDomain};
//!
//! let schema = RouteSchema::builder()
//!     .endpoint(
//!         "/users",
//!         RestMethod::Get,
//!         EndpointDescriptor::new()
//!             .query_param("nameIncludes", ValueDomain::String)
//!             .query_param("minAge", ValueDomain::Integer),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let users = UrlBuilder::new(schema).route("/users", None).unwrap();
//! let url = users
//!     .url_with_query(&(), &json!({ "nameIncludes": "Fre", "minAge": 40 }))
//!     .unwrap();
//!
//! assert_eq!(url, "/users?nameIncludes=Fre&minAge=40");
//! ```

pub mod client;
pub mod endpoint_id;
pub mod error;
pub mod method;
pub mod openapi;
pub mod schema;
pub mod transport;
pub mod url_builder;

// Re-export main types at crate root
pub use client::{Endpoint, EndpointFn, PreparedRequest, RequestFn, TypedApi};
pub use endpoint_id::{EndpointId, EndpointIdError};
pub use error::{
    ApiError, ClientError, ConfigError, ParamLocation, ParameterError, TransportError,
    ValidationError,
};
pub use method::RestMethod;
pub use schema::{
    EndpointDescriptor, Field, Literal, PathPattern, RouteEntry, RouteSchema, RouteSchemaBuilder,
    Segment, Shape, ValueDomain,
};
pub use transport::{FnTransport, JsonTransport, JsonTransportBuilder, Transport};
pub use url_builder::{RouteUrl, UrlBuilder};
