//! Route schema declaration and validation.
//!
//! A [`RouteSchema`] maps route patterns to the HTTP methods declared on them,
//! and each (route, method) pair to an [`EndpointDescriptor`] describing its
//! path parameters, query, body and response as [`Shape`]s.

mod domain;
mod pattern;
mod route_schema;
mod shape;

pub use domain::{Literal, ValueDomain};
pub use pattern::{PathPattern, Segment};
pub use route_schema::{EndpointDescriptor, RouteEntry, RouteSchema, RouteSchemaBuilder};
pub use shape::{Field, Shape};
