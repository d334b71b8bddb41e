//! OpenAPI document generation.
//!
//! Renders a [`RouteSchema`](crate::RouteSchema) as an OpenAPI 3.1.0
//! document, so the same declaration that drives the client can be
//! published for other consumers.

pub mod generator;

pub use generator::{
    Contact, GenerateError, License, OpenApiGenerator, OpenApiInfo, OperationSpec, OutputFormat,
    Server,
};
