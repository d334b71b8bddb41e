//! OpenAPI 3.x document generator.
//!
//! [`OpenApiGenerator`] renders a [`RouteSchema`] as an OpenAPI 3.1.0
//! document: one path item per route, one operation per declared method.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

use crate::endpoint_id::EndpointId;
use crate::error::ConfigError;
use crate::method::RestMethod;
use crate::schema::{EndpointDescriptor, RouteSchema, Shape, ValueDomain};

/// Output format for the generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Metadata for the OpenAPI `info` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenApiInfo {
    pub title: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
}

impl OpenApiInfo {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            description: None,
            contact: None,
            license: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_contact(mut self, contact: Contact) -> Self {
        self.contact = Some(contact);
        self
    }

    pub fn with_license(mut self, license: License) -> Self {
        self.license = Some(license);
        self
    }
}

/// Contact information for the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// License information for the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// An entry of the `servers` section.
///
/// The URL is typically the same prefix handed to
/// [`TypedApi::with_prefix`](crate::TypedApi::with_prefix).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Server {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// One operation of the document, resolved from the schema.
#[derive(Debug, Clone)]
pub struct OperationSpec {
    /// Used as the `operationId`.
    pub id: EndpointId,
    pub method: RestMethod,
    /// Path in OpenAPI form (`{param}` placeholders).
    pub path: String,
    pub descriptor: EndpointDescriptor,
}

/// Generator for OpenAPI 3.1.0 documents.
///
/// ## Examples
///
/// ```rust
/// use typed_api::openapi::{OpenApiGenerator, OpenApiInfo, OutputFormat, Server};
/// use typed_api::{EndpointDescriptor, RestMethod, RouteSchema, ValueDomain};
///
/// let schema = RouteSchema::builder()
///     .endpoint(
///         "/users/:userId",
///         RestMethod::Get,
///         EndpointDescriptor::new().path_param("userId", ValueDomain::Integer),
///     )
///     .build()
///     .unwrap();
///
/// let doc = OpenApiGenerator::from_schema(OpenApiInfo::new("Users", "1.0.0"), &schema)
///     .unwrap()
///     .add_server(Server::new("https://api.example.com"))
///     .generate(OutputFormat::Json)
///     .unwrap();
///
/// assert!(doc.contains("/users/{userId}"));
/// ```
#[derive(Debug, Clone)]
pub struct OpenApiGenerator {
    info: OpenApiInfo,
    servers: Vec<Server>,
    operations: Vec<OperationSpec>,
}

impl OpenApiGenerator {
    /// Collects one operation per (route, method) pair of `schema`.
    ///
    /// ## Errors
    ///
    /// [`ConfigError::InvalidEndpointId`] if a route yields no usable
    /// operation id.
    pub fn from_schema(info: OpenApiInfo, schema: &RouteSchema) -> Result<Self, ConfigError> {
        let mut operations = Vec::new();
        for entry in schema.routes() {
            for (method, descriptor) in entry.methods() {
                operations.push(OperationSpec {
                    id: EndpointId::for_route(method, entry.pattern())?,
                    method,
                    path: entry.pattern().to_openapi_path(),
                    descriptor: descriptor.clone(),
                });
            }
        }

        Ok(Self {
            info,
            servers: Vec::new(),
            operations,
        })
    }

    pub fn add_server(mut self, server: Server) -> Self {
        self.servers.push(server);
        self
    }

    pub fn add_servers(mut self, servers: impl IntoIterator<Item = Server>) -> Self {
        self.servers.extend(servers);
        self
    }

    pub fn operations(&self) -> &[OperationSpec] {
        &self.operations
    }

    /// Renders the document as a string.
    ///
    /// ## Errors
    ///
    /// Returns an error if serialization fails.
    pub fn generate(&self, format: OutputFormat) -> Result<String, GenerateError> {
        let doc = self.generate_value()?;

        match format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&doc).map_err(GenerateError::JsonSerialize)
            }
            OutputFormat::Yaml => serde_yaml::to_string(&doc).map_err(GenerateError::YamlSerialize),
        }
    }

    /// Renders the document as a `serde_json::Value`.
    ///
    /// ## Errors
    ///
    /// Returns an error if the info or server sections fail to serialize.
    pub fn generate_value(&self) -> Result<Value, GenerateError> {
        let mut doc = Map::new();
        doc.insert("openapi".to_string(), json!("3.1.0"));
        doc.insert(
            "info".to_string(),
            serde_json::to_value(&self.info).map_err(GenerateError::JsonSerialize)?,
        );

        if !self.servers.is_empty() {
            doc.insert(
                "servers".to_string(),
                serde_json::to_value(&self.servers).map_err(GenerateError::JsonSerialize)?,
            );
        }

        let paths = self.build_paths();
        if !paths.is_empty() {
            doc.insert("paths".to_string(), Value::Object(paths.into_iter().collect()));
        }

        Ok(Value::Object(doc))
    }

    fn build_paths(&self) -> BTreeMap<String, Value> {
        let mut paths: BTreeMap<String, Value> = BTreeMap::new();

        for op in &self.operations {
            let operation = build_operation(op);
            let item = paths
                .entry(op.path.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(methods) = item {
                methods.insert(op.method.as_str().to_string(), operation);
            }
        }

        paths
    }
}

fn build_operation(op: &OperationSpec) -> Value {
    let descriptor = &op.descriptor;

    let mut operation = json!({
        "operationId": op.id.as_str(),
        "responses": {
            "200": response_object(descriptor.response_shape()),
        }
    });

    if let Some(summary) = descriptor.summary_text() {
        operation["summary"] = Value::String(summary.to_string());
    }

    let parameters: Vec<Value> = parameters("path", descriptor.path_params())
        .chain(parameters("query", descriptor.query_shape()))
        .collect();
    if !parameters.is_empty() {
        operation["parameters"] = Value::Array(parameters);
    }

    if op.method.has_body() {
        if let Some(body) = descriptor.body_shape() {
            operation["requestBody"] = json!({
                "required": body.fields().iter().any(|f| f.is_required()),
                "content": {
                    "application/json": { "schema": shape_schema(body) }
                }
            });
        }
    }

    operation
}

fn parameters<'a>(location: &'a str, shape: &'a Shape) -> impl Iterator<Item = Value> + 'a {
    shape.fields().iter().map(move |field| {
        json!({
            "name": field.name(),
            "in": location,
            "required": location == "path" || field.is_required(),
            "schema": domain_schema(field.domain()),
        })
    })
}

fn response_object(shape: Option<&Shape>) -> Value {
    let schema = shape.map(shape_schema).unwrap_or_else(|| json!({}));
    json!({
        "description": "Successful response",
        "content": {
            "application/json": { "schema": schema }
        }
    })
}

/// JSON Schema for an object shape.
fn shape_schema(shape: &Shape) -> Value {
    let properties: Map<String, Value> = shape
        .fields()
        .iter()
        .map(|field| (field.name().to_string(), domain_schema(field.domain())))
        .collect();
    let required: Vec<&str> = shape
        .fields()
        .iter()
        .filter(|field| field.is_required())
        .map(|field| field.name())
        .collect();

    let mut schema = json!({
        "type": "object",
        "properties": properties,
        "additionalProperties": shape.is_open(),
    });
    if !required.is_empty() {
        schema["required"] = json!(required);
    }
    schema
}

/// JSON Schema for a single value domain.
fn domain_schema(domain: &ValueDomain) -> Value {
    match domain {
        ValueDomain::Any => json!({}),
        ValueDomain::String => json!({ "type": "string" }),
        ValueDomain::Number => json!({ "type": "number" }),
        ValueDomain::Integer => json!({ "type": "integer" }),
        ValueDomain::Boolean => json!({ "type": "boolean" }),
        ValueDomain::OneOf(literals) => {
            let values: Vec<Value> = literals.iter().map(|l| l.to_value()).collect();
            json!({ "enum": values })
        }
    }
}

/// Errors that can occur while rendering the document.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("failed to serialize OpenAPI document to JSON: {0}")]
    JsonSerialize(#[source] serde_json::Error),

    #[error("failed to serialize OpenAPI document to YAML: {0}")]
    YamlSerialize(#[source] serde_yaml::Error),
}
