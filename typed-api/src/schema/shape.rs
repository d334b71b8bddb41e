//! Record shapes: the named fields of path params, queries and bodies.

use serde_json::{Map, Value};

use super::ValueDomain;
use crate::error::{ParamLocation, ParameterError};

/// One named field of a [`Shape`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    domain: ValueDomain,
    required: bool,
}

impl Field {
    /// The field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The values the field accepts.
    pub fn domain(&self) -> &ValueDomain {
        &self.domain
    }

    /// Whether the field must be present.
    pub fn is_required(&self) -> bool {
        self.required
    }
}

/// An ordered record of named fields.
///
/// Fields are optional unless declared required. A closed shape (the
/// default) rejects keys it does not declare; an open shape accepts any
/// extra key with any value.
///
/// ## Examples
///
/// ```rust
/// use typed_api::{Shape, ValueDomain};
///
/// let query = Shape::new()
///     .optional("nameIncludes", ValueDomain::String)
///     .optional("minAge", ValueDomain::Number);
///
/// assert!(query.field("minAge").is_some());
/// assert!(query.field("suffix").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    fields: Vec<Field>,
    open: bool,
}

impl Shape {
    /// Creates an empty closed shape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a shape that accepts any key.
    pub fn open() -> Self {
        Self {
            fields: Vec::new(),
            open: true,
        }
    }

    /// Declares a required field, replacing any field with the same name.
    pub fn required(self, name: impl Into<String>, domain: ValueDomain) -> Self {
        self.with_field(name.into(), domain, true)
    }

    /// Declares an optional field, replacing any field with the same name.
    pub fn optional(self, name: impl Into<String>, domain: ValueDomain) -> Self {
        self.with_field(name.into(), domain, false)
    }

    fn with_field(mut self, name: String, domain: ValueDomain, required: bool) -> Self {
        let field = Field {
            name,
            domain,
            required,
        };
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
        self
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// All declared fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Names of all declared fields.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Whether undeclared keys are accepted.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns `true` if the shape declares no fields and rejects extras.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && !self.open
    }

    /// Returns the shape of records that satisfy both `self` and `other`.
    ///
    /// A declared key survives only if the other shape declares it too (or
    /// is open) and the two domains overlap. The surviving field is required
    /// if either side requires it.
    pub fn intersect(&self, other: &Shape) -> Shape {
        let mut fields = Vec::new();

        for field in &self.fields {
            let kept = match other.field(&field.name) {
                Some(theirs) => field.domain.intersect(&theirs.domain).map(|domain| Field {
                    name: field.name.clone(),
                    domain,
                    required: field.required || theirs.required,
                }),
                None if other.open => Some(field.clone()),
                None => None,
            };
            fields.extend(kept);
        }

        if self.open {
            fields.extend(
                other
                    .fields
                    .iter()
                    .filter(|f| self.field(&f.name).is_none())
                    .cloned(),
            );
        }

        Shape {
            fields,
            open: self.open && other.open,
        }
    }

    /// Checks a JSON object against this shape.
    ///
    /// Null values count as absent. Keys are checked in the object's order so
    /// the first offending key is the one reported.
    pub(crate) fn check(
        &self,
        object: &Map<String, Value>,
        location: ParamLocation,
        route: &str,
    ) -> Result<(), ParameterError> {
        for (key, value) in object {
            if value.is_null() {
                continue;
            }
            let Some(field) = self.field(key) else {
                if self.open {
                    continue;
                }
                return Err(unknown_key(key, location, route));
            };
            if !field.domain.accepts(value) {
                return Err(ParameterError::InvalidValue {
                    name: key.clone(),
                    location,
                    value: value.to_string(),
                    expected: field.domain.to_string(),
                });
            }
        }

        let missing = self
            .fields
            .iter()
            .filter(|f| f.required)
            .find(|f| object.get(&f.name).map_or(true, Value::is_null));
        if let Some(field) = missing {
            return Err(ParameterError::Missing {
                name: field.name.clone(),
                location,
                route: route.to_string(),
            });
        }

        Ok(())
    }
}

fn unknown_key(key: &str, location: ParamLocation, route: &str) -> ParameterError {
    let name = key.to_string();
    let route = route.to_string();
    match location {
        ParamLocation::Path => ParameterError::UnknownPathParam { name, route },
        ParamLocation::Query => ParameterError::UnknownQueryKey { name, route },
        ParamLocation::Body => ParameterError::UnknownBodyField { name, route },
    }
}
