use std::fmt;

use crate::method::RestMethod;
use crate::schema::{PathPattern, Segment};

/// A validated operation identifier, used as the OpenAPI `operationId`.
/// Rules:
/// 1. Must start with an alphabetic character.
/// 2. Remaining characters must be alphanumeric or `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EndpointId(String);

#[derive(Debug, PartialEq, Eq)]
pub enum EndpointIdError {
    Empty,
    InvalidStartCharacter,
    InvalidCharacter(char),
}

impl fmt::Display for EndpointIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "EndpointId cannot be empty"),
            Self::InvalidStartCharacter => {
                write!(f, "EndpointId must start with an alphabetic character")
            }
            Self::InvalidCharacter(c) => {
                write!(f, "EndpointId contains invalid character: '{}'", c)
            }
        }
    }
}

impl std::error::Error for EndpointIdError {}

impl EndpointId {
    /// Creates a new EndpointId from any type that can turn into a String.
    pub fn new<S: Into<String>>(id: S) -> Result<Self, EndpointIdError> {
        let s = id.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Derives the identifier for a method on a route.
    ///
    /// Literal segments are kept (with non-identifier characters replaced by
    /// `_`) and placeholders become `by_<name>`, so `get /users/:userId`
    /// yields `get_users_by_userId`.
    pub fn for_route(method: RestMethod, pattern: &PathPattern) -> Result<Self, EndpointIdError> {
        let mut id = method.as_str().to_string();
        for segment in pattern.segments() {
            match segment {
                Segment::Literal(text) if text.is_empty() => {}
                Segment::Literal(text) => {
                    id.push('_');
                    id.extend(text.chars().map(|c| if c.is_alphanumeric() { c } else { '_' }));
                }
                Segment::Param(name) => {
                    id.push_str("_by_");
                    id.extend(name.chars().map(|c| if c.is_alphanumeric() { c } else { '_' }));
                }
            }
        }
        Self::new(id)
    }

    fn validate(s: &str) -> Result<(), EndpointIdError> {
        let mut chars = s.chars();

        match chars.next() {
            Some(c) if !c.is_alphabetic() => return Err(EndpointIdError::InvalidStartCharacter),
            None => return Err(EndpointIdError::Empty),
            _ => {}
        }

        for c in chars {
            if !c.is_alphanumeric() && c != '_' {
                return Err(EndpointIdError::InvalidCharacter(c));
            }
        }

        Ok(())
    }

    /// Returns a string slice reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EndpointId> for String {
    fn from(id: EndpointId) -> Self {
        id.0
    }
}

impl TryFrom<&str> for EndpointId {
    type Error = EndpointIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
