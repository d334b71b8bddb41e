//! Response parsing and validation errors.

use thiserror::Error;

/// Errors while turning a response into the declared response type.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The response body is not valid JSON.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The JSON value does not match the declared response type.
    #[error("Response does not match {type_name}: {source}")]
    Deserialize {
        /// Name of the Rust type the response was deserialized into.
        type_name: &'static str,
        /// The deserializer error.
        #[source]
        source: serde_json::Error,
    },
}

impl ValidationError {
    /// Returns `true` if the body was not JSON at all.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::JsonParse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_parse_is_parse_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err = ValidationError::JsonParse(json_err);
        assert!(err.is_parse_error());
        assert!(err.to_string().starts_with("JSON parse error"));
    }

    #[test]
    fn test_deserialize_display() {
        let source = serde_json::from_value::<u32>(serde_json::json!("seven")).unwrap_err();
        let err = ValidationError::Deserialize {
            type_name: "u32",
            source,
        };
        assert!(!err.is_parse_error());
        assert!(err.to_string().starts_with("Response does not match u32"));
    }
}
