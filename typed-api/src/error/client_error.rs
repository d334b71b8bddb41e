//! HTTP client and network errors.

use thiserror::Error;

/// Errors from the default JSON transport's HTTP layer.
///
/// HTTP status codes are deliberately absent: the default transport returns
/// any JSON body regardless of status, so only failures to complete the
/// exchange show up here.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed due to network or protocol error.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The generated URL could not be resolved to an absolute URL.
    #[error("Invalid request URL {url}: {source}")]
    InvalidUrl {
        /// The URL as produced by the URL builder.
        url: String,
        /// Why it could not be parsed or joined.
        #[source]
        source: url::ParseError,
    },

    /// The request body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ClientError {
    /// Returns `true` if the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Request(e) if e.is_timeout())
    }

    /// Returns `true` if the connection could not be established.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Request(e) if e.is_connect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_display() {
        let source = url::Url::parse("/relative").unwrap_err();
        let err = ClientError::InvalidUrl {
            url: "/relative".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("Invalid request URL /relative"));
        assert!(!err.is_timeout());
        assert!(!err.is_connect());
    }

    #[test]
    fn test_encode_display() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ClientError::Encode(json_err);
        assert!(err.to_string().contains("Failed to encode request body"));
    }
}
