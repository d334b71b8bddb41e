//! Route patterns with `:name` placeholders.

use std::fmt;

use crate::error::ConfigError;

/// One `/`-separated piece of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text copied into the URL as-is (may be empty, e.g. before a leading `/`).
    Literal(String),
    /// A `:name` substitution point.
    Param(String),
}

/// A parsed route pattern such as `/users/:userId/posts/:postId`.
///
/// Splitting on `/` and joining back reproduces the pattern exactly, so
/// rendering never adds or removes slashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parses a route pattern.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidPathTemplate`] for a placeholder without
    /// a name (`/users/:`) or a placeholder name used twice.
    pub fn parse(raw: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = raw.into();
        let mut segments = Vec::new();

        for piece in raw.split('/') {
            let Some(name) = piece.strip_prefix(':') else {
                segments.push(Segment::Literal(piece.to_string()));
                continue;
            };
            if name.is_empty() {
                return Err(ConfigError::invalid_path(format!(
                    "empty placeholder name in {raw}"
                )));
            }
            if segments
                .iter()
                .any(|s| matches!(s, Segment::Param(existing) if existing == name))
            {
                return Err(ConfigError::invalid_path(format!(
                    "placeholder :{name} appears more than once in {raw}"
                )));
            }
            segments.push(Segment::Param(name.to_string()));
        }

        Ok(Self { raw, segments })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// All segments in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholder names in the order they appear.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Returns `true` if the pattern has at least one placeholder.
    pub fn has_placeholders(&self) -> bool {
        self.placeholders().next().is_some()
    }

    /// Substitutes every placeholder with the value returned by `value_of`.
    ///
    /// The first error returned by `value_of` aborts rendering.
    pub fn render<E, F>(&self, mut value_of: F) -> Result<String, E>
    where
        F: FnMut(&str) -> Result<String, E>,
    {
        let mut rendered = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => rendered.push(text.clone()),
                Segment::Param(name) => rendered.push(value_of(name)?),
            }
        }
        Ok(rendered.join("/"))
    }

    /// Rewrites `:name` placeholders into OpenAPI `{name}` form.
    pub fn to_openapi_path(&self) -> String {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Literal(text) => text.clone(),
                Segment::Param(name) => format!("{{{name}}}"),
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[test]
    fn test_placeholders() {
        let pattern = PathPattern::parse("/users/:user_id/posts/:post_id").unwrap();
        assert_eq!(
            pattern.placeholders().collect::<Vec<_>>(),
            vec!["user_id", "post_id"]
        );
        assert!(pattern.has_placeholders());
    }

    #[test]
    fn test_no_placeholders() {
        let pattern = PathPattern::parse("/users").unwrap();
        assert!(!pattern.has_placeholders());
        let rendered: Result<String, Infallible> = pattern.render(|_| unreachable!());
        assert_eq!(rendered.unwrap(), "/users");
    }

    #[test]
    fn test_render_substitutes() {
        let pattern = PathPattern::parse("/users/:id").unwrap();
        let rendered: Result<String, Infallible> = pattern.render(|name| {
            assert_eq!(name, "id");
            Ok("123".to_string())
        });
        assert_eq!(rendered.unwrap(), "/users/123");
    }

    #[test]
    fn test_render_keeps_slashes_literal() {
        let pattern = PathPattern::parse("//a//:b/").unwrap();
        let rendered: Result<String, Infallible> = pattern.render(|_| Ok("x".to_string()));
        assert_eq!(rendered.unwrap(), "//a//x/");
    }

    #[test]
    fn test_render_propagates_error() {
        let pattern = PathPattern::parse("/users/:id").unwrap();
        let rendered: Result<String, &str> = pattern.render(|_| Err("missing"));
        assert_eq!(rendered.unwrap_err(), "missing");
    }

    #[test]
    fn test_colon_inside_segment_is_literal() {
        let pattern = PathPattern::parse("/v1/items:batch").unwrap();
        assert!(!pattern.has_placeholders());
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(matches!(
            PathPattern::parse("/users/:"),
            Err(ConfigError::InvalidPathTemplate { .. })
        ));
        assert!(matches!(
            PathPattern::parse("/a/:id/b/:id"),
            Err(ConfigError::InvalidPathTemplate { .. })
        ));
    }

    #[test]
    fn test_openapi_path() {
        let pattern = PathPattern::parse("/users/:userId").unwrap();
        assert_eq!(pattern.to_openapi_path(), "/users/{userId}");
        assert_eq!(pattern.to_string(), "/users/:userId");
    }
}
