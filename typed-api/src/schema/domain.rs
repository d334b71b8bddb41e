//! Value domains for individual parameters and fields.

use std::fmt;

use serde_json::{Number, Value};

/// A single literal value allowed by a [`ValueDomain::OneOf`] domain.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A string literal such as `'b2'`.
    String(String),
    /// A numeric literal.
    Number(Number),
    /// A boolean literal.
    Bool(bool),
}

impl Literal {
    /// Returns `true` if `value` is this literal.
    ///
    /// Numbers compare by value, so `2` matches `2.0`.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::String(a), Value::String(b)) => a == b,
            (Self::Bool(a), Value::Bool(b)) => a == b,
            (Self::Number(a), Value::Number(b)) => a == b || a.as_f64() == b.as_f64(),
            _ => false,
        }
    }

    /// Converts the literal to a JSON value.
    pub fn to_value(&self) -> Value {
        match self {
            Self::String(s) => Value::String(s.clone()),
            Self::Number(n) => Value::Number(n.clone()),
            Self::Bool(b) => Value::Bool(*b),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "'{s}'"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for Literal {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// The set of values a parameter or field accepts.
///
/// ## Examples
///
/// ```rust
/// use typed_api::ValueDomain;
///
/// let get = ValueDomain::one_of(["b1", "b2"]);
/// let post = ValueDomain::one_of(["b2", "b3"]);
/// assert_eq!(get.intersect(&post), Some(ValueDomain::one_of(["b2"])));
/// assert_eq!(ValueDomain::String.intersect(&ValueDomain::Number), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ValueDomain {
    /// Any JSON value.
    Any,
    /// Any string.
    String,
    /// Any number.
    Number,
    /// Any integral number.
    Integer,
    /// `true` or `false`.
    Boolean,
    /// Exactly one of the listed literals.
    OneOf(Vec<Literal>),
}

impl ValueDomain {
    /// Creates a literal union domain.
    pub fn one_of<I, L>(literals: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Literal>,
    {
        Self::OneOf(literals.into_iter().map(Into::into).collect())
    }

    /// Returns `true` if `value` lies within this domain.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Any => true,
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
            Self::OneOf(literals) => literals.iter().any(|l| l.matches(value)),
        }
    }

    /// Intersects two domains, returning `None` when no value is in both.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let domain = match (self, other) {
            (Self::Any, d) | (d, Self::Any) => d.clone(),
            (Self::OneOf(a), Self::OneOf(b)) => Self::OneOf(
                a.iter()
                    .filter(|l| b.iter().any(|m| m.matches(&l.to_value())))
                    .cloned()
                    .collect(),
            ),
            (Self::OneOf(literals), d) | (d, Self::OneOf(literals)) => Self::OneOf(
                literals
                    .iter()
                    .filter(|l| d.accepts(&l.to_value()))
                    .cloned()
                    .collect(),
            ),
            (Self::Number, Self::Integer) | (Self::Integer, Self::Number) => Self::Integer,
            (a, b) if a == b => a.clone(),
            _ => return None,
        };

        match &domain {
            Self::OneOf(literals) if literals.is_empty() => None,
            _ => Some(domain),
        }
    }
}

impl fmt::Display for ValueDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any value"),
            Self::String => f.write_str("a string"),
            Self::Number => f.write_str("a number"),
            Self::Integer => f.write_str("an integer"),
            Self::Boolean => f.write_str("a boolean"),
            Self::OneOf(literals) => {
                f.write_str("one of ")?;
                for (i, literal) in literals.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{literal}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts() {
        assert!(ValueDomain::Any.accepts(&json!([1, 2])));
        assert!(ValueDomain::String.accepts(&json!("fred")));
        assert!(!ValueDomain::String.accepts(&json!(42)));
        assert!(ValueDomain::Number.accepts(&json!(4.5)));
        assert!(ValueDomain::Integer.accepts(&json!(40)));
        assert!(!ValueDomain::Integer.accepts(&json!(4.5)));
        assert!(ValueDomain::Boolean.accepts(&json!(false)));
        assert!(ValueDomain::one_of(["b1", "b2"]).accepts(&json!("b2")));
        assert!(!ValueDomain::one_of(["b1", "b2"]).accepts(&json!("b3")));
    }

    #[test]
    fn test_numeric_literals_compare_by_value() {
        let domain = ValueDomain::one_of([1i64, 2]);
        assert!(domain.accepts(&json!(2.0)));
        assert!(!domain.accepts(&json!("2")));
    }

    #[test]
    fn test_intersect_literal_unions() {
        let get = ValueDomain::one_of(["b1", "b2"]);
        let post = ValueDomain::one_of(["b2", "b3"]);
        assert_eq!(get.intersect(&post), Some(ValueDomain::one_of(["b2"])));
        assert_eq!(
            ValueDomain::one_of(["b1"]).intersect(&ValueDomain::one_of(["b3"])),
            None
        );
    }

    #[test]
    fn test_intersect_literal_with_scalar() {
        let mixed = ValueDomain::OneOf(vec![
            Literal::from("x"),
            Literal::from(3i64),
            Literal::from(true),
        ]);
        assert_eq!(
            mixed.intersect(&ValueDomain::String),
            Some(ValueDomain::one_of(["x"]))
        );
        assert_eq!(
            ValueDomain::Number.intersect(&mixed),
            Some(ValueDomain::one_of([3i64]))
        );
        assert_eq!(
            mixed.intersect(&ValueDomain::Boolean),
            Some(ValueDomain::one_of([true]))
        );
    }

    #[test]
    fn test_intersect_scalars() {
        assert_eq!(
            ValueDomain::Any.intersect(&ValueDomain::String),
            Some(ValueDomain::String)
        );
        assert_eq!(
            ValueDomain::Number.intersect(&ValueDomain::Integer),
            Some(ValueDomain::Integer)
        );
        assert_eq!(
            ValueDomain::Boolean.intersect(&ValueDomain::Boolean),
            Some(ValueDomain::Boolean)
        );
        assert_eq!(ValueDomain::String.intersect(&ValueDomain::Number), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(ValueDomain::String.to_string(), "a string");
        assert_eq!(
            ValueDomain::one_of(["b1", "b2"]).to_string(),
            "one of 'b1' | 'b2'"
        );
    }
}
