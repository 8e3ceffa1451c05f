//! Values flowing through the coercer.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// An untyped value as supplied by the request.
///
/// Path and query values always arrive as [`RawValue::String`]; payload
/// values keep the kind JSON decoding gave them. Objects and arrays are
/// kept whole as [`RawValue::Composite`].
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// JSON integer, signed or unsigned 64-bit.
    Integer(i128),
    /// JSON number with a fractional part or an exponent.
    Float(f64),
    /// JSON boolean.
    Bool(bool),
    /// JSON string, or any path/query value.
    String(String),
    /// JSON object or array.
    Composite(Value),
    /// JSON `null`.
    Null,
}

impl RawValue {
    /// Returns `true` if the value counts as "not supplied": `null` or an
    /// empty string.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Returns a short name of the value's kind, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::String(_) => "string",
            Self::Composite(_) => "composite",
            Self::Null => "null",
        }
    }
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Self::Integer(i128::from(i)),
                (None, Some(u)) => Self::Integer(i128::from(u)),
                (None, None) => n.as_f64().map_or(Self::Null, Self::Float),
            },
            Value::String(s) => Self::String(s),
            composite @ (Value::Array(_) | Value::Object(_)) => Self::Composite(composite),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// A value after successful coercion.
///
/// `string`, `map` and `empty` fields all produce [`TypedValue::Text`];
/// a `map` field holds the JSON text of the supplied object or array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypedValue {
    /// An `int` field.
    Int(i64),
    /// A `float64` field.
    Float(f64),
    /// A `bool` field.
    Bool(bool),
    /// A `string`, `map` or `empty` field.
    Text(String),
}

impl TypedValue {
    /// Returns the integer, if this is an `int` value.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float, if this is a `float64` value.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the boolean, if this is a `bool` value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the text, if this is a `string`, `map` or `empty` value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_primitives() {
        assert_eq!(RawValue::from(json!(null)), RawValue::Null);
        assert_eq!(RawValue::from(json!(true)), RawValue::Bool(true));
        assert_eq!(RawValue::from(json!(42)), RawValue::Integer(42));
        assert_eq!(RawValue::from(json!(-7)), RawValue::Integer(-7));
        assert_eq!(RawValue::from(json!(2.5)), RawValue::Float(2.5));
        assert_eq!(RawValue::from(json!("hi")), RawValue::from("hi"));
    }

    #[test]
    fn test_from_json_large_unsigned_stays_integer() {
        assert_eq!(
            RawValue::from(json!(u64::MAX)),
            RawValue::Integer(18_446_744_073_709_551_615)
        );
        assert_eq!(RawValue::from(json!(i64::MIN)), RawValue::Integer(i128::from(i64::MIN)));
    }

    #[test]
    fn test_from_json_composite() {
        let object = json!({"a": 1});
        assert_eq!(RawValue::from(object.clone()), RawValue::Composite(object));

        let array = json!([1, 2]);
        assert_eq!(RawValue::from(array.clone()), RawValue::Composite(array));
    }

    #[test]
    fn test_is_absent() {
        assert!(RawValue::Null.is_absent());
        assert!(RawValue::from("").is_absent());
        assert!(!RawValue::from("x").is_absent());
        assert!(!RawValue::Integer(0).is_absent());
        assert!(!RawValue::Bool(false).is_absent());
    }

    #[test]
    fn test_typed_accessors() {
        assert_eq!(TypedValue::Int(3).as_i64(), Some(3));
        assert_eq!(TypedValue::Int(3).as_f64(), None);
        assert_eq!(TypedValue::Float(1.5).as_f64(), Some(1.5));
        assert_eq!(TypedValue::Bool(true).as_bool(), Some(true));
        assert_eq!(TypedValue::Text("a".into()).as_str(), Some("a"));
    }

    #[test]
    fn test_typed_serializes_untagged() {
        let json = serde_json::to_value(vec![
            TypedValue::Int(1),
            TypedValue::Bool(false),
            TypedValue::Text("x".into()),
        ])
        .unwrap();

        assert_eq!(json, json!([1, false, "x"]));
    }
}
