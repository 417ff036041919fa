//! Runtime values checked by rules
//!
//! Field data arrives as loosely typed values (form fields, decoded API
//! payloads). `Value` is the closed set of shapes a rule can see.

use std::fmt;

// ============================================================================
// Value Enum - Runtime values to be validated
// ============================================================================

/// Runtime value of a single field
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null or absent value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (i64)
    Int(i64),
    /// Float value (f64)
    Float(f64),
    /// String value
    String(String),
    /// Sequence or set of values
    List(Vec<Value>),
    /// Object/Dictionary (key-value pairs)
    Object(Vec<(String, Value)>),
}

impl Value {
    /// Get human-readable type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Null or the empty string.
    ///
    /// `in` and `not_in` let blank values through.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Blank, `false`, zero, or an empty list/object.
    ///
    /// `email` and `numeric` skip these values entirely.
    pub fn is_empty_value(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(b) => !b,
            Self::Int(i) => *i == 0,
            Self::Float(f) => *f == 0.0,
            Self::String(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Object(entries) => entries.is_empty(),
        }
    }

    /// Integer or float. Booleans are not numbers here.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    /// Sequence or set.
    pub fn is_collection(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Size used by length-based comparisons: characters for strings, items
    /// for collections.
    pub fn size(&self) -> Option<usize> {
        match self {
            Self::String(s) => Some(s.chars().count()),
            Self::List(items) => Some(items.len()),
            _ => None,
        }
    }

    /// Numeric value widened to f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// String form used for set membership and numeric pattern checks.
    ///
    /// `3` and `"3"` stringify the same; `3.0` does not.
    pub fn to_rule_string(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Same concrete variant, ignoring payload
    pub fn same_type(&self, other: &Value) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Shortest round-trip float text that always carries a fraction or exponent
pub(crate) fn format_float(f: f64) -> String {
    format!("{:?}", f)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", format_float(*x)),
            Self::String(s) => write!(f, "\"{}\"", s),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Self::Object(fields) => {
                write!(f, "{{")?;
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{}\": {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(fields) => Value::Object(
                fields.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}

#[cfg(feature = "serde")]
impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(i) => serde_json::Value::Number(i.into()),
            Value::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s),
            Value::List(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Object(fields) => serde_json::Value::Object(
                fields.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_name() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::Bool(true).type_name(), "boolean");
        assert_eq!(Value::Int(42).type_name(), "integer");
        assert_eq!(Value::Float(2.5).type_name(), "float");
        assert_eq!(Value::from("test").type_name(), "string");
        assert_eq!(Value::List(vec![]).type_name(), "array");
        assert_eq!(Value::Object(vec![]).type_name(), "object");
    }

    #[test]
    fn test_blank() {
        assert!(Value::Null.is_blank());
        assert!(Value::from("").is_blank());
        assert!(!Value::from("    ").is_blank());
        assert!(!Value::Int(0).is_blank());
        assert!(!Value::List(vec![]).is_blank());
    }

    #[test]
    fn test_empty_value() {
        assert!(Value::Null.is_empty_value());
        assert!(Value::from("").is_empty_value());
        assert!(Value::Bool(false).is_empty_value());
        assert!(Value::Int(0).is_empty_value());
        assert!(Value::Float(0.0).is_empty_value());
        assert!(Value::List(vec![]).is_empty_value());
        assert!(Value::Object(vec![]).is_empty_value());

        assert!(!Value::from(" ").is_empty_value());
        assert!(!Value::Bool(true).is_empty_value());
        assert!(!Value::Int(-1).is_empty_value());
        assert!(!Value::List(vec![Value::Null]).is_empty_value());
    }

    #[test]
    fn test_capabilities() {
        assert!(Value::Int(1).is_numeric());
        assert!(Value::Float(1.5).is_numeric());
        assert!(!Value::Bool(true).is_numeric());
        assert!(!Value::from("1").is_numeric());
        assert!(Value::from(vec![1, 2]).is_collection());
        assert!(!Value::from("ab").is_collection());
    }

    #[test]
    fn test_size_counts_chars() {
        assert_eq!(Value::from("héllo").size(), Some(5));
        assert_eq!(Value::from(vec![1, 2, 3]).size(), Some(3));
        assert_eq!(Value::Int(3).size(), None);
    }

    #[test]
    fn test_rule_string() {
        assert_eq!(Value::from("two").to_rule_string(), "two");
        assert_eq!(Value::Int(3).to_rule_string(), "3");
        assert_eq!(Value::Float(3.0).to_rule_string(), "3.0");
        assert_eq!(Value::Float(0.1).to_rule_string(), "0.1");
        assert_eq!(Value::Float(-12300000.0).to_rule_string(), "-12300000.0");
        assert_eq!(Value::Bool(true).to_rule_string(), "true");
        assert_eq!(Value::from(vec!["a", "b"]).to_rule_string(), "[\"a\", \"b\"]");
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(4)), Value::Int(4));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_conversion() {
        let json = serde_json::json!({"a": [1, 2.5, "x", null, true]});
        let value = Value::from(json.clone());
        assert_eq!(
            value,
            Value::Object(vec![(
                "a".to_string(),
                Value::List(vec![
                    Value::Int(1),
                    Value::Float(2.5),
                    Value::from("x"),
                    Value::Null,
                    Value::Bool(true),
                ])
            )])
        );
        assert_eq!(serde_json::Value::from(value), json);
    }
}
