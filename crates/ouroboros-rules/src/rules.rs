//! Rule kinds and rule evaluation
//!
//! Every rule a spec string can declare is a [`RuleKind`]. A constructed
//! [`Rule`] carries the field name, a snapshot of the field's value, its
//! resolved message, and a [`RuleCheck`] holding the kind-specific
//! configuration (a bound, a value list, or a sibling field name).
//!
//! Rules are immutable once built. Comparison rules read sibling values
//! through a [`RuleContext`] handed to [`Rule::validate`].

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::errors::{Result, RuleError};
use crate::formats;
use crate::types::{format_float, Value};

// ============================================================================
// Rule Registry
// ============================================================================

/// Every rule kind recognised in a spec string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Value must be present and non-empty
    Required,
    /// Value must look like an email address
    Email,
    /// Value must be a number or the text of one
    Numeric,
    /// Stringified value must be in a list
    In,
    /// Stringified value must not be in a list
    NotIn,
    /// Length or numeric value at most a bound
    Max,
    /// Length or numeric value at least a bound
    Min,
    /// Value must be boolean-like
    Boolean,
    /// Strictly smaller than a sibling field
    Lt,
    /// Smaller than or equal to a sibling field
    Lte,
    /// Strictly larger than a sibling field
    Gt,
    /// Larger than or equal to a sibling field
    Gte,
}

impl RuleKind {
    /// The full registry, in documentation order
    pub const ALL: [RuleKind; 12] = [
        RuleKind::Required,
        RuleKind::Email,
        RuleKind::Numeric,
        RuleKind::In,
        RuleKind::NotIn,
        RuleKind::Max,
        RuleKind::Min,
        RuleKind::Boolean,
        RuleKind::Lt,
        RuleKind::Lte,
        RuleKind::Gt,
        RuleKind::Gte,
    ];

    /// Name as written in a spec string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Email => "email",
            Self::Numeric => "numeric",
            Self::In => "in",
            Self::NotIn => "not_in",
            Self::Max => "max",
            Self::Min => "min",
            Self::Boolean => "boolean",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Gt => "gt",
            Self::Gte => "gte",
        }
    }

    /// Look up a registered kind by name. Unregistered names give `None`.
    pub fn parse(name: &str) -> Option<RuleKind> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// Check if the kind compares against a sibling field
    pub fn is_comparison(&self) -> bool {
        matches!(self, Self::Lt | Self::Lte | Self::Gt | Self::Gte)
    }

    /// Human-readable name used in error text
    pub fn description(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Email => "email",
            Self::Numeric => "numeric",
            Self::In => "in",
            Self::NotIn => "not in",
            Self::Max => "max",
            Self::Min => "min",
            Self::Boolean => "boolean",
            Self::Lt => "less than",
            Self::Lte => "less than or equal",
            Self::Gt => "greater than",
            Self::Gte => "greater than or equal",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for names outside the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRuleKind(pub String);

impl fmt::Display for UnknownRuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown rule kind `{}`", self.0)
    }
}

impl std::error::Error for UnknownRuleKind {}

impl FromStr for RuleKind {
    type Err = UnknownRuleKind;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        RuleKind::parse(s).ok_or_else(|| UnknownRuleKind(s.to_string()))
    }
}

// ============================================================================
// Numeric Bound
// ============================================================================

/// Threshold of a `max`/`min` rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Int(i64),
    Float(f64),
}

impl Bound {
    /// Parse a rule argument: float if it contains `.`, integer otherwise.
    /// `None` when the text is not a number of that shape.
    pub fn parse(argument: &str) -> Option<Bound> {
        if argument.contains('.') {
            argument.parse::<f64>().ok().map(Bound::Float)
        } else {
            argument.parse::<i64>().ok().map(Bound::Int)
        }
    }

    fn as_f64(&self) -> f64 {
        match self {
            Bound::Int(i) => *i as f64,
            Bound::Float(f) => *f,
        }
    }

    /// Order a field value (length or number) against the bound
    fn compare(&self, value: &Value) -> Option<Ordering> {
        match (value, self) {
            (Value::Int(v), Bound::Int(b)) => Some(v.cmp(b)),
            (Value::Float(_), _) | (Value::Int(_), Bound::Float(_)) => {
                value.as_f64()?.partial_cmp(&self.as_f64())
            }
            _ => {
                let size = value.size()?;
                match self {
                    Bound::Int(b) => Some((size as i64).cmp(b)),
                    Bound::Float(b) => (size as f64).partial_cmp(b),
                }
            }
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Int(i) => write!(f, "{}", i),
            Bound::Float(x) => f.write_str(&format_float(*x)),
        }
    }
}

// ============================================================================
// Rule Context
// ============================================================================

/// Read-only view of the full data mapping, for cross-field rules
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    data: &'a HashMap<String, Value>,
}

impl<'a> RuleContext<'a> {
    /// Wrap a data mapping
    pub fn new(data: &'a HashMap<String, Value>) -> Self {
        Self { data }
    }

    /// Get a field value by name
    pub fn get_field(&self, name: &str) -> Option<&'a Value> {
        self.data.get(name)
    }
}

// ============================================================================
// Rule Checks
// ============================================================================

/// Kind-specific configuration and pass condition
#[derive(Debug, Clone, PartialEq)]
pub enum RuleCheck {
    Required,
    Email,
    Numeric,
    In { values: Vec<String> },
    NotIn { values: Vec<String> },
    Max { bound: Bound },
    Min { bound: Bound },
    Boolean,
    Lt { other: String },
    Lte { other: String },
    Gt { other: String },
    Gte { other: String },
}

impl RuleCheck {
    /// Kind of this check
    pub fn kind(&self) -> RuleKind {
        match self {
            Self::Required => RuleKind::Required,
            Self::Email => RuleKind::Email,
            Self::Numeric => RuleKind::Numeric,
            Self::In { .. } => RuleKind::In,
            Self::NotIn { .. } => RuleKind::NotIn,
            Self::Max { .. } => RuleKind::Max,
            Self::Min { .. } => RuleKind::Min,
            Self::Boolean => RuleKind::Boolean,
            Self::Lt { .. } => RuleKind::Lt,
            Self::Lte { .. } => RuleKind::Lte,
            Self::Gt { .. } => RuleKind::Gt,
            Self::Gte { .. } => RuleKind::Gte,
        }
    }

    /// Sibling field of a comparison check
    pub fn other_field(&self) -> Option<&str> {
        match self {
            Self::Lt { other } | Self::Lte { other } | Self::Gt { other } | Self::Gte { other } => {
                Some(other)
            }
            _ => None,
        }
    }

    /// Whether `value` passes. `Err` only for comparison checks that cannot
    /// order the two values.
    pub fn passes(&self, field: &str, value: &Value, ctx: &RuleContext<'_>) -> Result<bool> {
        let passed = match self {
            Self::Required => check_required(value),
            Self::Email => check_email(value),
            Self::Numeric => check_numeric(value),
            Self::In { values } => value.is_blank() || values.contains(&value.to_rule_string()),
            Self::NotIn { values } => {
                value.is_blank() || !values.contains(&value.to_rule_string())
            }
            Self::Max { bound } => {
                value.is_null()
                    || matches!(bound.compare(value), Some(Ordering::Less | Ordering::Equal))
            }
            Self::Min { bound } => {
                value.is_null()
                    || matches!(bound.compare(value), Some(Ordering::Greater | Ordering::Equal))
            }
            Self::Boolean => check_boolean(value),
            Self::Lt { other } => {
                compare_fields(self.kind(), field, value, other, ctx)? == Ordering::Less
            }
            Self::Lte { other } => {
                compare_fields(self.kind(), field, value, other, ctx)? != Ordering::Greater
            }
            Self::Gt { other } => {
                compare_fields(self.kind(), field, value, other, ctx)? == Ordering::Greater
            }
            Self::Gte { other } => {
                compare_fields(self.kind(), field, value, other, ctx)? != Ordering::Less
            }
        };
        Ok(passed)
    }
}

fn check_required(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::List(items) => !items.is_empty(),
        _ => true,
    }
}

fn check_email(value: &Value) -> bool {
    if value.is_empty_value() {
        return true;
    }
    match value {
        Value::String(s) => formats::validate_email(s),
        _ => false,
    }
}

fn check_numeric(value: &Value) -> bool {
    if value.is_empty_value() {
        return true;
    }
    match value {
        Value::String(_) | Value::Int(_) | Value::Float(_) => {
            formats::validate_numeric(&value.to_rule_string())
        }
        _ => false,
    }
}

fn check_boolean(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(_) => true,
        Value::Int(i) => *i == 0 || *i == 1,
        Value::Float(f) => *f == 0.0 || *f == 1.0,
        Value::String(s) => matches!(s.as_str(), "" | "0" | "1"),
        _ => false,
    }
}

/// Order a field against its sibling.
///
/// Numbers order numerically; strings and collections order by size. The
/// pair must be comparably typed: both collections, both numbers, or the
/// same type otherwise. Two values of a type that has neither a size nor
/// a numeric value (null, boolean, object) never satisfy the comparison.
fn compare_fields(
    kind: RuleKind,
    field: &str,
    value: &Value,
    other: &str,
    ctx: &RuleContext<'_>,
) -> Result<Ordering> {
    let other_value = ctx.get_field(other).ok_or_else(|| RuleError::UnknownField {
        field: field.to_string(),
        other: other.to_string(),
        kind,
    })?;

    let comparable = if value.is_collection() || other_value.is_collection() {
        value.is_collection() && other_value.is_collection()
    } else if value.is_numeric() || other_value.is_numeric() {
        value.is_numeric() && other_value.is_numeric()
    } else {
        value.same_type(other_value)
    };

    if !comparable {
        return Err(RuleError::TypeMismatch {
            field: field.to_string(),
            other: other.to_string(),
            kind,
            left: value.type_name(),
            right: other_value.type_name(),
        });
    }

    let ordering = match (value, other_value) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        _ if value.is_numeric() => value
            .as_f64()
            .zip(other_value.as_f64())
            .and_then(|(a, b)| a.partial_cmp(&b)),
        _ => value
            .size()
            .zip(other_value.size())
            .map(|(a, b)| a.cmp(&b)),
    };

    // Unorderable pairs (NaN, sizeless types) fail every comparison kind.
    Ok(ordering.unwrap_or(match kind {
        RuleKind::Lt | RuleKind::Lte => Ordering::Greater,
        _ => Ordering::Less,
    }))
}

// ============================================================================
// Rule Instance
// ============================================================================

/// Result of running one rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<'a> {
    /// The value satisfied the rule
    Pass,
    /// The value failed; carries the rule's message
    Fail(&'a str),
}

impl Outcome<'_> {
    /// Check if the rule passed
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }
}

/// One rule bound to one field
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    field: String,
    value: Value,
    message: String,
    check: RuleCheck,
}

impl Rule {
    /// Build a rule from its parts. `message` is final; no templating is
    /// applied here.
    pub fn new(
        field: impl Into<String>,
        value: Value,
        message: impl Into<String>,
        check: RuleCheck,
    ) -> Self {
        Self {
            field: field.into(),
            value,
            message: message.into(),
            check,
        }
    }

    /// Field this rule is declared on
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Value snapshot taken at construction
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Message reported on failure
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Kind-specific configuration
    pub fn check(&self) -> &RuleCheck {
        &self.check
    }

    /// Kind of this rule
    pub fn kind(&self) -> RuleKind {
        self.check.kind()
    }

    /// Run the rule against its snapshot
    pub fn validate(&self, ctx: &RuleContext<'_>) -> Result<Outcome<'_>> {
        if self.check.passes(&self.field, &self.value, ctx)? {
            Ok(Outcome::Pass)
        } else {
            Ok(Outcome::Fail(&self.message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(check: RuleCheck, value: impl Into<Value>) -> bool {
        let data = HashMap::new();
        check.passes("field", &value.into(), &RuleContext::new(&data)).unwrap()
    }

    fn compare(check: RuleCheck, left: impl Into<Value>, right: impl Into<Value>) -> Result<bool> {
        let left = left.into();
        let data = HashMap::from([
            ("field1".to_string(), left.clone()),
            ("field2".to_string(), right.into()),
        ]);
        check.passes("field1", &left, &RuleContext::new(&data))
    }

    fn lt() -> RuleCheck {
        RuleCheck::Lt { other: "field2".to_string() }
    }

    #[test]
    fn test_registry_round_trip() {
        for kind in RuleKind::ALL {
            assert_eq!(RuleKind::parse(kind.as_str()), Some(kind));
            assert_eq!(kind.as_str().parse::<RuleKind>(), Ok(kind));
        }
        assert_eq!(RuleKind::parse("unique"), None);
        assert_eq!(RuleKind::parse("REQUIRED"), None);
        assert!("between".parse::<RuleKind>().is_err());
        assert!(RuleKind::Gte.is_comparison());
        assert!(!RuleKind::Max.is_comparison());
    }

    #[test]
    fn test_bound_parse() {
        assert_eq!(Bound::parse("10"), Some(Bound::Int(10)));
        assert_eq!(Bound::parse("-3"), Some(Bound::Int(-3)));
        assert_eq!(Bound::parse("14.5"), Some(Bound::Float(14.5)));
        assert_eq!(Bound::parse("abc"), None);
        assert_eq!(Bound::parse("1e5"), None);
        assert_eq!(Bound::parse(""), None);
        assert_eq!(Bound::Float(14.0).to_string(), "14.0");
        assert_eq!(Bound::Int(8).to_string(), "8");
    }

    #[test]
    fn test_required() {
        assert!(run(RuleCheck::Required, "x"));
        assert!(run(RuleCheck::Required, "    "));
        assert!(run(RuleCheck::Required, 0));
        assert!(run(RuleCheck::Required, false));
        assert!(run(RuleCheck::Required, vec![1]));
        assert!(!run(RuleCheck::Required, ""));
        assert!(!run(RuleCheck::Required, Value::Null));
        assert!(!run(RuleCheck::Required, Value::List(vec![])));
    }

    #[test]
    fn test_email() {
        assert!(run(RuleCheck::Email, "mail@mail.com"));
        assert!(run(RuleCheck::Email, ""));
        assert!(run(RuleCheck::Email, Value::Null));
        assert!(!run(RuleCheck::Email, "mail@mail"));
        assert!(!run(RuleCheck::Email, "    "));
        assert!(!run(RuleCheck::Email, 42));
        assert!(!run(RuleCheck::Email, true));
        assert!(!run(RuleCheck::Email, vec!["mail@mail.com"]));
    }

    #[test]
    fn test_email_skips_empty_values() {
        for value in [
            Value::Int(0),
            Value::Bool(false),
            Value::List(vec![]),
            Value::Object(vec![]),
        ] {
            assert!(run(RuleCheck::Email, value.clone()), "{value} should pass");
        }
    }

    #[test]
    fn test_numeric() {
        for value in [
            Value::from("123"),
            Value::from("-123.4"),
            Value::from("123e5"),
            Value::Int(123),
            Value::Float(-123.4),
            Value::Float(123e-5),
            Value::Int(0),
            Value::from(""),
            Value::Null,
            Value::Bool(false),
            Value::List(vec![]),
            Value::Object(vec![]),
        ] {
            assert!(run(RuleCheck::Numeric, value.clone()), "{value} should pass");
        }
        for value in [
            Value::from("abc"),
            Value::from("123abc"),
            Value::from("   "),
            Value::Bool(true),
            Value::from(vec![1]),
        ] {
            assert!(!run(RuleCheck::Numeric, value.clone()), "{value} should fail");
        }
    }

    #[test]
    fn test_in_and_not_in_stringify() {
        let allowed = || RuleCheck::In { values: vec!["3".into(), "6".into(), "10e-2".into()] };
        assert!(run(allowed(), 3));
        assert!(run(allowed(), "3"));
        assert!(run(allowed(), ""));
        assert!(run(allowed(), Value::Null));
        assert!(!run(allowed(), 3.0));
        assert!(!run(allowed(), "    "));

        let denied = || RuleCheck::NotIn { values: vec!["one".into(), "two".into()] };
        assert!(run(denied(), "four"));
        assert!(run(denied(), ""));
        assert!(run(denied(), "    "));
        assert!(!run(denied(), "two"));
    }

    #[test]
    fn test_max_and_min() {
        let max = |b| RuleCheck::Max { bound: Bound::Int(b) };
        assert!(run(max(5), vec![1, 2, 3, 4, 5]));
        assert!(!run(max(5), vec![1, 2, 3, 4, 5, 6]));
        assert!(run(max(5), "12345"));
        assert!(!run(max(5), "123456"));
        assert!(run(max(5), 5));
        assert!(!run(max(5), 6));
        assert!(!run(max(15), 15.5));
        assert!(!run(RuleCheck::Max { bound: Bound::Float(14.5) }, 15));
        assert!(run(max(8), Value::Null));
        assert!(!run(max(8), true));
        assert!(!run(max(8), Value::Object(vec![])));

        let min = |b| RuleCheck::Min { bound: Bound::Int(b) };
        assert!(run(min(5), 6));
        assert!(run(min(4), "word"));
        assert!(!run(min(7), vec![1, 2, 3, 4, 5, 6]));
        assert!(!run(min(2), ""));
    }

    #[test]
    fn test_boolean() {
        for value in [
            Value::Bool(true),
            Value::Bool(false),
            Value::Int(0),
            Value::Int(1),
            Value::from("0"),
            Value::from("1"),
            Value::from(""),
            Value::Null,
        ] {
            assert!(run(RuleCheck::Boolean, value.clone()), "{value} should pass");
        }
        for value in [Value::from("3"), Value::Int(3), Value::from("True"), Value::from("    ")] {
            assert!(!run(RuleCheck::Boolean, value.clone()), "{value} should fail");
        }
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(compare(lt(), 12, 15), Ok(true));
        assert_eq!(compare(lt(), 15, 15), Ok(false));
        assert_eq!(compare(lt(), 12, 12.5), Ok(true));
        assert_eq!(compare(lt(), "word", "word word"), Ok(true));
        assert_eq!(compare(lt(), "", "    "), Ok(true));
        assert_eq!(compare(lt(), vec![1, 2, 3, 4, 5], vec![1, 2, 3]), Ok(false));

        let lte = RuleCheck::Lte { other: "field2".to_string() };
        assert_eq!(compare(lte.clone(), 15, 15), Ok(true));
        assert_eq!(compare(lte, 15.1, 15), Ok(false));

        let gt = RuleCheck::Gt { other: "field2".to_string() };
        assert_eq!(compare(gt.clone(), 12.5, 12), Ok(true));
        assert_eq!(compare(gt, 15, 15), Ok(false));

        let gte = RuleCheck::Gte { other: "field2".to_string() };
        assert_eq!(compare(gte.clone(), vec![1, 2, 3, 4], vec![4, 3, 2, 1]), Ok(true));
        assert_eq!(compare(gte, vec![1, 2, 3], vec![1, 2, 3, 4, 5]), Ok(false));
    }

    #[test]
    fn test_comparison_type_mismatch() {
        let err = compare(lt(), vec![1, 2, 3], "abc").unwrap_err();
        assert!(err.is_type_mismatch());
        assert!(compare(lt(), "abc", vec![1, 2, 3]).unwrap_err().is_type_mismatch());
        assert!(compare(lt(), 12, "15").unwrap_err().is_type_mismatch());
        assert!(compare(lt(), "", 20).unwrap_err().is_type_mismatch());
        assert!(compare(lt(), Value::Null, 20).unwrap_err().is_type_mismatch());
        assert!(compare(lt(), true, "x").unwrap_err().is_type_mismatch());
    }

    #[test]
    fn test_comparison_sizeless_same_type_fails() {
        assert_eq!(compare(lt(), Value::Null, Value::Null), Ok(false));
        assert_eq!(compare(RuleCheck::Gte { other: "field2".to_string() }, true, true), Ok(false));
    }

    #[test]
    fn test_comparison_unknown_sibling() {
        let data = HashMap::new();
        let err = RuleCheck::Gt { other: "missing".to_string() }
            .passes("field1", &Value::Int(1), &RuleContext::new(&data))
            .unwrap_err();
        assert!(matches!(err, RuleError::UnknownField { ref other, .. } if other == "missing"));
    }

    #[test]
    fn test_rule_validate_returns_message() {
        let data = HashMap::new();
        let ctx = RuleContext::new(&data);
        let rule =
            Rule::new("name", Value::from(""), "Field name is required", RuleCheck::Required);
        assert_eq!(rule.kind(), RuleKind::Required);
        assert_eq!(rule.validate(&ctx), Ok(Outcome::Fail("Field name is required")));

        let rule = Rule::new("name", Value::from("ada"), "unused", RuleCheck::Required);
        assert!(rule.validate(&ctx).unwrap().is_pass());
    }
}
