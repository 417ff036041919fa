//! Error types
//!
//! Two kinds of failure live here. `RuleError` is fatal: the rule set itself
//! is wrong (a non-numeric bound, a comparison between incompatible values)
//! and the caller gets an `Err`. `ValidationErrors` is the expected outcome
//! of checking bad input: per-field messages, collected and never thrown.

use std::fmt;
use thiserror::Error;

use crate::rules::RuleKind;

/// Result type alias for rule construction and evaluation
pub type Result<T> = std::result::Result<T, RuleError>;

// ============================================================================
// Fatal Rule Errors
// ============================================================================

/// Programming errors in a rule declaration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// A `max`/`min` argument that is not an integer or float.
    /// Raised while the validator is constructed.
    #[error("Value supplied to the \"{kind}\" rule of field `{field}` must be of type int or float, got `{argument}`")]
    InvalidBound {
        field: String,
        kind: RuleKind,
        argument: String,
    },

    /// A comparison rule whose two values cannot be ordered against each other.
    /// Raised when that rule runs.
    #[error("The two values in a \"{}\" comparison must be of the same type. Found {left} ({field}) and {right} ({other}).", .kind.description())]
    TypeMismatch {
        field: String,
        other: String,
        kind: RuleKind,
        left: &'static str,
        right: &'static str,
    },

    /// A comparison rule naming a field absent from the data
    #[error("Field `{field}` is compared against `{other}` by the \"{kind}\" rule, but `{other}` is not in the data")]
    UnknownField {
        field: String,
        other: String,
        kind: RuleKind,
    },
}

impl RuleError {
    /// Returns true if the error was raised while parsing rule specs
    pub fn is_configuration(&self) -> bool {
        matches!(self, RuleError::InvalidBound { .. })
    }

    /// Returns true if a comparison rule met incompatible values
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, RuleError::TypeMismatch { .. })
    }

    /// Field the failing rule was declared on
    pub fn field(&self) -> &str {
        match self {
            RuleError::InvalidBound { field, .. }
            | RuleError::TypeMismatch { field, .. }
            | RuleError::UnknownField { field, .. } => field,
        }
    }
}

// ============================================================================
// Collected Validation Errors
// ============================================================================

/// Failure messages grouped by field
///
/// Fields keep the order in which they first failed, which is the rule
/// declaration order; messages within a field keep rule order. A field with
/// no failures is never present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: Vec<(String, Vec<String>)>,
}

impl ValidationErrors {
    /// Create a new empty collection
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of failing fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Total number of messages across all fields
    pub fn message_count(&self) -> usize {
        self.fields.iter().map(|(_, messages)| messages.len()).sum()
    }

    /// Append a message to a field's list
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        match self.fields.iter_mut().find(|(name, _)| name == field) {
            Some((_, messages)) => messages.push(message),
            None => self.fields.push((field.to_string(), vec![message])),
        }
    }

    /// Messages for one field
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, messages)| messages.as_slice())
    }

    /// Check if a field has failed any rule
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Iterate `(field, messages)` in field order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(name, messages)| (name.as_str(), messages.as_slice()))
    }

    /// Field names in order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Flatten to a single list: field order, then rule order
    pub fn compact(&self) -> Vec<String> {
        self.fields
            .iter()
            .flat_map(|(_, messages)| messages.iter().cloned())
            .collect()
    }

    /// Remove every message
    pub fn clear(&mut self) {
        self.fields.clear();
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} validation error(s) in {} field(s)",
            self.message_count(),
            self.len()
        )
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = (&'a str, &'a [String]);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a [String])> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ValidationErrors {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, messages) in &self.fields {
            map.serialize_entry(field, messages)?;
        }
        map.end()
    }
}

// ============================================================================
// Error Report
// ============================================================================

/// Either view of the collected errors
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ErrorReport {
    /// Field → messages
    Grouped(ValidationErrors),
    /// Every message in field order, then rule order
    Compact(Vec<String>),
}

impl ErrorReport {
    /// Build the requested view
    pub fn from_errors(errors: &ValidationErrors, compact: bool) -> Self {
        if compact {
            ErrorReport::Compact(errors.compact())
        } else {
            ErrorReport::Grouped(errors.clone())
        }
    }

    /// Check if the report holds no messages
    pub fn is_empty(&self) -> bool {
        match self {
            ErrorReport::Grouped(errors) => errors.is_empty(),
            ErrorReport::Compact(messages) => messages.is_empty(),
        }
    }
}
