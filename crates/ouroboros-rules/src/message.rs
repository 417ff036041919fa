//! Error message templates and per-field overrides
//!
//! Templates use `{#name#}` placeholders. Substitution is plain string
//! replacement and happens once, when a rule is built.

use std::collections::HashMap;

use crate::rules::RuleKind;

// ============================================================================
// Placeholders
// ============================================================================

/// Name of the field the rule is declared on
pub const FIELDNAME: &str = "{#fieldname#}";
/// Numeric bound of `max`/`min`
pub const VALUE: &str = "{#value#}";
/// Allowed/denied list of `in`/`not_in`, joined with `", "`
pub const VALUES: &str = "{#values#}";
/// Sibling field of a comparison rule
pub const OTHER_FIELDNAME: &str = "{#otherfieldname#}";

/// Built-in template for a rule kind
pub fn default_template(kind: RuleKind) -> &'static str {
    match kind {
        RuleKind::Required => "Field {#fieldname#} is required",
        RuleKind::Email => "Field {#fieldname#} is not a valid email address",
        RuleKind::Numeric => "Field {#fieldname#} accepts numbers only",
        RuleKind::In => "Field {#fieldname#} accepts only these values: {#values#}",
        RuleKind::NotIn => "Field {#fieldname#} must not be one of these values: {#values#}",
        RuleKind::Max => "Field {#fieldname#} has a maximum of: {#value#}",
        RuleKind::Min => "Field {#fieldname#} has a minimum of: {#value#}",
        RuleKind::Boolean => {
            r#"Field {#fieldname#} must be one of these values: true, false, 0, 1, "0" or "1""#
        }
        RuleKind::Lt => "Field {#fieldname#} must be less than the field {#otherfieldname#} in size",
        RuleKind::Lte => {
            "Field {#fieldname#} must be less than or equal to the field {#otherfieldname#} in size"
        }
        RuleKind::Gt => {
            "Field {#fieldname#} must be greater than the field {#otherfieldname#} in size"
        }
        RuleKind::Gte => {
            "Field {#fieldname#} must be greater than or equal to the field {#otherfieldname#} in size"
        }
    }
}

// ============================================================================
// Message Template
// ============================================================================

/// A template with its placeholder values bound
#[derive(Debug, Clone)]
pub struct MessageTemplate<'a> {
    template: &'a str,
    substitutions: Vec<(&'static str, String)>,
}

impl<'a> MessageTemplate<'a> {
    /// Start from a template, binding the field name
    pub fn new(template: &'a str, field: &str) -> Self {
        Self {
            template,
            substitutions: vec![(FIELDNAME, field.to_string())],
        }
    }

    /// Bind an extra placeholder
    pub fn with(mut self, placeholder: &'static str, value: impl Into<String>) -> Self {
        self.substitutions.push((placeholder, value.into()));
        self
    }

    /// Substitute every bound placeholder. Unbound placeholders stay as-is.
    pub fn render(&self) -> String {
        self.substitutions
            .iter()
            .fold(self.template.to_string(), |message, (placeholder, value)| {
                message.replace(placeholder, value)
            })
    }
}

// ============================================================================
// Message Overrides
// ============================================================================

/// Literal per-(field, rule) messages, keyed by `"field.rule"`
///
/// The rule kind is taken after the last `.`, so field names may contain
/// dots themselves. Keys with no `.` are ignored.
#[derive(Debug, Clone, Default)]
pub struct MessageOverrides {
    by_field: HashMap<String, HashMap<String, String>>,
}

impl MessageOverrides {
    /// Create an empty override set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `"field.rule" -> message` pairs
    pub fn parse<I, K, V>(messages: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut overrides = Self::new();
        for (key, message) in messages {
            let key = key.as_ref();
            match key.rsplit_once('.') {
                Some((field, rule)) => overrides.insert(field, rule, message),
                None => {
                    tracing::warn!("Ignoring message override `{}`: expected `field.rule`", key);
                }
            }
        }
        overrides
    }

    /// Set the message for one (field, rule) pair
    pub fn insert(&mut self, field: &str, rule: &str, message: impl Into<String>) {
        self.by_field
            .entry(field.to_string())
            .or_default()
            .insert(rule.to_string(), message.into());
    }

    /// Look up the override for one (field, rule) pair
    pub fn get(&self, field: &str, rule: &str) -> Option<&str> {
        self.by_field
            .get(field)
            .and_then(|rules| rules.get(rule))
            .map(|s| s.as_str())
    }
}
