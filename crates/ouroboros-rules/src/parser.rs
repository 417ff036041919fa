//! Rule-spec parsing
//!
//! A spec string is `rule1[:arg1]|rule2[:arg2]|...`. Whitespace around
//! segments, kinds and arguments is ignored, empty segments are skipped, and
//! kinds outside the registry are dropped without error.

use crate::config::ValidatorConfig;
use crate::errors::{Result, RuleError};
use crate::message::{MessageOverrides, MessageTemplate, OTHER_FIELDNAME, VALUE, VALUES};
use crate::rules::{Bound, Rule, RuleCheck, RuleKind};
use crate::types::Value;

// ============================================================================
// Tokens
// ============================================================================

/// One registered `kind[:argument]` segment of a spec string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleToken<'a> {
    /// Registered rule kind
    pub kind: RuleKind,
    /// Trimmed argument; empty when the segment had no `:`
    pub argument: &'a str,
}

/// Split a spec string into registered rule tokens, in declaration order
///
/// # Example
/// ```
/// use ouroboros_rules::parser::tokenize;
/// use ouroboros_rules::RuleKind;
///
/// let tokens = tokenize(" required | max : 10 | unique");
/// assert_eq!(tokens.len(), 2);
/// assert_eq!(tokens[1].kind, RuleKind::Max);
/// assert_eq!(tokens[1].argument, "10");
/// ```
pub fn tokenize(spec: &str) -> Vec<RuleToken<'_>> {
    spec.split('|')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .filter_map(|segment| {
            let (name, argument) = match segment.split_once(':') {
                Some((name, argument)) => (name.trim(), argument.trim()),
                None => (segment, ""),
            };
            match RuleKind::parse(name) {
                Some(kind) => Some(RuleToken { kind, argument }),
                None => {
                    tracing::debug!("Skipping unregistered rule `{}` in spec `{}`", name, spec);
                    None
                }
            }
        })
        .collect()
}

/// Split an `in`/`not_in` argument on `,`, removing all whitespace
pub fn split_values(argument: &str) -> Vec<String> {
    argument
        .split(',')
        .map(|item| item.chars().filter(|c| !c.is_whitespace()).collect())
        .collect()
}

// ============================================================================
// Rule Construction
// ============================================================================

/// Build the rule for one token on one field
///
/// The message is the per-field override when present, otherwise the kind's
/// template (from `config`, falling back to the built-in one) rendered with
/// the field name and the kind's configuration.
pub fn build_rule(
    field: &str,
    token: &RuleToken<'_>,
    value: &Value,
    overrides: &MessageOverrides,
    config: &ValidatorConfig,
) -> Result<Rule> {
    let check = build_check(field, token)?;
    let message = match overrides.get(field, token.kind.as_str()) {
        Some(message) => message.to_string(),
        None => render_message(field, &check, config),
    };
    Ok(Rule::new(field, value.clone(), message, check))
}

fn build_check(field: &str, token: &RuleToken<'_>) -> Result<RuleCheck> {
    let bound = || {
        Bound::parse(token.argument).ok_or_else(|| RuleError::InvalidBound {
            field: field.to_string(),
            kind: token.kind,
            argument: token.argument.to_string(),
        })
    };
    let other = || token.argument.to_string();

    Ok(match token.kind {
        RuleKind::Required => RuleCheck::Required,
        RuleKind::Email => RuleCheck::Email,
        RuleKind::Numeric => RuleCheck::Numeric,
        RuleKind::In => RuleCheck::In { values: split_values(token.argument) },
        RuleKind::NotIn => RuleCheck::NotIn { values: split_values(token.argument) },
        RuleKind::Max => RuleCheck::Max { bound: bound()? },
        RuleKind::Min => RuleCheck::Min { bound: bound()? },
        RuleKind::Boolean => RuleCheck::Boolean,
        RuleKind::Lt => RuleCheck::Lt { other: other() },
        RuleKind::Lte => RuleCheck::Lte { other: other() },
        RuleKind::Gt => RuleCheck::Gt { other: other() },
        RuleKind::Gte => RuleCheck::Gte { other: other() },
    })
}

fn render_message(field: &str, check: &RuleCheck, config: &ValidatorConfig) -> String {
    let template = MessageTemplate::new(config.template(check.kind()), field);
    let template = match check {
        RuleCheck::In { values } | RuleCheck::NotIn { values } => {
            template.with(VALUES, values.join(", "))
        }
        RuleCheck::Max { bound } | RuleCheck::Min { bound } => {
            template.with(VALUE, bound.to_string())
        }
        _ => match check.other_field() {
            Some(other) => template.with(OTHER_FIELDNAME, other),
            None => template,
        },
    };
    template.render()
}
