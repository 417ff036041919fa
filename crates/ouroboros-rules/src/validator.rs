//! Validator orchestration
//!
//! A [`Validator`] is built from a data mapping, a field → spec-string
//! mapping and optional message overrides. Construction parses every spec
//! and snapshots every field value; [`Validator::valid`] then runs each
//! field's rules in declaration order and collects failure messages.
//!
//! # Re-entrancy
//!
//! With the default [`ErrorAccumulation::Append`], errors are not cleared
//! between runs: calling `valid()` twice returns the same boolean both times
//! but leaves every message in the error map twice. Use
//! [`Validator::reset`] between runs, or build with
//! [`ValidatorConfig::reset_on_run`], to get one copy per run.

use std::collections::HashMap;

use crate::config::{ErrorAccumulation, ValidatorConfig};
use crate::errors::{ErrorReport, Result, ValidationErrors};
use crate::message::MessageOverrides;
use crate::parser::{build_rule, tokenize};
use crate::rules::{Outcome, Rule, RuleContext};
use crate::types::Value;

// ============================================================================
// Validator
// ============================================================================

/// Rule-string validator over one data snapshot
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use ouroboros_rules::{Validator, Value};
///
/// let data = HashMap::from([
///     ("name".to_string(), Value::from("")),
///     ("age".to_string(), Value::from(17)),
/// ]);
/// let rules = [("name", "required|max:10"), ("age", "numeric|min:18")];
///
/// let mut validator = Validator::new(data, rules, [] as [(&str, &str); 0]).unwrap();
/// assert!(!validator.valid().unwrap());
/// assert_eq!(
///     validator.compact_errors(),
///     vec!["Field name is required", "Field age has a minimum of: 18"]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    data: HashMap<String, Value>,
    fields: Vec<(String, Vec<Rule>)>,
    errors: ValidationErrors,
    config: ValidatorConfig,
}

impl Validator {
    /// Build a validator with the default config
    ///
    /// `rules` and `messages` are iterated in order; field order in the
    /// error report follows `rules`. Fails only on a non-numeric
    /// `max`/`min` bound.
    pub fn new<R, RK, RV, M, MK, MV>(
        data: HashMap<String, Value>,
        rules: R,
        messages: M,
    ) -> Result<Self>
    where
        R: IntoIterator<Item = (RK, RV)>,
        RK: AsRef<str>,
        RV: AsRef<str>,
        M: IntoIterator<Item = (MK, MV)>,
        MK: AsRef<str>,
        MV: Into<String>,
    {
        Self::with_config(data, rules, messages, ValidatorConfig::default())
    }

    /// Build a validator with an explicit config
    pub fn with_config<R, RK, RV, M, MK, MV>(
        data: HashMap<String, Value>,
        rules: R,
        messages: M,
        config: ValidatorConfig,
    ) -> Result<Self>
    where
        R: IntoIterator<Item = (RK, RV)>,
        RK: AsRef<str>,
        RV: AsRef<str>,
        M: IntoIterator<Item = (MK, MV)>,
        MK: AsRef<str>,
        MV: Into<String>,
    {
        let overrides = MessageOverrides::parse(messages);
        let mut fields: Vec<(String, Vec<Rule>)> = Vec::new();

        for (field, spec) in rules {
            let field = field.as_ref();
            let tokens = tokenize(spec.as_ref());
            if tokens.is_empty() {
                continue;
            }

            let value = data.get(field).cloned().unwrap_or(Value::Null);
            let built = tokens
                .iter()
                .map(|token| build_rule(field, token, &value, &overrides, &config))
                .collect::<Result<Vec<_>>>()?;

            match fields.iter_mut().find(|(name, _)| name == field) {
                Some((_, rules)) => rules.extend(built),
                None => fields.push((field.to_string(), built)),
            }
        }

        Ok(Self {
            data,
            fields,
            errors: ValidationErrors::new(),
            config,
        })
    }

    /// Build a validator whose data is a JSON object
    ///
    /// Non-object JSON yields empty data, so every field reads as null.
    #[cfg(feature = "serde")]
    pub fn from_json<R, RK, RV, M, MK, MV>(
        data: &serde_json::Value,
        rules: R,
        messages: M,
    ) -> Result<Self>
    where
        R: IntoIterator<Item = (RK, RV)>,
        RK: AsRef<str>,
        RV: AsRef<str>,
        M: IntoIterator<Item = (MK, MV)>,
        MK: AsRef<str>,
        MV: Into<String>,
    {
        let data = match data {
            serde_json::Value::Object(fields) => fields
                .iter()
                .map(|(name, value)| (name.clone(), Value::from(value.clone())))
                .collect(),
            _ => HashMap::new(),
        };
        Self::new(data, rules, messages)
    }

    /// Run every rule and collect failures
    ///
    /// Returns `Ok(true)` when no rule failed in this run. A comparison rule
    /// that meets incompatible values aborts the run with `Err`; messages
    /// collected before it stay in the error map.
    pub fn valid(&mut self) -> Result<bool> {
        if self.config.accumulation == ErrorAccumulation::Reset {
            self.errors.clear();
        }

        let ctx = RuleContext::new(&self.data);
        let mut valid = true;
        let mut evaluated = 0usize;

        for (field, rules) in &self.fields {
            for rule in rules {
                evaluated += 1;
                if let Outcome::Fail(message) = rule.validate(&ctx)? {
                    tracing::trace!("Field `{}` failed rule `{}`", field, rule.kind());
                    valid = false;
                    self.errors.add(field, message);
                }
            }
        }

        tracing::debug!(
            "Validation run: {} rule(s), {} failing field(s)",
            evaluated,
            self.errors.len()
        );
        Ok(valid)
    }

    /// Errors grouped by field
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Every error message, field order then rule order
    pub fn compact_errors(&self) -> Vec<String> {
        self.errors.compact()
    }

    /// Errors in the requested view
    pub fn report(&self, compact: bool) -> ErrorReport {
        ErrorReport::from_errors(&self.errors, compact)
    }

    /// Discard collected errors
    pub fn reset(&mut self) {
        self.errors.clear();
    }

    /// Rules built for a field, in declaration order
    pub fn rules_for(&self, field: &str) -> Option<&[Rule]> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, rules)| rules.as_slice())
    }

    /// Fields with at least one rule, in declaration order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Active configuration
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }
}
