//! Configuration options for validator behavior

use std::collections::HashMap;

use crate::message::default_template;
use crate::rules::RuleKind;

// ============================================================================
// Error Accumulation
// ============================================================================

/// What `valid()` does with errors left over from an earlier run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorAccumulation {
    /// Keep earlier messages and append this run's (default).
    /// Running `valid()` twice reports every failure twice.
    #[default]
    Append,
    /// Clear the error map at the start of every run
    Reset,
}

// ============================================================================
// Validator Config
// ============================================================================

/// Configuration options for a `Validator`
#[derive(Debug, Clone, Default)]
pub struct ValidatorConfig {
    /// Handling of errors across repeated `valid()` calls
    pub accumulation: ErrorAccumulation,

    /// Replacement default templates, by rule kind
    templates: HashMap<RuleKind, String>,
}

impl ValidatorConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error accumulation mode
    pub fn accumulation(mut self, accumulation: ErrorAccumulation) -> Self {
        self.accumulation = accumulation;
        self
    }

    /// Clear errors at the start of every `valid()` run
    pub fn reset_on_run(mut self) -> Self {
        self.accumulation = ErrorAccumulation::Reset;
        self
    }

    /// Replace the default template of one rule kind.
    ///
    /// Placeholders are the same as the built-in template's. Per-field
    /// message overrides still take precedence.
    pub fn with_template(mut self, kind: RuleKind, template: impl Into<String>) -> Self {
        self.templates.insert(kind, template.into());
        self
    }

    /// Template in effect for a rule kind
    pub fn template(&self, kind: RuleKind) -> &str {
        self.templates
            .get(&kind)
            .map(|s| s.as_str())
            .unwrap_or_else(|| default_template(kind))
    }
}

// ============================================================================
// Tests
// ============================================================================
