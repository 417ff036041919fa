//! Ouroboros Rules
//!
//! Declarative, rule-string input validation for the Ouroboros framework.
//!
//! Each field is given a pipe-delimited spec such as `"required|max:10"`.
//! The [`Validator`] parses every spec once, snapshots the field values, and
//! reports a per-field list of human-readable messages for every rule that
//! fails. It is meant for form and API payload checks, not schema typing.
//!
//! # Rules
//!
//! | Rule | Passes when |
//! |---|---|
//! | `required` | value is not null, not `""`, not an empty list |
//! | `email` | empty (null, `""`, `0`, `false`, `[]`, `{}`), or a basic `local@domain.tld` address |
//! | `numeric` | empty, or a number / numeric string |
//! | `in:a,b` | blank, or the stringified value is listed |
//! | `not_in:a,b` | blank, or the stringified value is not listed |
//! | `max:n` / `min:n` | null, or length / numeric value within the bound |
//! | `boolean` | `true`, `false`, `0`, `1`, `"0"`, `"1"`, `""` or null |
//! | `lt:f` `lte:f` `gt:f` `gte:f` | ordered against sibling field `f` |
//!
//! Unknown rule names are ignored. A non-numeric `max`/`min` bound fails
//! construction, and comparing incompatible values fails `valid()`; both
//! are [`RuleError`]s, not validation messages.
//!
//! # Features
//!
//! - **Default**: core validation
//! - **serde**: JSON data input and serializable error reports
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use ouroboros_rules::{Validator, Value};
//!
//! let data = HashMap::from([
//!     ("email".to_string(), Value::from("not-an-email")),
//!     ("start".to_string(), Value::from(10)),
//!     ("end".to_string(), Value::from(5)),
//! ]);
//! let rules = [("email", "required|email"), ("start", "lt:end")];
//! let messages = [("email.email", "Please enter a valid email")];
//!
//! let mut validator = Validator::new(data, rules, messages).unwrap();
//! assert!(!validator.valid().unwrap());
//! assert_eq!(
//!     validator.errors().get("email").unwrap(),
//!     &["Please enter a valid email".to_string()]
//! );
//! assert!(validator.errors().contains("start"));
//! ```

// Public modules
pub mod config;
pub mod errors;
pub mod formats;
pub mod message;
pub mod parser;
pub mod rules;
pub mod types;
pub mod validator;

// Re-export commonly used types
pub use config::{ErrorAccumulation, ValidatorConfig};
pub use errors::{ErrorReport, Result, RuleError, ValidationErrors};
pub use message::MessageOverrides;
pub use rules::{Bound, Outcome, Rule, RuleCheck, RuleContext, RuleKind};
pub use types::Value;
pub use validator::Validator;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
