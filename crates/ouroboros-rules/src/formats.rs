//! Format patterns used by the `email` and `numeric` rules
//!
//! Patterns are compiled once on first use.

use once_cell::sync::Lazy;
use regex::Regex;

// ============================================================================
// Pre-compiled Regex Patterns
// ============================================================================

/// Basic email shape: local part, `@`, a dotted domain. Not RFC 5322.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.+-]+@[A-Za-z0-9-]+\.[A-Za-z0-9.-]+$")
        .expect("email pattern is valid")
});

/// Decimal number with optional sign, fraction and exponent.
/// Leading zeros are rejected except for a lone `0`.
static NUMERIC_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?(0|[1-9][0-9]*|[0-9]*\.[0-9]+)(e[+-]?[1-9][0-9]*)?$")
        .expect("numeric pattern is valid")
});

// ============================================================================
// Format Validators
// ============================================================================

/// Validate email format
///
/// # Example
/// ```
/// use ouroboros_rules::formats::validate_email;
///
/// assert!(validate_email("mail@mail.com"));
/// assert!(!validate_email("mail@mail"));
/// ```
pub fn validate_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Validate the textual form of a number
///
/// # Example
/// ```
/// use ouroboros_rules::formats::validate_numeric;
///
/// assert!(validate_numeric("-123.4"));
/// assert!(validate_numeric("123e5"));
/// assert!(!validate_numeric("123abc"));
/// ```
pub fn validate_numeric(value: &str) -> bool {
    NUMERIC_REGEX.is_match(value)
}
