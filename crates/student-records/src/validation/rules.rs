//! Built-in field rules.
//!
//! Each rule pairs a compiled regex with the message shown when a value
//! fails it.

use regex::Regex;

use super::Field;

/// A compiled validation rule for one form field.
#[derive(Debug)]
pub struct FieldRule {
    /// The field this rule checks.
    pub field: Field,

    /// Message to show next to a field that fails the rule.
    pub message: &'static str,

    regex: Regex,
}

impl FieldRule {
    /// Create a new field rule.
    ///
    /// # Panics
    ///
    /// Panics if the regex pattern is invalid.
    #[must_use]
    pub fn new(field: Field, message: &'static str, pattern: &str) -> Self {
        Self {
            field,
            message,
            regex: Regex::new(pattern).expect("Invalid regex pattern"),
        }
    }

    /// Check a raw input value.
    ///
    /// The pattern is matched against the untrimmed value; whitespace-only
    /// input is rejected even where the pattern would allow it.
    #[must_use]
    pub fn accepts(&self, value: &str) -> bool {
        self.regex.is_match(value) && !value.trim().is_empty()
    }

    /// The source pattern of this rule.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

/// The four built-in rules, in form order.
#[must_use]
pub fn builtin_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::new(
            Field::Name,
            "Name must contain only characters.",
            r"^[A-Za-z\s-]+$",
        ),
        FieldRule::new(
            Field::Id,
            "Student ID must contain only numbers.",
            r"^[0-9]+$",
        ),
        FieldRule::new(
            Field::Email,
            "Please enter a valid email address.",
            r"^[^\s@]+@[^\s@]+\.[^\s@]+$",
        ),
        FieldRule::new(
            Field::Contact,
            "Contact number must be at least 10 digits and contain only numbers.",
            r"^[0-9]{10,}$",
        ),
    ]
}
