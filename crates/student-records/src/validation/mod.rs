//! Field validation for the record form.
//!
//! Every field is checked independently by a [`FieldRule`]. A form is valid
//! only when all four rules pass and no field is blank.
//!
//! # Example
//!
//! ```
//! use student_records::validation::{Field, FormFields, Validator};
//!
//! let validator = Validator::new();
//! let fields = FormFields::new("Jane Doe", "101", "jane@x.com", "12345");
//!
//! let report = validator.check(&fields);
//! assert!(!report.is_valid());
//! assert_eq!(report.flagged_fields(), vec![Field::Contact]);
//! ```

mod form;
mod rules;

pub use form::{FormFields, FormState};
pub use rules::{builtin_rules, FieldRule};

use serde::Serialize;

/// One of the four form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Student name.
    Name,
    /// Student ID.
    Id,
    /// Email address.
    Email,
    /// Contact number.
    Contact,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 4] = [Field::Name, Field::Id, Field::Email, Field::Contact];

    /// Lowercase field name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Id => "id",
            Self::Email => "email",
            Self::Contact => "contact",
        }
    }

    /// Index into form-ordered arrays.
    pub(crate) fn index(self) -> usize {
        match self {
            Self::Name => 0,
            Self::Id => 1,
            Self::Email => 2,
            Self::Contact => 3,
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field that failed its rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldFailure {
    /// The failing field.
    pub field: Field,
    /// Human-readable message for the field.
    pub message: &'static str,
}

/// Outcome of checking a whole form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    failures: Vec<FieldFailure>,
    has_blank_field: bool,
}

impl ValidationReport {
    /// Whether the form may be submitted.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty() && !self.has_blank_field
    }

    /// Failures in form order.
    #[must_use]
    pub fn failures(&self) -> &[FieldFailure] {
        &self.failures
    }

    /// The fields that failed, in form order.
    #[must_use]
    pub fn flagged_fields(&self) -> Vec<Field> {
        self.failures.iter().map(|f| f.field).collect()
    }

    /// The failure for one field, if it failed.
    #[must_use]
    pub fn failure(&self, field: Field) -> Option<&FieldFailure> {
        self.failures.iter().find(|f| f.field == field)
    }
}

/// Checks form input against the built-in rules.
#[derive(Debug)]
pub struct Validator {
    rules: Vec<FieldRule>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a validator with the built-in rules.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: builtin_rules(),
        }
    }

    /// Check one raw field value.
    #[must_use]
    pub fn check_field(&self, field: Field, value: &str) -> Option<FieldFailure> {
        self.rules
            .iter()
            .filter(|rule| rule.field == field)
            .find(|rule| !rule.accepts(value))
            .map(|rule| FieldFailure {
                field,
                message: rule.message,
            })
    }

    /// Check every field of a form.
    #[must_use]
    pub fn check(&self, fields: &FormFields) -> ValidationReport {
        let failures = Field::ALL
            .iter()
            .filter_map(|&field| self.check_field(field, fields.get(field)))
            .collect();

        ValidationReport {
            failures,
            has_blank_field: fields.has_blank_field(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_fields() -> FormFields {
        FormFields::new("Jane Doe", "101", "jane@x.com", "1234567890")
    }

    #[test]
    fn test_valid_form_passes() {
        let report = Validator::new().check(&valid_fields());
        assert!(report.is_valid());
        assert!(report.failures().is_empty());
    }

    #[test]
    fn test_single_violation_flags_exactly_that_field() {
        let validator = Validator::new();
        let cases = [
            (Field::Name, "Jane99"),
            (Field::Id, "A101"),
            (Field::Email, "jane.x.com"),
            (Field::Contact, "123456789"),
        ];

        for (field, bad_value) in cases {
            let mut fields = valid_fields();
            fields.set(field, bad_value);

            let report = validator.check(&fields);
            assert!(!report.is_valid(), "{field} should be rejected");
            assert_eq!(report.flagged_fields(), vec![field]);
        }
    }

    #[test]
    fn test_all_blank_flags_every_field() {
        let report = Validator::new().check(&FormFields::default());
        assert!(!report.is_valid());
        assert_eq!(report.flagged_fields(), Field::ALL.to_vec());
    }

    #[test]
    fn test_failure_carries_message() {
        let mut fields = valid_fields();
        fields.set(Field::Email, "nope");

        let report = Validator::new().check(&fields);
        let failure = report.failure(Field::Email).unwrap();
        assert_eq!(failure.message, "Please enter a valid email address.");
        assert!(report.failure(Field::Name).is_none());
    }

    #[test]
    fn test_check_field_passes_valid_value() {
        assert!(Validator::new()
            .check_field(Field::Contact, "1234567890")
            .is_none());
    }

    #[test]
    fn test_field_display() {
        assert_eq!(Field::Contact.to_string(), "contact");
        assert_eq!(Field::Id.as_str(), "id");
    }

    #[test]
    fn test_field_index_matches_form_order() {
        for (i, field) in Field::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }
}
