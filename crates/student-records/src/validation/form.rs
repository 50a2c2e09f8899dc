//! Form input and per-field error flags.

use crate::record::Record;

use super::{Field, ValidationReport, Validator};

/// Raw text of the four form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    /// Name input.
    pub name: String,
    /// ID input.
    pub id: String,
    /// Email input.
    pub email: String,
    /// Contact input.
    pub contact: String,
}

impl FormFields {
    /// Fill all four inputs.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        id: impl Into<String>,
        email: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            email: email.into(),
            contact: contact.into(),
        }
    }

    /// Inputs pre-filled from a stored record.
    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        Self::new(
            record.name.clone(),
            record.id.clone(),
            record.email.clone(),
            record.contact.clone(),
        )
    }

    /// Raw value of one input.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Id => &self.id,
            Field::Email => &self.email,
            Field::Contact => &self.contact,
        }
    }

    /// Overwrite one input.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Id => &mut self.id,
            Field::Email => &mut self.email,
            Field::Contact => &mut self.contact,
        };
        *slot = value.into();
    }

    /// Whether any input is empty after trimming.
    #[must_use]
    pub fn has_blank_field(&self) -> bool {
        Field::ALL.iter().any(|&f| self.get(f).trim().is_empty())
    }

    /// Build the record to store. Values are trimmed.
    #[must_use]
    pub fn to_record(&self) -> Record {
        Record::new(&self.name, &self.id, &self.email, &self.contact)
    }
}

/// The form: inputs plus the error flag shown beside each input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    fields: FormFields,
    errors: [Option<&'static str>; 4],
}

impl FormState {
    /// An empty, unflagged form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current input values.
    #[must_use]
    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Mutable access to the input values.
    pub fn fields_mut(&mut self) -> &mut FormFields {
        &mut self.fields
    }

    /// Replace all input values. Flags are left alone.
    pub fn fill(&mut self, fields: FormFields) {
        self.fields = fields;
    }

    /// Run every rule, flagging failing inputs and clearing passing ones.
    pub fn validate(&mut self, validator: &Validator) -> ValidationReport {
        let report = validator.check(&self.fields);
        for field in Field::ALL {
            self.errors[field.index()] = report.failure(field).map(|f| f.message);
        }
        report
    }

    /// Message shown beside a flagged input.
    #[must_use]
    pub fn error(&self, field: Field) -> Option<&'static str> {
        self.errors[field.index()]
    }

    /// Whether an input carries an error flag.
    #[must_use]
    pub fn is_flagged(&self, field: Field) -> bool {
        self.error(field).is_some()
    }

    /// All flagged inputs with their messages, in form order.
    #[must_use]
    pub fn flags(&self) -> Vec<(Field, &'static str)> {
        Field::ALL
            .iter()
            .filter_map(|&f| self.error(f).map(|msg| (f, msg)))
            .collect()
    }

    /// Empty every input.
    pub fn reset(&mut self) {
        self.fields = FormFields::default();
    }

    /// Drop every error flag.
    pub fn clear_flags(&mut self) {
        self.errors = [None; 4];
    }
}
