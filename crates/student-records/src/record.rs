//! Core record types for student-records.
//!
//! A [`Record`] is what gets persisted. A [`RecordList`] keeps the records in
//! display order and hands each one a [`RecordKey`] when it enters the list,
//! so edit and delete never depend on a row position that may shift.

use serde::{Deserialize, Serialize};

/// Stable handle for a record within one controller session.
///
/// Keys are assigned in increasing order and never reused, even after the
/// record they named is deleted. They are not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordKey(u64);

impl RecordKey {
    /// Wrap a raw key value.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw key value.
    #[must_use]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One student's stored attribute set.
///
/// All four fields are stored trimmed. `id` is not unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Student name.
    pub name: String,
    /// Numeric student identifier.
    pub id: String,
    /// Email address.
    pub email: String,
    /// Contact number, at least ten digits.
    pub contact: String,
}

impl Record {
    /// Create a record, trimming every field.
    #[must_use]
    pub fn new(
        name: impl AsRef<str>,
        id: impl AsRef<str>,
        email: impl AsRef<str>,
        contact: impl AsRef<str>,
    ) -> Self {
        Self {
            name: name.as_ref().trim().to_string(),
            id: id.as_ref().trim().to_string(),
            email: email.as_ref().trim().to_string(),
            contact: contact.as_ref().trim().to_string(),
        }
    }
}

/// A record together with the key it was given on entering the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Session key.
    pub key: RecordKey,
    /// The stored record.
    pub record: Record,
}

/// Ordered collection of records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordList {
    entries: Vec<Entry>,
    next_key: u64,
}

impl RecordList {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from records in order, assigning fresh keys.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut list = Self::new();
        for record in records {
            list.push(record);
        }
        list
    }

    /// Append a record and return its key.
    pub fn push(&mut self, record: Record) -> RecordKey {
        let key = RecordKey(self.next_key);
        self.next_key += 1;
        self.entries.push(Entry { key, record });
        key
    }

    /// Replace the record behind `key`, keeping key and position.
    ///
    /// Returns the previous record, or `None` if no entry has this key.
    pub fn replace(&mut self, key: RecordKey, record: Record) -> Option<Record> {
        self.entries
            .iter_mut()
            .find(|entry| entry.key == key)
            .map(|entry| std::mem::replace(&mut entry.record, record))
    }

    /// Remove the record behind `key`. Later entries shift down by one.
    pub fn remove(&mut self, key: RecordKey) -> Option<Record> {
        let index = self.position_of(key)?;
        Some(self.entries.remove(index).record)
    }

    /// Look up a record by key.
    #[must_use]
    pub fn get(&self, key: RecordKey) -> Option<&Record> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.record)
    }

    /// Whether an entry has this key.
    #[must_use]
    pub fn contains(&self, key: RecordKey) -> bool {
        self.position_of(key).is_some()
    }

    /// Zero-based position of `key` in display order.
    #[must_use]
    pub fn position_of(&self, key: RecordKey) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key == key)
    }

    /// Key of the entry at a zero-based position.
    #[must_use]
    pub fn key_at(&self, position: usize) -> Option<RecordKey> {
        self.entries.get(position).map(|entry| entry.key)
    }

    /// Entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Records in display order.
    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.entries.iter().map(|entry| &entry.record)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the list holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Content equality with a plain record sequence, ignoring keys.
    #[must_use]
    pub fn same_records(&self, records: &[Record]) -> bool {
        self.records().eq(records.iter())
    }
}
