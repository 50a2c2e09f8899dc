//! Full-snapshot persistence of the record list.
//!
//! The whole list is written as one JSON array of `{name, id, email, contact}`
//! objects under a single key. Every save overwrites the previous blob.

use tracing::{debug, warn};

use crate::error::Result;
use crate::record::{Record, RecordList};

use super::KeyValueStore;

/// Result of reading the snapshot at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A well-formed snapshot was read.
    Loaded(RecordList),
    /// Nothing, or only whitespace, was stored under the key.
    Missing,
    /// The stored blob could not be parsed and was ignored.
    Discarded {
        /// Parser error describing the problem.
        reason: String,
    },
}

impl LoadOutcome {
    /// The list to start from; empty unless a snapshot was loaded.
    #[must_use]
    pub fn into_list(self) -> RecordList {
        match self {
            Self::Loaded(list) => list,
            Self::Missing | Self::Discarded { .. } => RecordList::new(),
        }
    }
}

/// Reads and writes the record list under a fixed key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    key: String,
}

impl Snapshot {
    /// Snapshot stored under `key`.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// The storage key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Serialize the list without writing it.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn encode(list: &RecordList) -> Result<String> {
        let records: Vec<&Record> = list.records().collect();
        Ok(serde_json::to_string(&records)?)
    }

    /// Write the entire list, replacing whatever was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the store write fails.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S, list: &RecordList) -> Result<()> {
        let blob = Self::encode(list)?;
        store.set(&self.key, &blob)?;
        debug!("Saved {} records under key {}", list.len(), self.key);
        Ok(())
    }

    /// Read the list.
    ///
    /// A blob that does not parse as an array of records is reported as
    /// [`LoadOutcome::Discarded`] and logged; it is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store itself cannot be read.
    pub fn load<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<LoadOutcome> {
        let Some(blob) = store.get(&self.key)? else {
            debug!("No snapshot under key {}", self.key);
            return Ok(LoadOutcome::Missing);
        };

        if blob.trim().is_empty() {
            debug!("Empty snapshot under key {}", self.key);
            return Ok(LoadOutcome::Missing);
        }

        match serde_json::from_str::<Vec<Record>>(&blob) {
            Ok(records) => {
                debug!("Loaded {} records from key {}", records.len(), self.key);
                Ok(LoadOutcome::Loaded(RecordList::from_records(records)))
            }
            Err(e) => {
                warn!(
                    key = %self.key,
                    error = %e,
                    "Stored records are malformed, starting with an empty list"
                );
                Ok(LoadOutcome::Discarded {
                    reason: e.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStore;

    fn store() -> SqliteStore {
        SqliteStore::open_in_memory().unwrap()
    }

    fn sample_list() -> RecordList {
        RecordList::from_records([
            Record::new("Jane Doe", "101", "jane@x.com", "1234567890"),
            Record::new("John Roe", "101", "john@x.com", "5555555555"),
            Record::new("Ann Lee", "7", "ann@y.org", "99999999999"),
        ])
    }

    #[test]
    fn test_round_trip_preserves_content_and_order() {
        let mut store = store();
        let snapshot = Snapshot::new("students");
        let list = sample_list();

        snapshot.save(&mut store, &list).unwrap();
        let loaded = snapshot.load(&store).unwrap().into_list();

        let original: Vec<Record> = list.records().cloned().collect();
        assert!(loaded.same_records(&original));
    }

    #[test]
    fn test_persisted_layout_is_array_of_string_objects() {
        let mut store = store();
        let snapshot = Snapshot::new("students");
        snapshot
            .save(
                &mut store,
                &RecordList::from_records([Record::new("Jane Doe", "101", "jane@x.com", "1234567890")]),
            )
            .unwrap();

        let blob = store.get("students").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "name": "Jane Doe",
                "id": "101",
                "email": "jane@x.com",
                "contact": "1234567890"
            }])
        );
    }

    #[test]
    fn test_save_overwrites_previous_snapshot() {
        let mut store = store();
        let snapshot = Snapshot::new("students");
        snapshot.save(&mut store, &sample_list()).unwrap();
        snapshot.save(&mut store, &RecordList::new()).unwrap();

        assert_eq!(store.get("students").unwrap().as_deref(), Some("[]"));
        assert_eq!(
            snapshot.load(&store).unwrap(),
            LoadOutcome::Loaded(RecordList::new())
        );
    }

    #[test]
    fn test_load_missing_key() {
        let snapshot = Snapshot::new("students");
        assert_eq!(snapshot.load(&store()).unwrap(), LoadOutcome::Missing);
    }

    #[test]
    fn test_load_blank_blob() {
        let mut store = store();
        store.set("students", "  ").unwrap();
        let snapshot = Snapshot::new("students");
        assert_eq!(snapshot.load(&store).unwrap(), LoadOutcome::Missing);
    }

    #[test]
    fn test_load_corrupt_blob_degrades_to_empty() {
        crate::logging::init_test_logging();
        let mut store = store();
        store.set("students", "{not json").unwrap();
        let snapshot = Snapshot::new("students");

        let outcome = snapshot.load(&store).unwrap();
        assert!(matches!(outcome, LoadOutcome::Discarded { .. }));
        assert!(outcome.into_list().is_empty());
    }

    #[test]
    fn test_load_non_conforming_blob_is_discarded() {
        let mut store = store();
        let snapshot = Snapshot::new("students");
        for blob in ["null", "{}", r#"[{"name":"Jane"}]"#, r#"[{"name":1,"id":"1","email":"a@b.c","contact":"1234567890"}]"#] {
            store.set("students", blob).unwrap();
            assert!(
                matches!(snapshot.load(&store).unwrap(), LoadOutcome::Discarded { .. }),
                "blob {blob} should be discarded"
            );
        }
    }

    #[test]
    fn test_snapshot_key() {
        assert_eq!(Snapshot::new("roster").key(), "roster");
    }
}
