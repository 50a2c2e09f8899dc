//! The record store controller.
//!
//! Owns the record list, the form, the edit session and the store, and runs
//! each user event to completion: validate, mutate, persist, re-render.
//!
//! # Invariants
//! - After any handler returns, the list equals the last snapshot written to
//!   the store. A failed write rolls the in-memory change back.
//! - An edit session always targets a key present in the list; deleting the
//!   target ends the session.

use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::dialogs::Dialogs;
use crate::error::{Error, Result};
use crate::record::{Record, RecordKey, RecordList};
use crate::render::{RenderedList, Renderer};
use crate::storage::{KeyValueStore, LoadOutcome, Snapshot};
use crate::validation::{FormFields, FormState, ValidationReport, Validator};

/// Submit label while adding.
pub const ADD_LABEL: &str = "Add Record";

/// Submit label while editing.
pub const SAVE_LABEL: &str = "Save Changes";

/// Alert shown when a submission fails validation.
pub const VALIDATION_ALERT: &str = "Please fix the validation errors before submitting.";

/// Question asked before deleting a record.
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this record?";

/// Whether the form creates a record or modifies one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Submitting appends a new record.
    #[default]
    Adding,
    /// Submitting overwrites the target record.
    Editing {
        /// The record being edited.
        target: RecordKey,
    },
}

/// What a submission did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing changed.
    Rejected(ValidationReport),
    /// A new record was appended.
    Added(RecordKey),
    /// The edited record was overwritten.
    Updated(RecordKey),
}

/// What a delete request did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined; nothing changed.
    Cancelled,
    /// The record was removed.
    Deleted(Record),
}

/// Single owner of all record state.
#[derive(Debug)]
pub struct RecordController<S> {
    store: S,
    snapshot: Snapshot,
    records: RecordList,
    mode: Mode,
    form: FormState,
    validator: Validator,
    renderer: Renderer,
    rendered: RenderedList,
}

impl<S: KeyValueStore> RecordController<S> {
    /// Load the stored list and render it.
    ///
    /// A malformed stored blob yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn start(store: S, config: &Config) -> Result<Self> {
        let snapshot = Snapshot::new(config.storage_key());
        let records = match snapshot.load(&store)? {
            LoadOutcome::Loaded(list) => list,
            LoadOutcome::Missing => RecordList::new(),
            LoadOutcome::Discarded { reason } => {
                debug!(%reason, "Starting with an empty list");
                RecordList::new()
            }
        };
        let renderer = Renderer::new(&config.display);
        let rendered = renderer.render(&records);

        debug!(records = records.len(), "Controller started");
        Ok(Self {
            store,
            snapshot,
            records,
            mode: Mode::Adding,
            form: FormState::new(),
            validator: Validator::new(),
            renderer,
            rendered,
        })
    }

    /// The record list.
    #[must_use]
    pub fn records(&self) -> &RecordList {
        &self.records
    }

    /// The form.
    #[must_use]
    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Form inputs, for typing into.
    pub fn form_mut(&mut self) -> &mut FormFields {
        self.form.fields_mut()
    }

    /// Current edit session state.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Label of the submit control.
    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            Mode::Adding => ADD_LABEL,
            Mode::Editing { .. } => SAVE_LABEL,
        }
    }

    /// The last rendered display.
    #[must_use]
    pub fn rendered(&self) -> &RenderedList {
        &self.rendered
    }

    /// Rebuild the display from the list.
    pub fn render(&mut self) -> &RenderedList {
        self.rendered = self.renderer.render(&self.records);
        &self.rendered
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Key of the record at a zero-based row position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PositionOutOfRange`] (with a 1-based position) if no
    /// row exists there.
    pub fn key_at(&self, position: usize) -> Result<RecordKey> {
        self.records
            .key_at(position)
            .ok_or(Error::PositionOutOfRange {
                position: position + 1,
                len: self.records.len(),
            })
    }

    /// Press "Edit" on a row: load it into the form and enter Editing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if no record has this key.
    pub fn begin_edit(&mut self, key: RecordKey) -> Result<()> {
        let record = self.records.get(key).ok_or(Error::RecordNotFound { key })?;
        self.form.fill(FormFields::from_record(record));
        self.form.clear_flags();
        self.mode = Mode::Editing { target: key };
        debug!(%key, "Editing record");
        Ok(())
    }

    /// Leave Editing without saving and empty the form.
    pub fn cancel_edit(&mut self) {
        if let Mode::Editing { target } = self.mode {
            debug!(key = %target, "Edit cancelled");
        }
        self.mode = Mode::Adding;
        self.form.reset();
        self.form.clear_flags();
    }

    /// Submit the form in the current mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails. The list, the session and
    /// the form are left as they were before the submission and the user is
    /// notified.
    pub fn submit(&mut self, dialogs: &mut dyn Dialogs) -> Result<SubmitOutcome> {
        let report = self.form.validate(&self.validator);
        if !report.is_valid() {
            warn!(fields = ?report.flagged_fields(), "Submission rejected");
            dialogs.alert(VALIDATION_ALERT);
            return Ok(SubmitOutcome::Rejected(report));
        }

        let record = self.form.fields().to_record();
        let previous = self.records.clone();

        let outcome = match self.mode {
            Mode::Adding => SubmitOutcome::Added(self.records.push(record)),
            Mode::Editing { target } => {
                if self.records.replace(target, record).is_none() {
                    self.mode = Mode::Adding;
                    return Err(Error::RecordNotFound { key: target });
                }
                SubmitOutcome::Updated(target)
            }
        };

        if let Err(e) = self.persist(dialogs) {
            self.records = previous;
            return Err(e);
        }

        match &outcome {
            SubmitOutcome::Added(key) => info!(%key, "Record added"),
            SubmitOutcome::Updated(key) => info!(%key, "Record updated"),
            SubmitOutcome::Rejected(_) => {}
        }

        self.mode = Mode::Adding;
        self.render();
        self.form.reset();
        Ok(outcome)
    }

    /// Press "Delete" on a row. Asks for confirmation first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] for an unknown key, or the store
    /// error if the write fails (the record is then kept).
    pub fn delete(&mut self, key: RecordKey, dialogs: &mut dyn Dialogs) -> Result<DeleteOutcome> {
        if !self.records.contains(key) {
            return Err(Error::RecordNotFound { key });
        }

        if !dialogs.confirm(DELETE_CONFIRMATION) {
            debug!(%key, "Delete cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        let previous = self.records.clone();
        let removed = self
            .records
            .remove(key)
            .ok_or(Error::RecordNotFound { key })?;

        if let Err(e) = self.persist(dialogs) {
            self.records = previous;
            return Err(e);
        }
        info!(%key, "Record deleted");

        if self.mode == (Mode::Editing { target: key }) {
            warn!(%key, "Edited record was deleted, leaving edit mode");
            self.cancel_edit();
        }

        self.render();
        Ok(DeleteOutcome::Deleted(removed))
    }

    fn persist(&mut self, dialogs: &mut dyn Dialogs) -> Result<()> {
        self.snapshot
            .save(&mut self.store, &self.records)
            .map_err(|e| {
                error!(error = %e, "Failed to save records");
                dialogs.notify(&format!("Changes could not be saved: {e}"));
                e
            })
    }
}
