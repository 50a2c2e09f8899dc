//! `student-records` - validated student records kept in a local store
//!
//! This library provides the record form validation, the add/edit state
//! machine and the snapshot persistence behind the `studrec` binary.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod controller;
pub mod dialogs;
pub mod error;
pub mod logging;
pub mod record;
pub mod render;
pub mod storage;
pub mod validation;

pub use config::Config;
pub use controller::{DeleteOutcome, Mode, RecordController, SubmitOutcome};
pub use dialogs::{Dialogs, TerminalDialogs};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use record::{Record, RecordKey, RecordList};
pub use render::{RenderedList, RenderedRow, Renderer};
pub use storage::{KeyValueStore, Snapshot, SqliteStore};
pub use validation::{Field, FormFields, Validator};
