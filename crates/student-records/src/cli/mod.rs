//! Command-line interface for student-records.
//!
//! This module provides the CLI structure for the `studrec` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, DeleteCommand, EditCommand, ListCommand, OutputFormat,
    StatusCommand,
};

use crate::error::{Error, Result};

/// studrec - Keep validated student records
///
/// Add, edit, list and delete student records. Every change is validated
/// and written to a local store immediately.
#[derive(Debug, Parser)]
#[command(name = "studrec")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors (command results are still printed)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a new record
    Add(AddCommand),

    /// Edit the record at a position
    Edit(EditCommand),

    /// Delete the record at a position
    Delete(DeleteCommand),

    /// List all records
    List(ListCommand),

    /// Show record count and storage status
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

/// Convert a 1-based row position from the command line to a list index.
///
/// # Errors
///
/// Returns [`Error::PositionOutOfRange`] for position 0.
pub fn row_index(position: usize, len: usize) -> Result<usize> {
    position
        .checked_sub(1)
        .ok_or(Error::PositionOutOfRange { position, len })
}
