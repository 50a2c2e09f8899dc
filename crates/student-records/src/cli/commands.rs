//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::validation::{Field, FormFields};

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Student name (letters, spaces and hyphens)
    #[arg(short, long)]
    pub name: String,

    /// Student ID (digits only)
    #[arg(short, long)]
    pub id: String,

    /// Email address
    #[arg(short, long)]
    pub email: String,

    /// Contact number (at least 10 digits)
    #[arg(short = 'p', long)]
    pub contact: String,
}

impl AddCommand {
    /// The form inputs this command submits.
    #[must_use]
    pub fn to_fields(&self) -> FormFields {
        FormFields::new(
            self.name.clone(),
            self.id.clone(),
            self.email.clone(),
            self.contact.clone(),
        )
    }
}

/// Edit command arguments.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Row to edit, as shown by `list` (starting at 1)
    pub position: usize,

    /// New student name
    #[arg(long)]
    pub name: Option<String>,

    /// New student ID
    #[arg(long)]
    pub id: Option<String>,

    /// New email address
    #[arg(long)]
    pub email: Option<String>,

    /// New contact number
    #[arg(long)]
    pub contact: Option<String>,
}

impl EditCommand {
    /// Overwrite the given inputs; fields not passed keep their loaded value.
    pub fn apply(&self, fields: &mut FormFields) {
        let updates = [
            (Field::Name, &self.name),
            (Field::Id, &self.id),
            (Field::Email, &self.email),
            (Field::Contact, &self.contact),
        ];
        for (field, value) in updates {
            if let Some(value) = value {
                fields.set(field, value.clone());
            }
        }
    }

    /// Whether at least one field is being changed.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.name.is_some() || self.id.is_some() || self.email.is_some() || self.contact.is_some()
    }
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Row to delete, as shown by `list` (starting at 1)
    pub position: usize,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Plain,
    /// Formatted table
    #[default]
    Table,
    /// JSON output
    Json,
}
