//! `studrec` - CLI for student-records
//!
//! Each command drives one event through the record controller: fill the
//! form and submit, press Edit or Delete on a row, or render the list.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::Path;

use anyhow::Context;
use clap::Parser;

use student_records::cli::{
    row_index, AddCommand, Cli, Command, ConfigCommand, DeleteCommand, EditCommand, ListCommand,
    OutputFormat,
};
use student_records::{
    init_logging, Config, DeleteOutcome, Error, RecordController, SqliteStore, SubmitOutcome,
    TerminalDialogs,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    // Path and Validate must work even when the active configuration is broken
    let load = || Config::load_from(cli.config.clone());

    match cli.command {
        Command::Add(cmd) => handle_add(&load()?, &cmd),
        Command::Edit(cmd) => handle_edit(&load()?, &cmd),
        Command::Delete(cmd) => handle_delete(&load()?, &cmd),
        Command::List(cmd) => handle_list(&load()?, &cmd),
        Command::Status(cmd) => handle_status(&load()?, cmd.json),
        Command::Config(ConfigCommand::Show { json }) => handle_config_show(&load()?, json),
        Command::Config(ConfigCommand::Path) => {
            println!("{}", Config::default_config_path().display());
            Ok(())
        }
        Command::Config(ConfigCommand::Validate { file }) => {
            let path = file
                .or_else(|| cli.config.clone())
                .unwrap_or_else(Config::default_config_path);
            handle_validate(&path)
        }
    }
}

fn open_controller(config: &Config) -> anyhow::Result<RecordController<SqliteStore>> {
    let path = config.database_path();
    let store = SqliteStore::open(&path)
        .with_context(|| format!("opening record store at {}", path.display()))?;
    Ok(RecordController::start(store, config)?)
}

/// Submit the form and turn a rejection into per-field messages plus an error.
fn submit(controller: &mut RecordController<SqliteStore>) -> anyhow::Result<SubmitOutcome> {
    let mut dialogs = TerminalDialogs::stdio(false);
    let outcome = controller.submit(&mut dialogs)?;

    if let SubmitOutcome::Rejected(report) = &outcome {
        for failure in report.failures() {
            eprintln!("  {}: {}", failure.field, failure.message);
        }
        return Err(Error::ValidationFailed {
            fields: report.flagged_fields(),
        }
        .into());
    }
    Ok(outcome)
}

fn handle_add(config: &Config, cmd: &AddCommand) -> anyhow::Result<()> {
    let mut controller = open_controller(config)?;
    *controller.form_mut() = cmd.to_fields();

    if let SubmitOutcome::Added(key) = submit(&mut controller)? {
        let position = controller.records().position_of(key).map_or(0, |p| p + 1);
        println!("Added record at position {position}.");
    }
    Ok(())
}

fn handle_edit(config: &Config, cmd: &EditCommand) -> anyhow::Result<()> {
    let mut controller = open_controller(config)?;
    let index = row_index(cmd.position, controller.records().len())?;
    let key = controller.key_at(index)?;

    controller.begin_edit(key)?;
    if !cmd.has_changes() {
        println!("Nothing to change; record {} left as is.", cmd.position);
        controller.cancel_edit();
        return Ok(());
    }
    cmd.apply(controller.form_mut());

    if let SubmitOutcome::Updated(_) = submit(&mut controller)? {
        println!("Updated record at position {}.", cmd.position);
    }
    Ok(())
}

fn handle_delete(config: &Config, cmd: &DeleteCommand) -> anyhow::Result<()> {
    let mut controller = open_controller(config)?;
    let index = row_index(cmd.position, controller.records().len())?;
    let key = controller.key_at(index)?;

    let mut dialogs = TerminalDialogs::stdio(cmd.yes);
    match controller.delete(key, &mut dialogs)? {
        DeleteOutcome::Deleted(record) => {
            println!("Deleted {} ({}).", record.name, record.id);
        }
        DeleteOutcome::Cancelled => println!("Delete cancelled."),
    }
    Ok(())
}

fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let controller = open_controller(config)?;
    let rendered = controller.rendered();

    match cmd.format {
        OutputFormat::Plain => print!("{}", rendered.to_plain()),
        OutputFormat::Table => {
            print!("{}", rendered.to_table());
            if rendered.scrollable {
                println!();
                println!("({} records; list scrolls)", rendered.record_count());
            }
        }
        OutputFormat::Json => println!("{}", rendered.to_json()?),
    }
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let controller = open_controller(config)?;
    let info = controller.store().entry_info(config.storage_key())?;
    let last_saved = info.as_ref().and_then(|i| i.updated_at);

    if json {
        let status = serde_json::json!({
            "records": controller.records().len(),
            "database_path": config.database_path(),
            "storage_key": config.storage_key(),
            "stored_bytes": info.as_ref().map(|i| i.value_bytes),
            "last_saved": last_saved.map(|t| t.to_rfc3339()),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("studrec status");
        println!("--------------");
        println!("Records:       {}", controller.records().len());
        println!("Database:      {}", config.database_path().display());
        println!("Storage key:   {}", config.storage_key());
        match (&info, last_saved) {
            (Some(info), Some(at)) => {
                println!("Stored bytes:  {}", info.value_bytes);
                println!("Last saved:    {}", at.format("%Y-%m-%d %H:%M:%S UTC"));
            }
            (Some(info), None) => println!("Stored bytes:  {}", info.value_bytes),
            (None, _) => println!("Last saved:    never"),
        }
    }
    Ok(())
}

fn handle_config_show(config: &Config, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    println!("Current Configuration");
    println!("=====================");
    println!();
    println!("[Storage]");
    println!("  Database path:      {}", config.database_path().display());
    println!("  Storage key:        {}", config.storage_key());
    println!();
    println!("[Display]");
    println!("  Viewport height:    {}", config.display.viewport_height);
    println!("  Row height:         {}", config.display.row_height);
    Ok(())
}

fn handle_validate(path: &Path) -> anyhow::Result<()> {
    println!("Validating configuration: {}", path.display());
    if !path.is_file() {
        anyhow::bail!("configuration file not found: {}", path.display());
    }
    Config::load_from(Some(path.to_path_buf()))
        .with_context(|| format!("invalid configuration in {}", path.display()))?;
    println!("Configuration is valid.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn write_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "studrec_{name}_{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_validate_accepts_good_file() {
        let path = write_config("good", "[display]\nrow_height = 20\n");
        assert!(handle_validate(&path).is_ok());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_validate_rejects_zero_row_height() {
        let path = write_config("zero_row", "[display]\nrow_height = 0\n");
        let err = handle_validate(&path).unwrap_err();
        assert!(format!("{err:#}").contains("row_height"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_validate_rejects_malformed_toml() {
        let path = write_config("malformed", "[display\nrow_height = ");
        assert!(handle_validate(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_validate_rejects_missing_file() {
        let path = PathBuf::from("/nonexistent/studrec/config.toml");
        assert!(handle_validate(&path).is_err());
    }
}
