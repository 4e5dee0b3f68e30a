//! Command implementations for the tally CLI.
//!
//! Each command renders its output into a `String` first so the text and
//! JSON shapes can be tested without spawning the binary.

pub mod modules;
pub mod summary;
pub mod why;

use std::path::Path;

use tally_graph::{AttributionStore, BuildReport};
use tracing::debug;

use crate::cli::Command;
use crate::error::{CliError, Result};

/// Dispatch a parsed subcommand.
pub fn execute(command: Command, config_path: Option<&Path>) -> Result<()> {
    let output = match command {
        Command::Modules(args) => modules::execute(&args, config_path)?,
        Command::Why(args) => why::execute(&args, config_path)?,
        Command::Summary(args) => summary::execute(&args, config_path)?,
    };
    print!("{output}");
    Ok(())
}

/// Load a saved report, mapping a missing file to a friendly error.
pub fn load_report(path: &Path) -> Result<BuildReport> {
    if !path.exists() {
        return Err(CliError::ReportNotFound(path.to_path_buf()));
    }
    let report = BuildReport::load(path)?;
    debug!(report = report.name(), platform = report.platform(), "report loaded");
    Ok(report)
}

/// The report's attribution store, or an error naming the file.
pub fn attribution<'a>(report: &'a BuildReport, path: &Path) -> Result<&'a AttributionStore> {
    report
        .attribution()
        .ok_or_else(|| CliError::NoAttribution(path.to_path_buf()))
}
