//! Error handling for the tally CLI.
//!
//! `CliError` is what every command returns. Library errors from
//! `tally-graph` and configuration errors convert into it through `#[from]`;
//! `main` turns the final error into a miette report.

use std::path::PathBuf;

use miette::Report;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration-related errors (file not found, invalid values, etc.)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The report could not be decoded or its attribution data is corrupt
    #[error("Report error: {0}")]
    Report(#[from] tally_graph::Error),

    /// Report file doesn't exist
    #[error("Report not found: {}", .0.display())]
    ReportNotFound(PathBuf),

    /// Report loaded fine but carries no attribution appendix
    #[error("Report {} has no attribution data\n\nHint: The build that produced it did not record inclusion reasons", .0.display())]
    NoAttribution(PathBuf),

    /// Requested entity is not mentioned anywhere in the report
    #[error("'{entity}' does not appear in the report{}", format_suggestions(.suggestions))]
    UnknownEntity {
        /// Name as typed by the user
        entity: String,
        /// Known names that look similar
        suggestions: Vec<String>,
    },

    /// I/O errors while writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors for `--json` output
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file given with --config doesn't exist
    #[error("Config file not found: {}\n\nHint: Create a tally.config.json file or fix the --config path", .0.display())]
    NotFound(PathBuf),

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!("\n\nHint: Did you mean {}?", suggestions.join(", "))
    }
}

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Report(tally_graph::Error::Corrupt(msg)) => miette::miette!(
            "Report is corrupt: {}\n\nHint: Re-run the build to regenerate the report",
            msg
        ),
        CliError::Report(tally_graph::Error::InvalidFormat(msg)) => miette::miette!(
            "Unreadable report: {}\n\nHint: Files not ending in .json are read as binary reports",
            msg
        ),
        _ => miette::miette!("{}", err),
    }
}
