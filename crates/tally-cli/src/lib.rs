//! Tally CLI - reporting front end for recorded build attribution.
//!
//! Loads a saved build report and answers questions about it: which modules
//! were kept, how large they are, and what chain of reasons kept them.
//!
//! - [`cli`] - argument definitions (clap derive)
//! - [`commands`] - `modules`, `why` and `summary`
//! - [`config`] - layered configuration (figment)
//! - [`error`] - error types and miette conversion
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - size formatting and colors

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, ConfigError, Result};
