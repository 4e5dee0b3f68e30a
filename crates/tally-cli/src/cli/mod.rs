//! Command-line interface definition for tally.
//!
//! # Command Structure
//!
//! - `tally modules <REPORT>` - modules kept in the build, with sizes
//! - `tally why <REPORT> <ENTITY>` - reasons and reason chains for an entity
//! - `tally summary <REPORT>` - totals for the whole report

mod commands;

use std::path::PathBuf;

use clap::Parser;

pub use commands::{Command, ModulesArgs, SummaryArgs, WhyArgs};

/// Tally - explain why modules were kept in a build
#[derive(Parser, Debug)]
#[command(
    name = "tally",
    version,
    about = "Explain why modules were kept in a build",
    long_about = "Tally reads a saved build report and explains its inclusion attribution:\n\
                  which engine modules were kept, how large they are, and which chain of\n\
                  reasons (classes, assets, scripts) caused each of them to stay."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to a tally.config.json file
    ///
    /// Defaults to ./tally.config.json when present.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
