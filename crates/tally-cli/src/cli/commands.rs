use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::config::SizeUnit;

/// Available tally subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the modules kept in the build
    ///
    /// Modules are shown in the order the build recorded them, with their
    /// byte size and direct reasons.
    Modules(ModulesArgs),

    /// Explain why an entity was included
    ///
    /// Prints the direct reasons and every reason chain down to a root cause.
    /// A raw module name such as `Physics` also matches `Physics Module`.
    Why(WhyArgs),

    /// Print totals for the report
    Summary(SummaryArgs),
}

/// Arguments for the modules command
#[derive(Args, Debug)]
pub struct ModulesArgs {
    /// Saved build report (.json or binary)
    #[arg(value_name = "REPORT")]
    pub report: PathBuf,

    /// Unit used for sizes
    #[arg(long, value_enum)]
    pub unit: Option<SizeUnit>,

    /// Show each module's icon reference
    #[arg(long)]
    pub icons: bool,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the why command
#[derive(Args, Debug)]
pub struct WhyArgs {
    /// Saved build report (.json or binary)
    #[arg(value_name = "REPORT")]
    pub report: PathBuf,

    /// Entity to explain (module, class, asset or reason)
    #[arg(value_name = "ENTITY")]
    pub entity: String,

    /// Longest reason chain to follow
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the summary command
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Saved build report (.json or binary)
    #[arg(value_name = "REPORT")]
    pub report: PathBuf,

    /// Unit used for sizes
    #[arg(long, value_enum)]
    pub unit: Option<SizeUnit>,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}
