//! Tally CLI - explain why modules were kept in a build.
//!
//! Parses arguments, installs logging, and dispatches to the commands.

use clap::Parser;
use miette::Result;
use tally_cli::{cli, commands, error, logger, ui};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = commands::execute(args.command, args.config.as_deref());

    result.map_err(error::cli_error_to_miette)
}
