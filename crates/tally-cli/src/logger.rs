//! Logging setup for the tally CLI.
//!
//! Installs a `tracing` subscriber. Library crates only emit events; the CLI
//! decides what is shown:
//!
//! 1. `--verbose`: DEBUG for tally crates
//! 2. `--quiet`: ERROR only
//! 3. `RUST_LOG` environment variable
//! 4. Default: INFO for tally crates
//!
//! Logs go to stderr so `--json` output on stdout stays machine readable.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "tally_graph=debug,tally_cli=debug";
const QUIET_FILTER: &str = "tally_graph=error,tally_cli=error";
const DEFAULT_FILTER: &str = "tally_graph=info,tally_cli=info";

/// Build the filter selected by the global flags.
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Initialize the tracing subscriber. Call once, before any logging.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Initialize the subscriber with a custom filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn verbose_filter_enables_debug() {
        assert_eq!(filter_for(true, false).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn quiet_filter_is_errors_only() {
        assert_eq!(filter_for(false, true).max_level_hint(), Some(LevelFilter::ERROR));
    }

    #[test]
    fn init_twice_does_not_panic() {
        init_logger(false, true, true);
        init_logger(true, false, true);
    }
}
