//! Logging setup for the rpgkit CLI.
//!
//! `--verbose` turns on debug output for the rpgkit crates, `--quiet` keeps
//! errors only, otherwise `RUST_LOG` is honoured with an info-level fallback.
//!
//! # Example
//!
//! ```rust,no_run
//! use rpgkit_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false, false);
//! info!("composing client config");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "rpgkit=debug,rpgkit_config=debug,rpgkit_cli=debug";
const QUIET_FILTER: &str = "rpgkit=error,rpgkit_config=error,rpgkit_cli=error";
const DEFAULT_FILTER: &str = "rpgkit=info,rpgkit_config=info,rpgkit_cli=info";

/// Install the global tracing subscriber.
///
/// Call once, before anything logs. Level selection, in order:
/// 1. `--verbose`: DEBUG for rpgkit crates
/// 2. `--quiet`: ERROR only
/// 3. `RUST_LOG`
/// 4. INFO for rpgkit crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Install the global subscriber with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}
