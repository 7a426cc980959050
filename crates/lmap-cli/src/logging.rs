//! Diagnostics on stderr
//!
//! The library crates log through the `log` facade; the fmt subscriber picks
//! those records up through its `log` bridge. `RUST_LOG` wins when set,
//! otherwise only warnings and errors are shown unless `--verbose` is given.

use tracing_subscriber::EnvFilter;

const VERBOSE_FILTER: &str = "warn,lmap_cli=debug,lmap_core=debug,lmap_sql=debug,lmap_lineage=debug";

fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_FILTER
    } else {
        "warn"
    }
}

/// Install the global subscriber
pub(crate) fn init(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .init();
}

#[cfg(test)]
#[path = "logging_test.rs"]
mod tests;
