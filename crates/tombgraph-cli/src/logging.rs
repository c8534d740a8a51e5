//! Tracing setup for the `tombgraph` binary
//!
//! Logs go to stderr so `show` output on stdout stays clean. `RUST_LOG`
//! overrides the default filter.

use tracing_subscriber::EnvFilter;

/// Default filter, or the verbose one when `-v` is given
#[must_use]
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "tombgraph=debug,tombgraph_core=debug,tombgraph_cli=debug"
    } else {
        "tombgraph=info,tombgraph_core=info,tombgraph_cli=info"
    }
}

/// Install the global subscriber
///
/// # Errors
/// Fails if a global subscriber is already set
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))
}
