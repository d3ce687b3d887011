//! Log setup for the CLI.
//!
//! Events go to stderr so stdout stays clean for `plan` JSON and terminal
//! previews. `RUST_LOG` wins over the verbosity flag when set.

use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbose: bool) {
    let default = if verbose { "qrstudio=debug" } else { "qrstudio=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
