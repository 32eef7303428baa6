//! Logging setup. Records go to stderr so the session journal picks them up.

use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_LEVEL: &str = "info";
const VERBOSE_LOG_LEVEL: &str = "debug";

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_LOG_LEVEL
    } else {
        DEFAULT_LOG_LEVEL
    }
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over `verbose`.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
