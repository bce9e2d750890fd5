//! Logging init: structured events on stderr so stdout stays command output.

use tracing_subscriber::EnvFilter;

fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("info,linkshelf=debug")
        } else {
            EnvFilter::new("warn")
        }
    })
}

/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` for this crate with `verbose`.
pub fn init_logging(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(default_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
