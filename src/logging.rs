//! Tracing subscriber setup for console diagnostics.
//!
//! All engine modules emit events through the [`tracing`] macros; this module
//! installs a single stderr subscriber so that program output (package
//! listings, version) stays on stdout.

use tracing_subscriber::EnvFilter;

/// Initialise the global tracing subscriber.
///
/// The default level is `info`, raised to `debug` when `verbose` is set.
/// `RUST_LOG` overrides both when present.  Calling this more than once is
/// harmless; later calls are ignored.
pub fn init(verbose: bool) {
    let default = if verbose {
        "stowaway=debug"
    } else {
        "stowaway=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
