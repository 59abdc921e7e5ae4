// src/logging.rs
// =============================================================================
// Diagnostics go to stderr through `tracing`, so stdout only ever carries
// the report (and stays parseable with --json).
//
// RUST_LOG wins when set. Otherwise we log warnings, plus info from vscan
// itself, or debug from vscan with -v.
// =============================================================================

use tracing_subscriber::EnvFilter;

pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,vscan=debug"
    } else {
        "warn,vscan=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // try_init: a second call (tests) must not panic
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
