use tracing_subscriber::EnvFilter;

/// Default filter directive: `debug` when verbose, otherwise `info`.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to [`default_directive`].
/// * Writes to stderr so reports and JSON on stdout stay clean.
/// * Strips timestamps and target names to keep CLI output clean.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::from(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}
