use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber for console diagnostics.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` raises the crate's level
/// to debug. Diagnostics go to stderr so report/summary output on stdout
/// stays pipeable.
pub fn init(verbose: bool) {
    let default_directive = if verbose {
        "connector_cli=debug"
    } else {
        "connector_cli=info"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
