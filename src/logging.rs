use tracing_subscriber::EnvFilter;

/// Initialise logging to stderr. Without `verbose` the level is pinned to
/// `warn`; with it, `RUST_LOG` may override the `debug` default.
pub fn init(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        _ => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
