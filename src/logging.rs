use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "hospital_records_clean=info";

/// Install the global subscriber: human-readable lines on stderr, filtered by
/// `RUST_LOG` (falls back to info for this crate)
pub fn init_logging(verbose: bool) {
    let default = if verbose {
        "hospital_records_clean=debug"
    } else {
        DEFAULT_DIRECTIVE
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let console_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    // A second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init();
}
