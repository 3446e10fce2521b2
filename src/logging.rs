use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber once. Honors `RUST_LOG`, defaults to
/// `crm=warn`, and writes to stderr so command output stays parseable.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("crm=warn"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
