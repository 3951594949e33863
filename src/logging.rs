//! Logging setup for consumers that want tracing output.
//!
//! Installs a global fmt subscriber driven by `RUST_LOG`. The crate itself
//! only emits events; calling [`init`] is optional and a no-op when another
//! subscriber is already installed.

use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

static INIT: OnceLock<()> = OnceLock::new();

/// Initialize tracing output to stdout. Subsequent calls are no-ops.
pub fn init() {
    INIT.get_or_init(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let subscriber = Registry::default()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stdout));
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
