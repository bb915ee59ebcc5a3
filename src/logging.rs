//! Tracing subscriber setup for the runner binary.

use std::sync::Once;

use tracing_subscriber::fmt as tracing_fmt;
use tracing_subscriber::{EnvFilter, prelude::*};

static INIT: Once = Once::new();

/// Install the global subscriber once. `RUST_LOG` wins over `default_level`.
pub fn init_logging(default_level: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(default_level))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_fmt::layer().with_writer(std::io::stderr))
            .try_init();
    });
}
