//! Tracing initialization and configuration.

use std::sync::Once;

use tracing::warn;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the Causeway tracing/logging system.
///
/// Reads the `CAUSEWAY_LOG` environment variable for per-module log levels.
/// Format: `CAUSEWAY_LOG=causeway_search::adjacency=debug,causeway_core=warn`
///
/// Falls back to `causeway=info` if `CAUSEWAY_LOG` is not set or is invalid.
///
/// Idempotent; later calls are no-ops.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("CAUSEWAY_LOG")
            .unwrap_or_else(|_| EnvFilter::new("causeway=info"));

        let installed = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
        report(installed);
    });
}

/// Same as [`init_tracing`] but emitting newline-delimited JSON records.
pub fn init_json_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("CAUSEWAY_LOG")
            .unwrap_or_else(|_| EnvFilter::new("causeway=info"));

        let installed = tracing_subscriber::registry()
            .with(fmt::layer().json().with_current_span(true))
            .with(filter)
            .try_init();
        report(installed);
    });
}

/// Records through whichever subscriber won when ours was not installed.
fn report(installed: Result<(), TryInitError>) {
    if let Err(e) = installed {
        warn!(error = %e, "causeway subscriber not installed; keeping the existing one");
    }
}
