//! Logging initialization and configuration.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging system.
///
/// Uses the `RUST_LOG` environment variable for filtering. If not set,
/// defaults to `peershell=info`.
///
/// # Panics
///
/// Panics if called more than once, or if another tracing subscriber
/// has already been set.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("peershell=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact())
        .init();
}

/// Initialize with an explicit filter directive.
///
/// The directive is the level [`crate::config::Config::load`] already
/// resolved, with `RUST_LOG` and `PEERSHELL_LOG_LEVEL` folded in at
/// their rank, so the environment is not consulted again here.
pub fn init_with_filter(directive: &str) {
    tracing_subscriber::registry()
        .with(filter_for(directive))
        .with(tracing_subscriber::fmt::layer().compact())
        .init();
}

fn filter_for(directive: &str) -> EnvFilter {
    EnvFilter::new(format!("peershell={}", directive))
}

/// Try to initialize the logging system.
///
/// Returns `Ok(())` if successful, or `Err` if logging has already been
/// initialized.
pub fn try_init() -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("peershell=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact())
        .try_init()
}
