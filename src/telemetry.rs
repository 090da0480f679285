//! Structured logging setup.

use crate::config::AppConfig;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global `tracing` subscriber.
///
/// The filter comes from `RUST_LOG` when set, otherwise from
/// [`AppConfig::effective_log_level`]. Calling this more than once, or after
/// another subscriber was installed, leaves the existing subscriber in place.
pub fn init(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.effective_log_level()));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init();

    if installed.is_err() {
        tracing::debug!("global tracing subscriber already initialized");
        return;
    }
    tracing::info!(env = %config.env, "logging initialized");
}
