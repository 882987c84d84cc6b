//! Logging for LMZ
//!
//! Installs a `tracing-subscriber` registry with an env filter and a fmt
//! layer, pretty or JSON depending on configuration.

use lmz_config::{LogFormat, TelemetryConfig};
use tracing_subscriber::EnvFilter;

/// Initialize logging from configuration
///
/// `RUST_LOG` takes precedence over the configured filter. An invalid
/// directive falls back to `info` with a warning once logging is up.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: &TelemetryConfig) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let (filter, rejected) = build_filter(std::env::var("RUST_LOG").ok().as_deref(), &config.log_filter);

    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.log_format {
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true),
            )
            .try_init(),
    };

    installed.map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;

    if let Some(directive) = rejected {
        tracing::warn!(%directive, "invalid log filter, falling back to `info`");
    }

    Ok(())
}

/// Choose the filter directive, preferring `RUST_LOG` when set
///
/// Returns the filter plus the directive that was rejected, if any.
fn build_filter(env_override: Option<&str>, configured: &str) -> (EnvFilter, Option<String>) {
    let directive = env_override.filter(|s| !s.trim().is_empty()).unwrap_or(configured);

    match EnvFilter::try_new(directive) {
        Ok(filter) => (filter, None),
        Err(_) => (EnvFilter::new("info"), Some(directive.to_owned())),
    }
}
