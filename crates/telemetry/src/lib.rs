//! Logging bootstrap for biblio services.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use biblio_kernel::settings::{LogFormat, TelemetrySettings};

/// Install the global tracing subscriber.
///
/// Respects `RUST_LOG` when set; defaults to `info` otherwise.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match settings.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    }
    .map_err(|error| anyhow::anyhow!(error))
    .context("failed to install tracing subscriber")
}
