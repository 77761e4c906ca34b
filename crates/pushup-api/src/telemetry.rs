//! Tracing subscriber setup

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "pixel_pushup=debug,pushup_api=debug,pushup_storage=info,tower_http=debug";

/// Install the global subscriber. `log_format` of `json` switches to JSON lines.
pub fn init_telemetry(log_format: &str, environment: &str) -> Result<(), anyhow::Error> {
    let json = log_format.eq_ignore_ascii_case("json");

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(fmt::layer))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    tracing::info!(log_format = %log_format, environment = %environment, "Tracing initialized");
    Ok(())
}
