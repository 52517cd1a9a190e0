//! Console logging for the probe
//!
//! Human-readable output by default, JSON lines when `EMONCMS_LOG_FORMAT=json`.
//! Levels come from `RUST_LOG`.

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "emoncms_rs=debug,emoncms_core=info,emoncms_probe=info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::to_ascii_lowercase).as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

pub fn init_telemetry() -> Result<()> {
    let format = LogFormat::from_env_value(std::env::var("EMONCMS_LOG_FORMAT").ok().as_deref());

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // Logs go to stderr so stdout stays parseable JSON
    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init()?,
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init()?,
    }

    tracing::debug!("Telemetry initialized ({:?})", format);
    Ok(())
}
