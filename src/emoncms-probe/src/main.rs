//! Query an emoncms server and print what it reports
//!
//! ```bash
//! emoncms-probe                   # feeds of the server in ./config.json
//! emoncms-probe other.json        # same, other config file
//! emoncms-probe config.json 12    # all fields of feed 12
//! ```

use anyhow::{Context, Result};
use emoncms_rs::{ClientConfig, EmoncmsClient};

mod telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_telemetry()?;

    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| "config.json".to_string());
    let feed_id = args
        .next()
        .map(|id| id.parse::<u64>())
        .transpose()
        .context("feed id must be a positive integer")?;

    // Load configuration
    let config = ClientConfig::load(&config_path).unwrap_or_else(|err| {
        tracing::warn!("Failed to load {}, using defaults: {}", config_path, err);
        ClientConfig::default()
    });

    tracing::info!("emoncms probe starting");
    tracing::info!("  Server: {}", config.base_url);
    tracing::info!("  Timeout: {:?}", config.request_timeout);
    tracing::info!(
        "  TLS verify: {}, shared session: {}",
        !config.insecure_skip_verify,
        config.reuse_session
    );

    let client = EmoncmsClient::new(config);

    let output = match feed_id {
        Some(id) => {
            let feed = client
                .get_feed_fields(id)
                .await
                .with_context(|| format!("no fields for feed {}", id))?;
            serde_json::to_string_pretty(&feed)?
        }
        None => {
            let feeds = client.list_feeds().await.context("feed list unavailable")?;
            tracing::info!("{} feeds found", feeds.len());
            serde_json::to_string_pretty(&feeds)?
        }
    };

    println!("{}", output);
    Ok(())
}
