//! Redis Messaging - Main Entry Point
//!
//! Runs a messaging node that logs broadcasts and answers `ping` data requests.

use clap::Parser;
use serde_json::{json, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use validator::Validate;

use redis_messaging::infrastructure::driven_adapters::config::AppConfig;
use redis_messaging::{ReceivedMessage, RedisApi};

/// Command line arguments
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Filter ID for this node, overriding configuration
    #[arg(long, env = "FILTER_ID")]
    filter_id: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::load()?;
    if let Some(filter_id) = cli.filter_id {
        config.messaging.filter_id = Some(filter_id);
    }
    config.validate()?;

    // Initialize tracing
    let json = config.logging.json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "redis_messaging=info".into()),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();
    tracing::info!("Configuration loaded successfully");

    // Connect
    let api = RedisApi::from_config(&config).await?;

    // Register channels and responders
    api.register_channel("broadcast", |message: &ReceivedMessage| {
        tracing::info!(channel = %message.channel, filter = %message.filter, payload = %message.payload, "Broadcast received");
    })?;
    api.respond_to("ping", |data: Value| {
        json!({ "pong": data, "at": chrono::Utc::now().to_rfc3339() })
    });

    api.start_listeners().await?;
    tracing::info!(filter_id = ?api.filter_id(), "Node running, press Ctrl-C to stop");

    tokio::signal::ctrl_c().await?;
    api.shutdown().await;

    Ok(())
}
