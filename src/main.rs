//! SMS transport worker binary.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │               TRANSPORT WORKER               │
//!                        │                                              │
//!   Carrier webhooks     │  ┌─────────┐   ┌───────────┐   ┌─────────┐  │
//!   ─────────────────────┼─▶│  http   │──▶│ normalize │──▶│   bus   │──┼──▶ inbound /
//!   (receive / receipt)  │  │ server  │   │ validate  │   │ publish │  │    receipt keys
//!                        │  └─────────┘   └───────────┘   └─────────┘  │
//!                        │                                              │
//!   sms.outbound.<T> ────┼─▶┌─────────┐   ┌───────────┐   ┌─────────┐  │
//!   (prefetch=throttle)  │  │   bus   │──▶│ outbound  │──▶│ carrier │──┼──▶ HTTP POST
//!                        │  │ consume │   │ pipeline  │   │  HTTP   │  │
//!                        │  └─────────┘   └─────┬─────┘   └─────────┘  │
//!                        │                      │                      │
//!                        │                      ▼                      │
//!                        │          ack key  or  failure key           │
//!                        └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sms_transport::bus::{outbound_key, MessageBus};
use sms_transport::config::load_config;
use sms_transport::lifecycle::signals;
use sms_transport::{DeliveryPipeline, InMemoryBus, Shutdown, WebhookServer};

#[derive(Parser)]
#[command(name = "sms-transport", about = "Carrier SMS transport worker")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "transport.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sms_transport=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("sms-transport v{} starting", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config = Arc::new(load_config(&args.config)?);

    tracing::info!(
        transport_name = %config.transport_name,
        carrier_url = %config.url,
        web_port = config.web_port,
        throttle = config.throttle,
        "Configuration loaded"
    );

    let bus: Arc<dyn MessageBus> = Arc::new(InMemoryBus::new());

    // Consumers attach before the listener so nothing is dropped at startup.
    let pipeline = Arc::new(DeliveryPipeline::new(config.clone(), bus.clone())?);
    bus.subscribe(
        &outbound_key(&config.transport_name),
        pipeline,
        config.throttle,
    )
    .await?;

    let shutdown = Shutdown::new();
    tokio::spawn(signals::listen(shutdown.clone()));

    let listener = TcpListener::bind(("0.0.0.0", config.web_port)).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for carrier webhooks");

    let server = WebhookServer::new(config, bus);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
