//! Webhook server setup.
//!
//! # Responsibilities
//! - Build the Axum router: receive, receipt, and health routes
//! - Restrict webhook POST bodies to form encoding
//! - Serve until the shutdown signal fires, then drain gracefully
//!
//! Requests are handled concurrently on independent tasks; the outbound
//! throttle does not apply here.

use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, middleware, routing::any, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::bus::MessageBus;
use crate::config::TransportConfig;
use crate::http::handlers::{delivery_receipt, health, receive_sms};
use crate::http::middleware::restrict_content_type;

/// The only body encoding the carrier webhooks accept.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Total time budget for handling one webhook request.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<TransportConfig>,
    pub bus: Arc<dyn MessageBus>,
}

/// HTTP server for the carrier webhooks.
pub struct WebhookServer {
    router: Router,
}

impl WebhookServer {
    /// Create a new webhook server with the given configuration.
    pub fn new(config: Arc<TransportConfig>, bus: Arc<dyn MessageBus>) -> Self {
        let state = AppState {
            config: config.clone(),
            bus,
        };

        // Health is registered after route_layer so it stays unrestricted.
        let router = Router::new()
            .route(&route_path(&config.web_receive_path), any(receive_sms))
            .route(&route_path(&config.web_receipt_path), any(delivery_receipt))
            .route_layer(middleware::from_fn(restrict_content_type(&[
                FORM_URLENCODED,
            ])))
            .route("/health", any(health))
            .with_state(state)
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(REQUEST_TIMEOUT_SECS),
            ))
            .layer(TraceLayer::new_for_http());

        Self { router }
    }

    /// Serve until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "webhook server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("webhook server stopped");
        Ok(())
    }
}

/// Configured paths may omit the leading slash; axum requires it.
fn route_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
