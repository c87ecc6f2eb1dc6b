//! Outbound delivery pipeline.
//!
//! Per-message state machine: received → built → sent → acknowledged or
//! failed. The `Consumer` impl is the catch-all wrapper: it routes every
//! error to failure reporting and always resolves, so a bad message can
//! never take the consume loop or the worker down.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::bus::{ack_key, BusMessage, Consumer, MessageBus};
use crate::config::TransportConfig;
use crate::error::{TransportError, TransportResult};
use crate::failure::FailureReporter;
use crate::outbound::params::build_request_params;

/// Fixed identifying header sent on every carrier request.
const USER_AGENT: &str = concat!("sms-transport/", env!("CARGO_PKG_VERSION"));

/// Consumes bus messages queued for carrier delivery.
pub struct DeliveryPipeline {
    config: Arc<TransportConfig>,
    bus: Arc<dyn MessageBus>,
    client: Client,
    failures: FailureReporter,
    ack_routing_key: String,
}

impl DeliveryPipeline {
    pub fn new(config: Arc<TransportConfig>, bus: Arc<dyn MessageBus>) -> TransportResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;
        let failures = FailureReporter::new(&config.transport_name, bus.clone());
        let ack_routing_key = ack_key(&config.transport_name);
        Ok(Self {
            config,
            bus,
            client,
            failures,
            ack_routing_key,
        })
    }

    /// built → sent → acknowledged, or an error for the wrapper to report.
    async fn deliver(&self, message: &BusMessage) -> TransportResult<()> {
        let params = build_request_params(&self.config, message)?;
        if params.double_byte {
            tracing::warn!(
                "message contains double-byte characters, max SMS length is 70 chars as a result"
            );
        }

        tracing::debug!(url = %self.config.url, "posting outbound message to carrier");
        let response = self
            .client
            .post(&self.config.url)
            .form(&params.fields)
            .send()
            .await?;

        let correlation = response
            .headers()
            .get(self.config.header.as_str())
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        match correlation {
            Some(transport_message_id) => {
                let ack = BusMessage::new()
                    .with("id", message.require_str("id")?)
                    .with("transport_message_id", transport_message_id.as_str());
                self.bus.publish(&self.ack_routing_key, ack).await?;
                tracing::info!(%transport_message_id, "outbound message acknowledged");
                Ok(())
            }
            None => {
                let body = response.text().await.unwrap_or_default();
                Err(TransportError::Protocol {
                    header: self.config.header.clone(),
                    body,
                })
            }
        }
    }
}

#[async_trait]
impl Consumer for DeliveryPipeline {
    async fn handle(&self, message: BusMessage) -> TransportResult<()> {
        if let Err(error) = self.deliver(&message).await {
            tracing::error!(%error, "outbound delivery failed");
            self.failures.report(message, &error.to_string()).await;
        }
        Ok(())
    }
}
