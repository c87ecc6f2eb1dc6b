//! Message bus interface and envelope types.
//!
//! # Data Flow
//! ```text
//! Webhook handler ──publish──▶ bus ──subscribe──▶ Outbound pipeline
//!                                  │
//!                                  └──▶ ack / failure routing keys
//! ```
//!
//! # Design Decisions
//! - The bus is a trait seam; components receive it injected, never ambient
//! - Envelopes are open string-keyed maps with per-operation required fields
//! - Prefetch is the consumer-side backpressure control (throttle)

pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{TransportError, TransportResult};

/// Envelope exchanged over the bus.
///
/// An open mapping with no enforced schema; operations check their own
/// required fields through [`BusMessage::require_str`]. Immutable once
/// published.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusMessage(Map<String, Value>);

impl BusMessage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Field rendered as text, accepting both string and numeric values.
    pub fn get_display(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn require_str(&self, key: &'static str) -> TransportResult<&str> {
        self.get_str(key).ok_or(TransportError::MissingField(key))
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

/// Handler for messages delivered on a subscribed routing key.
#[async_trait]
pub trait Consumer: Send + Sync {
    async fn handle(&self, message: BusMessage) -> TransportResult<()>;
}

/// Publish/subscribe seam to the bus substrate.
#[async_trait]
pub trait MessageBus: Send + Sync {
    /// Publish a message to a routing key.
    async fn publish(&self, routing_key: &str, message: BusMessage) -> TransportResult<()>;

    /// Subscribe a consumer to a routing key with at most `prefetch`
    /// messages in flight concurrently.
    async fn subscribe(
        &self,
        routing_key: &str,
        consumer: Arc<dyn Consumer>,
        prefetch: usize,
    ) -> TransportResult<()>;
}

/// Routing key for inbound SMS events, scoped by destination number.
pub fn inbound_key(transport_name: &str, destination: &str) -> String {
    format!("sms.inbound.{transport_name}.{destination}")
}

/// Routing key for delivery receipt events.
pub fn receipt_key(transport_name: &str) -> String {
    format!("sms.receipt.{transport_name}")
}

/// Routing key the outbound pipeline consumes from.
pub fn outbound_key(transport_name: &str) -> String {
    format!("sms.outbound.{transport_name}")
}

/// Routing key for delivery acknowledgements.
pub fn ack_key(transport_name: &str) -> String {
    format!("sms.ack.{transport_name}")
}

/// Routing key for failure reports.
pub fn failure_key(transport_name: &str) -> String {
    format!("sms.outbound.{transport_name}.failures")
}
