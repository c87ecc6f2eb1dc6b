//! Failure reporting.
//!
//! Wraps a failed outbound message and a human-readable reason into a report
//! published on the transport's failure routing key. Reporting is
//! best-effort: a failure to publish the report is logged and discarded,
//! never raised into the caller.

use std::sync::Arc;

use serde_json::Value;

use crate::bus::{failure_key, BusMessage, MessageBus};

/// Best-effort publisher of failure reports.
pub struct FailureReporter {
    bus: Arc<dyn MessageBus>,
    routing_key: String,
}

impl FailureReporter {
    pub fn new(transport_name: &str, bus: Arc<dyn MessageBus>) -> Self {
        Self {
            bus,
            routing_key: failure_key(transport_name),
        }
    }

    /// Publish `{message, reason}` for the original message.
    pub async fn report(&self, message: BusMessage, reason: &str) {
        let report = BusMessage::new()
            .with("message", Value::Object(message.into_inner()))
            .with("reason", reason);
        if let Err(error) = self.bus.publish(&self.routing_key, report).await {
            tracing::error!(%error, reason, "failed to publish failure report");
        }
    }
}
