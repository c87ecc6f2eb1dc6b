//! In-process bus substrate.
//!
//! # Responsibilities
//! - Route published messages to the routing key's subscriber
//! - Buffer messages published before a subscriber attaches
//! - Bound in-flight handler invocations to the subscriber's prefetch limit
//!
//! # Design Decisions
//! - One subscriber per routing key; the worker is the only consumer here
//! - Prefetch is a semaphore: prefetch = 1 gives strict one-at-a-time
//!   delivery, the next message starts only after the handler resolves
//! - Every publish is appended to a journal for inspection

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex, Semaphore};

use crate::bus::{BusMessage, Consumer, MessageBus};
use crate::error::{TransportError, TransportResult};

#[derive(Default)]
struct Topic {
    backlog: VecDeque<BusMessage>,
    sender: Option<mpsc::UnboundedSender<BusMessage>>,
}

/// Topic-map bus living inside the worker process.
#[derive(Default)]
pub struct InMemoryBus {
    topics: Mutex<HashMap<String, Topic>>,
    journal: Mutex<Vec<(String, BusMessage)>>,
}

impl InMemoryBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages published so far on a routing key, in publish order.
    pub async fn published(&self, routing_key: &str) -> Vec<BusMessage> {
        self.journal
            .lock()
            .await
            .iter()
            .filter(|(key, _)| key == routing_key)
            .map(|(_, msg)| msg.clone())
            .collect()
    }
}

#[async_trait]
impl MessageBus for InMemoryBus {
    async fn publish(&self, routing_key: &str, message: BusMessage) -> TransportResult<()> {
        self.journal
            .lock()
            .await
            .push((routing_key.to_string(), message.clone()));

        let mut topics = self.topics.lock().await;
        let topic = topics.entry(routing_key.to_string()).or_default();
        if let Some(tx) = &topic.sender {
            if tx.send(message.clone()).is_ok() {
                return Ok(());
            }
            // Consume loop is gone; fall back to buffering.
            topic.sender = None;
        }
        topic.backlog.push_back(message);
        Ok(())
    }

    async fn subscribe(
        &self,
        routing_key: &str,
        consumer: Arc<dyn Consumer>,
        prefetch: usize,
    ) -> TransportResult<()> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        {
            let mut topics = self.topics.lock().await;
            let topic = topics.entry(routing_key.to_string()).or_default();
            if topic.sender.is_some() {
                return Err(TransportError::Bus(format!(
                    "routing key '{routing_key}' already has a subscriber"
                )));
            }
            for buffered in topic.backlog.drain(..) {
                let _ = tx.send(buffered);
            }
            topic.sender = Some(tx);
        }

        let in_flight = Arc::new(Semaphore::new(prefetch.max(1)));
        let routing_key = routing_key.to_string();
        tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                let permit = match in_flight.clone().acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => break,
                };
                let consumer = consumer.clone();
                let routing_key = routing_key.clone();
                tokio::spawn(async move {
                    if let Err(error) = consumer.handle(message).await {
                        tracing::error!(%routing_key, %error, "consumer failed");
                    }
                    drop(permit);
                });
            }
            tracing::debug!(%routing_key, "consume loop stopped");
        });
        Ok(())
    }
}
