//! SMS carrier transport worker.
//!
//! Bridges an internal publish/subscribe bus and a carrier's HTTP SMS
//! gateway: inbound webhooks become validated bus messages, outbound bus
//! messages become carrier HTTP requests.

pub mod bus;
pub mod config;
pub mod error;
pub mod failure;
pub mod http;
pub mod lifecycle;
pub mod normalize;
pub mod outbound;

pub use bus::memory::InMemoryBus;
pub use config::TransportConfig;
pub use error::TransportError;
pub use http::WebhookServer;
pub use lifecycle::Shutdown;
pub use outbound::DeliveryPipeline;
