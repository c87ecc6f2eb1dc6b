//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! transport worker. All types derive Serde traits for deserialization from
//! config files.

use serde::{Deserialize, Serialize};

/// Worker configuration, resolved once at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransportConfig {
    /// Transport name, substituted into every bus routing key.
    pub transport_name: String,

    /// Carrier gateway URL for outbound HTTP POSTs.
    pub url: String,

    /// Carrier account credentials sent with every outbound request.
    pub username: String,
    pub password: String,
    pub owner: String,
    pub service: String,

    /// Default subservice; a message's `transport_keyword` overrides it.
    pub subservice: String,

    /// Port the webhook server binds to.
    pub web_port: u16,

    /// Path the carrier delivers inbound SMS to.
    pub web_receive_path: String,

    /// Path the carrier delivers receipts to.
    pub web_receipt_path: String,

    /// Response header carrying the carrier's correlation id.
    #[serde(default = "default_header")]
    pub header: String,

    /// Prefetch limit on the outbound consumer; 1 means strictly sequential
    /// delivery and at most one concurrent carrier connection.
    #[serde(default = "default_throttle")]
    pub throttle: usize,

    /// Upper bound on the outbound HTTP call, so a hung carrier cannot hold
    /// a throttle slot forever.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

fn default_header() -> String {
    "X-Nth-Smsid".to_string()
}

fn default_throttle() -> usize {
    1
}

fn default_http_timeout_secs() -> u64 {
    30
}
