//! Transport-level error definitions.

use thiserror::Error;

/// Errors raised while processing messages for carrier delivery.
///
/// Webhook-local request errors (missing/malformed parameters) live in the
/// http module and map to 400 responses; they never reach the bus. Everything
/// here is either fatal to a single outbound message (routed to failure
/// reporting) or fatal to startup.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Message body contains a character outside the carrier's charset.
    #[error("illegal character '{0}' in message body")]
    Encoding(char),

    /// Carrier timestamp did not match `YYYY.MM.DD HH:MM:SS`.
    #[error("malformed carrier timestamp '{0}'")]
    Format(String),

    /// Carrier response did not carry the expected correlation header.
    #[error("no {header} header in carrier response, content: {body}")]
    Protocol { header: String, body: String },

    /// Outbound HTTP call failed (connect, timeout, or body read).
    #[error("carrier request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Bus publish or subscribe failed.
    #[error("bus error: {0}")]
    Bus(String),

    /// A bus message is missing a field this operation requires.
    #[error("missing field '{0}' in bus message")]
    MissingField(&'static str),
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;
