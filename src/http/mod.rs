//! Webhook HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! Carrier HTTP request
//!     → middleware.rs (content-type restriction)
//!     → handlers.rs (merge query+form params, validate, normalize)
//!     → bus publish (inbound / receipt routing key)
//!     → 200 empty body, or 400 with a diagnostic text body
//! ```
//!
//! # Design Decisions
//! - Explicit path → handler route table, no handler inheritance
//! - Handlers are functions of the request; all state arrives via AppState
//! - Every code path writes a complete response

pub mod handlers;
pub mod middleware;
pub mod server;

pub use server::{AppState, WebhookServer};
