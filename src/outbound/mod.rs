//! Outbound delivery pipeline.
//!
//! # Data Flow
//! ```text
//! bus (sms.outbound.<T>, prefetch = throttle)
//!     → params.rs (merge credentials + message fields, validate body)
//!     → pipeline.rs (POST to carrier, extract correlation header)
//!     → bus (sms.ack.<T>)  or  failure reporting (sms.outbound.<T>.failures)
//! ```
//!
//! # Design Decisions
//! - One sequential async function per message; a single wrapper catches
//!   every error and converts it into a failure report
//! - Character validation runs before any network I/O
//! - The HTTP call is bounded by a timeout so a hung carrier cannot hold
//!   the throttle slot

pub mod params;
pub mod pipeline;

pub use pipeline::DeliveryPipeline;
