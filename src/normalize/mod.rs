//! Normalization and validation of carrier data.
//!
//! # Responsibilities
//! - Canonicalize MSISDNs for the bus; convert them to the carrier's
//!   dialing format for outbound requests
//! - Convert carrier timestamps to ISO-8601
//! - Enforce the carrier's message-body character policy
//!
//! # Design Decisions
//! - Pure functions, no I/O; callers decide how to surface errors
//! - Character validation runs before any network call
//! - The double-byte advisory is a flag on the result, not an error

pub mod charset;
pub mod msisdn;
pub mod timestamp;

pub use charset::{validate_message_body, CheckedBody};
pub use msisdn::{normalize_msisdn, normalize_outbound_msisdn};
pub use timestamp::parse_carrier_timestamp;
