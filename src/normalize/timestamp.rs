//! Carrier timestamp conversion.

use chrono::NaiveDateTime;

use crate::error::{TransportError, TransportResult};

/// The carrier's wire format for timestamps.
const CARRIER_FORMAT: &str = "%Y.%m.%d %H:%M:%S";

/// Convert a carrier timestamp (`YYYY.MM.DD HH:MM:SS`) to ISO-8601.
///
/// An empty or absent timestamp yields an empty string; anything else that
/// fails to parse is a format error.
pub fn parse_carrier_timestamp(raw: &str) -> TransportResult<String> {
    if raw.is_empty() {
        return Ok(String::new());
    }
    let ts = NaiveDateTime::parse_from_str(raw, CARRIER_FORMAT)
        .map_err(|_| TransportError::Format(raw.to_string()))?;
    Ok(ts.format("%Y-%m-%dT%H:%M:%S").to_string())
}
