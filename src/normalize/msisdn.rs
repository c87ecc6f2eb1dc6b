//! MSISDN canonicalization.

/// Canonicalize a phone number for the bus.
///
/// Strips formatting characters and folds an international `00` prefix into
/// `+`. Numbers already in `+` form (or short codes) pass through.
pub fn normalize_msisdn(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    match stripped.strip_prefix("00") {
        Some(rest) => format!("+{rest}"),
        None => stripped,
    }
}

/// Convert a canonical MSISDN to the carrier's dialing format.
///
/// The carrier expects `00`-prefixed international numbers, so a leading `+`
/// is replaced; anything else is passed through unchanged.
pub fn normalize_outbound_msisdn(msisdn: &str) -> String {
    match msisdn.strip_prefix('+') {
        Some(rest) => format!("00{rest}"),
        None => msisdn.to_string(),
    }
}
