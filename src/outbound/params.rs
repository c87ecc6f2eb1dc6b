//! Carrier request parameter construction.

use std::collections::BTreeMap;

use crate::bus::BusMessage;
use crate::config::TransportConfig;
use crate::error::TransportResult;
use crate::normalize::{normalize_outbound_msisdn, validate_message_body};

/// Form parameters for one outbound carrier request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequestParams {
    pub fields: BTreeMap<&'static str, String>,
    /// Advisory: the body contains double-byte characters, reducing the
    /// effective maximum message length.
    pub double_byte: bool,
}

/// Merge static worker credentials with message-derived fields; message
/// fields override the defaults. Fails before any network I/O when the body
/// has illegal characters or a required field is missing.
pub fn build_request_params(
    config: &TransportConfig,
    message: &BusMessage,
) -> TransportResult<OutboundRequestParams> {
    let body = validate_message_body(message.require_str("message")?)?;

    let mut fields = BTreeMap::new();
    fields.insert("username", config.username.clone());
    fields.insert("password", config.password.clone());
    fields.insert("owner", config.owner.clone());
    fields.insert("service", config.service.clone());
    fields.insert("subservice", config.subservice.clone());

    fields.insert(
        "call-number",
        normalize_outbound_msisdn(message.require_str("to_msisdn")?),
    );
    fields.insert("origin", message.require_str("from_msisdn")?.to_string());
    let messageid = match message.get_str("reply_to") {
        Some(reply_to) => reply_to,
        None => message.require_str("id")?,
    };
    fields.insert("messageid", messageid.to_string());
    fields.insert(
        "provider",
        message.require_str("transport_network_id")?.to_string(),
    );
    fields.insert(
        "tariff",
        message.get_display("tariff").unwrap_or_else(|| "0".to_string()),
    );
    fields.insert("text", body.text.to_string());
    if let Some(keyword) = message.get_str("transport_keyword") {
        fields.insert("subservice", keyword.to_string());
    }

    Ok(OutboundRequestParams {
        fields,
        double_byte: body.double_byte,
    })
}
