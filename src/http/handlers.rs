//! Webhook request handlers.
//!
//! Each handler is a function of the request: parameters are merged from the
//! query string and form body, validated against the operation's required
//! set, normalized, and published to the bus. Errors map to a synchronous
//! HTTP response and never touch the bus.

use std::collections::HashMap;

use axum::{
    body::to_bytes,
    extract::{Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use url::form_urlencoded;

use crate::bus::{inbound_key, receipt_key, BusMessage};
use crate::error::TransportError;
use crate::http::server::AppState;
use crate::normalize::{normalize_msisdn, parse_carrier_timestamp};

/// Cap on webhook bodies; carrier payloads are a handful of short fields.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Webhook-local request failure, surfaced as an HTTP response.
#[derive(Debug)]
pub(crate) enum RequestError {
    MissingKey(&'static str),
    Value(String),
    Publish(TransportError),
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        match self {
            RequestError::MissingKey(key) => (
                StatusCode::BAD_REQUEST,
                format!(
                    "Need more request keys to complete this request.\n\n\
                     Missing request key: {key}"
                ),
            )
                .into_response(),
            RequestError::Value(detail) => {
                (StatusCode::BAD_REQUEST, format!("ValueError: {detail}")).into_response()
            }
            RequestError::Publish(error) => {
                tracing::error!(%error, "failed to publish webhook event");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to enqueue message".to_string(),
                )
                    .into_response()
            }
        }
    }
}

/// Request parameters merged from the query string and form body.
struct Params(HashMap<String, String>);

impl Params {
    async fn from_request(req: Request) -> Result<Self, RequestError> {
        let mut map = HashMap::new();
        if let Some(query) = req.uri().query() {
            for (key, value) in form_urlencoded::parse(query.as_bytes()) {
                map.insert(key.into_owned(), value.into_owned());
            }
        }
        // Content type is already restricted by middleware; any body left
        // here is form-encoded.
        let body = to_bytes(req.into_body(), MAX_BODY_BYTES)
            .await
            .map_err(|e| RequestError::Value(e.to_string()))?;
        for (key, value) in form_urlencoded::parse(&body) {
            map.insert(key.into_owned(), value.into_owned());
        }
        Ok(Self(map))
    }

    fn require(&self, key: &'static str) -> Result<&str, RequestError> {
        self.0
            .get(key)
            .map(String::as_str)
            .ok_or(RequestError::MissingKey(key))
    }
}

fn timestamp(params: &Params) -> Result<String, RequestError> {
    parse_carrier_timestamp(params.require("time")?).map_err(|e| RequestError::Value(e.to_string()))
}

fn empty_ok() -> Response {
    ([(header::CONTENT_TYPE, "text/plain")], "").into_response()
}

/// Inbound SMS delivery from the carrier.
pub(crate) async fn receive_sms(State(state): State<AppState>, req: Request) -> Response {
    match handle_receive(&state, req).await {
        Ok(()) => empty_ok(),
        Err(error) => {
            tracing::info!(?error, "rejecting inbound SMS webhook");
            error.into_response()
        }
    }
}

async fn handle_receive(state: &AppState, req: Request) -> Result<(), RequestError> {
    let params = Params::from_request(req).await?;
    let destination = params.require("destination")?.to_string();
    let event = BusMessage::new()
        .with("transport_message_id", params.require("messageid")?)
        .with("transport_timestamp", timestamp(&params)?)
        .with("transport_network_id", params.require("provider")?)
        .with("transport_keyword", params.require("keyword")?)
        .with("to_msisdn", normalize_msisdn(&destination))
        .with("from_msisdn", normalize_msisdn(params.require("sender")?))
        .with("message", params.require("text")?);

    let routing_key = inbound_key(&state.config.transport_name, &destination);
    state
        .bus
        .publish(&routing_key, event)
        .await
        .map_err(RequestError::Publish)?;
    tracing::debug!(%routing_key, "inbound SMS enqueued");
    Ok(())
}

/// Delivery receipt for a previously sent outbound message.
pub(crate) async fn delivery_receipt(State(state): State<AppState>, req: Request) -> Response {
    match handle_receipt(&state, req).await {
        Ok(()) => empty_ok(),
        Err(error) => {
            tracing::info!(?error, "rejecting delivery receipt webhook");
            error.into_response()
        }
    }
}

async fn handle_receipt(state: &AppState, req: Request) -> Result<(), RequestError> {
    let params = Params::from_request(req).await?;
    let event = BusMessage::new()
        .with("transport_message_id", params.require("smsid")?)
        .with("transport_status", params.require("status")?)
        .with("transport_status_message", params.require("text")?)
        .with("transport_timestamp", timestamp(&params)?)
        .with("transport_network_id", params.require("provider")?)
        .with("to_msisdn", normalize_msisdn(params.require("sender")?))
        .with("id", params.require("messageid")?);

    let routing_key = receipt_key(&state.config.transport_name);
    state
        .bus
        .publish(&routing_key, event)
        .await
        .map_err(RequestError::Publish)?;
    tracing::debug!(%routing_key, "delivery receipt enqueued");
    Ok(())
}

/// Liveness probe: no validation, no publish.
pub(crate) async fn health() -> &'static str {
    "OK"
}
