//! Content-type restriction middleware.
//!
//! Reusable request filter composed in front of the webhook handlers,
//! parameterized by the allowed body content types. Requests without a
//! declared content type pass through (the carrier also delivers via plain
//! GET query strings).

use std::future::Future;
use std::pin::Pin;

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Build a middleware function rejecting disallowed body content types
/// with 400.
pub fn restrict_content_type(
    allowed: &'static [&'static str],
) -> impl Fn(Request, Next) -> Pin<Box<dyn Future<Output = Response> + Send>> + Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            match body_content_type(&req) {
                Some(content_type) if !allowed.contains(&content_type.as_str()) => {
                    tracing::debug!(%content_type, "rejecting request body content type");
                    (
                        StatusCode::BAD_REQUEST,
                        format!("Bad Request, only '{}' allowed", allowed.join("', '")),
                    )
                        .into_response()
                }
                _ => next.run(req).await,
            }
        })
    }
}

/// The media type of the request body, without parameters, lowercased.
fn body_content_type(req: &Request) -> Option<String> {
    let value = req.headers().get(header::CONTENT_TYPE)?.to_str().ok()?;
    let media_type = value.split(';').next()?.trim();
    if media_type.is_empty() {
        None
    } else {
        Some(media_type.to_ascii_lowercase())
    }
}
