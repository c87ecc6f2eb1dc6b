//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (throttle >= 1, port != 0)
//! - Check the carrier URL actually parses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: TransportConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use url::Url;

use crate::config::schema::TransportConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub problem: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.problem)
    }
}

/// Validate a parsed configuration, collecting every problem.
pub fn validate_config(config: &TransportConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut fail = |field: &'static str, problem: String| {
        errors.push(ValidationError { field, problem });
    };

    if config.transport_name.is_empty() {
        fail("transport_name", "must not be empty".into());
    }
    match Url::parse(&config.url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => fail("url", format!("unsupported scheme '{}'", url.scheme())),
        Err(e) => fail("url", format!("not a valid URL: {e}")),
    }
    if config.web_port == 0 {
        fail("web_port", "must not be 0".into());
    }
    if config.web_receive_path.is_empty() {
        fail("web_receive_path", "must not be empty".into());
    }
    if config.web_receipt_path.is_empty() {
        fail("web_receipt_path", "must not be empty".into());
    }
    if config.header.is_empty() {
        fail("header", "must not be empty".into());
    }
    if config.throttle == 0 {
        fail("throttle", "must be at least 1".into());
    }
    if config.http_timeout_secs == 0 {
        fail("http_timeout_secs", "must be at least 1".into());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
