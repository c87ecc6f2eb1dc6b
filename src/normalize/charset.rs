//! Message-body character validation.
//!
//! The carrier accepts two character sets: a single-byte set (ASCII letters
//! and digits, a fixed group of accented letters, space, punctuation, and
//! line breaks) and a double-byte set. Characters outside the union are
//! rejected outright. Double-byte characters are legal but halve the
//! effective maximum message length, which callers surface as a warning.

use crate::error::{TransportError, TransportResult};

/// Accented letters and currency/symbol characters in the single-byte set.
const SINGLE_BYTE_EXTRA: &str = "äöüÄÖÜàùòìèé§Ññ£$@";

/// Punctuation allowed in the single-byte set.
const SINGLE_BYTE_PUNCT: &str = "/?!#%&()*+,-:;<=>.\"'";

/// Characters that consume two encoding units on the carrier's transport.
const DOUBLE_BYTE_SET: &str = "|{}[]€\\~^";

/// Outcome of a successful body validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckedBody<'a> {
    /// The validated text, unchanged.
    pub text: &'a str,
    /// True when the body contains at least one double-byte character,
    /// reducing the effective maximum message length.
    pub double_byte: bool,
}

fn in_single_byte_set(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || ch == ' '
        || ch == '\n'
        || ch == '\r'
        || SINGLE_BYTE_EXTRA.contains(ch)
        || SINGLE_BYTE_PUNCT.contains(ch)
}

/// Validate a message body against the carrier charset.
///
/// Returns the text unchanged together with an advisory flag; fails with an
/// encoding error naming the first character outside both sets.
pub fn validate_message_body(text: &str) -> TransportResult<CheckedBody<'_>> {
    let mut double_byte = false;
    for ch in text.chars() {
        if DOUBLE_BYTE_SET.contains(ch) {
            double_byte = true;
        } else if !in_single_byte_set(ch) {
            return Err(TransportError::Encoding(ch));
        }
    }
    Ok(CheckedBody { text, double_byte })
}
