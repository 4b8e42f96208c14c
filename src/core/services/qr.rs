//! QR payloads
//!
//! A batch's QR code encodes a verification URL. Scanning yields either
//! that URL or, from older labels, the bare batch ID.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::error::LedgerError;

/// Default base URL for verification links
pub const DEFAULT_VERIFY_BASE_URL: &str = "https://ayur-trace.com";

/// `/verify/<id>` at the end of the payload, optionally followed by `/`, a query or a fragment
static VERIFY_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/verify/([^/?#\s]+)/?(?:[?#]\S*)?$").expect("verify path pattern is valid")
});

/// Build the verification URL for a batch
#[must_use]
pub fn verification_url(base_url: &str, batch_id: &str) -> String {
    format!("{}/verify/{batch_id}", base_url.trim_end_matches('/'))
}

/// Extract a batch ID from a scanned payload
///
/// URLs containing `/verify/<id>` yield `<id>`; anything else is taken as
/// the ID itself.
pub fn parse_scanned(payload: &str) -> Result<String, LedgerError> {
    let payload = payload.trim();
    if payload.is_empty() {
        return Err(LedgerError::InvalidPayload("empty payload".to_string()));
    }

    if let Some(caps) = VERIFY_PATH.captures(payload) {
        return Ok(caps[1].to_string());
    }

    if payload.contains("/verify/") || payload.chars().any(char::is_whitespace) {
        return Err(LedgerError::InvalidPayload(payload.to_string()));
    }

    Ok(payload.to_string())
}
