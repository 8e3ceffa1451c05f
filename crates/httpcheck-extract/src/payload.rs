//! JSON payload decoding.
//!
//! The payload is only accepted as a JSON object sent with an
//! `application/json` media type. Top-level keys become a case-insensitive
//! [`FieldLookup`] of [`RawValue`]s; nested objects and arrays are kept whole.

use crate::{FieldLookup, RequestContext};
use httpcheck_core::{CheckError, CheckResult, RawValue};
use mime::Mime;
use serde_json::{Map, Value};

/// The only media type accepted for payloads.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Returns `true` if `content_type` names the JSON media type.
///
/// Everything from the first `;` on is ignored, whatever it holds, and the
/// rest is compared case-insensitively. A missing header is not JSON.
///
/// # Example
///
/// ```rust
/// use httpcheck_extract::is_json_content_type;
///
/// assert!(is_json_content_type(Some("application/json")));
/// assert!(is_json_content_type(Some("Application/JSON; charset=utf-8")));
/// assert!(!is_json_content_type(Some("text/plain")));
/// assert!(!is_json_content_type(None));
/// ```
#[must_use]
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(JSON_MEDIA_TYPE))
}

/// Returns the media type of a Content-Type value without its parameters.
///
/// Falls back to the text before the first `;` when the value does not
/// parse as a media type.
#[must_use]
pub fn media_type(content_type: &str) -> String {
    match content_type.trim().parse::<Mime>() {
        Ok(mime) => mime.essence_str().to_string(),
        Err(_) => content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_string(),
    }
}

/// Decodes a request body as a JSON object.
///
/// # Errors
///
/// Returns [`CheckError::PayloadDecodeError`] if the body is empty, is not
/// valid JSON, or is valid JSON but not an object.
///
/// # Example
///
/// ```rust
/// use httpcheck_core::RawValue;
/// use httpcheck_extract::decode_payload;
///
/// let payload = decode_payload(br#"{"Name": "Alice", "age": 30}"#).unwrap();
/// assert_eq!(payload.get("name"), Some(&RawValue::from("Alice")));
/// assert_eq!(payload.get("AGE"), Some(&RawValue::Integer(30)));
///
/// assert!(decode_payload(b"[1, 2]").is_err());
/// ```
pub fn decode_payload(body: &[u8]) -> CheckResult<FieldLookup<RawValue>> {
    if body.is_empty() {
        return Err(CheckError::payload_decode("empty request body"));
    }

    let object: Map<String, Value> =
        serde_json::from_slice(body).map_err(|e| CheckError::payload_decode(e.to_string()))?;

    Ok(object
        .into_iter()
        .map(|(key, value)| (key, RawValue::from(value)))
        .collect())
}

/// Extracts the payload of a request.
///
/// The Content-Type is checked before the body is looked at, so a
/// non-JSON request fails with [`CheckError::UnsupportedContentType`] even
/// if its body would not decode.
pub fn extract_payload(ctx: &RequestContext) -> CheckResult<FieldLookup<RawValue>> {
    let content_type = ctx.content_type();

    if !is_json_content_type(content_type) {
        tracing::debug!(
            content_type = content_type.unwrap_or_default(),
            "Rejected non-JSON payload"
        );
        return Err(CheckError::unsupported_content_type(
            content_type.map(media_type).as_deref(),
        ));
    }

    let payload = decode_payload(ctx.body())?;
    tracing::trace!(fields = payload.len(), "Decoded JSON payload");
    Ok(payload)
}
