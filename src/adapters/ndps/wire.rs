//! Wire codec for the processor's form-encoded envelopes.
//!
//! Outbound: `encData=<hex>&merchId=<id>` as
//! `application/x-www-form-urlencoded`. Inbound: the processor replies
//! with a form-encoded body carrying `encData` (possibly among other
//! fields); the value must be URL-decoded before it reaches the envelope's
//! decrypt operation.

use serde::Deserialize;

use crate::ports::{OutboundEnvelope, ProcessorError};

/// Encodes the outbound envelope as a form body, percent-encoding applied.
pub fn to_form_body(envelope: &OutboundEnvelope) -> Result<String, ProcessorError> {
    serde_urlencoded::to_string(envelope)
        .map_err(|e| ProcessorError::MalformedBody(e.to_string()))
}

#[derive(Debug, Deserialize)]
struct InboundForm {
    #[serde(rename = "encData", default)]
    enc_data: Option<String>,
}

/// Extracts the URL-decoded `encData` value from a processor reply body.
///
/// # Errors
///
/// - `ProcessorError::EmptyBody` for an empty reply (the processor answers
///   status enquiries for unknown transactions this way)
/// - `ProcessorError::MalformedBody` when the body is not form-encoded
/// - `ProcessorError::MissingEncData` when the field is absent or empty
pub fn extract_enc_data(body: &str) -> Result<String, ProcessorError> {
    if body.trim().is_empty() {
        return Err(ProcessorError::EmptyBody);
    }

    let form: InboundForm = serde_urlencoded::from_str(body)
        .map_err(|e| ProcessorError::MalformedBody(e.to_string()))?;

    match form.enc_data {
        Some(enc_data) if !enc_data.is_empty() => Ok(enc_data),
        _ => Err(ProcessorError::MissingEncData),
    }
}
