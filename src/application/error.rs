//! Application-level error type.
//!
//! Wraps the failure taxonomies of the envelope, the processor transport
//! and the transaction store, and maps each to an HTTP status code so the
//! embedding application can translate failures without matching on every
//! inner variant. The core never retries or silently recovers; the
//! discriminated failure always reaches the caller.

use http::StatusCode;
use thiserror::Error;

use crate::domain::envelope::EnvelopeError;
use crate::domain::foundation::InvalidTransition;
use crate::ports::{ProcessorError, StoreError};

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Command input failed validation before any work happened.
    #[error("validation failed: {0}")]
    Validation(&'static str),

    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    #[error(transparent)]
    Processor(#[from] ProcessorError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Transition(#[from] InvalidTransition),

    /// The processor answered but declined the operation.
    #[error("processor declined: {status_code}: {message}")]
    Declined {
        status_code: String,
        message: String,
    },
}

impl GatewayError {
    /// Maps the error to an appropriate HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,

            // Unauthenticated inbound data
            GatewayError::Envelope(EnvelopeError::SignatureMismatch { .. }) => {
                StatusCode::UNAUTHORIZED
            }

            // Broken inbound material
            GatewayError::Envelope(_) => StatusCode::BAD_REQUEST,

            GatewayError::Processor(ProcessorError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::Processor(_) => StatusCode::BAD_GATEWAY,

            GatewayError::Store(_) | GatewayError::Transition(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            GatewayError::Declined { .. } => StatusCode::BAD_REQUEST,
        }
    }
}
