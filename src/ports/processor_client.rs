//! Processor client port.
//!
//! The envelope produces hex ciphertext; something still has to carry it
//! to the processor and bring the reply's ciphertext back. That transport
//! concern lives behind this port so handlers can be exercised against a
//! mock and the application can choose its own HTTP stack policy
//! (timeouts belong here, never to the crypto core).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which processor API an envelope is destined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessorEndpoint {
    /// Payment initiation (`AUTH`).
    Auth,
    /// Transaction status enquiry (`TXNVERIFICATION`).
    Status,
    /// Refund initiation (`REFUNDINIT`).
    Refund,
}

/// The outbound wire artifact: `encData=<hex>&merchId=<id>`, transmitted
/// as an `application/x-www-form-urlencoded` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundEnvelope {
    #[serde(rename = "encData")]
    pub enc_data: String,
    #[serde(rename = "merchId")]
    pub merch_id: String,
}

/// Errors from the processor transport.
#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("processor request failed: {0}")]
    Request(String),

    #[error("processor request timed out")]
    Timeout,

    #[error("processor returned HTTP {0}")]
    Status(u16),

    #[error("processor returned an empty body")]
    EmptyBody,

    #[error("processor response body was not form-encoded: {0}")]
    MalformedBody(String),

    #[error("processor response carried no encData field")]
    MissingEncData,
}

impl ProcessorError {
    /// Whether the caller may reasonably retry the exchange.
    ///
    /// The envelope itself never retries; this only informs the embedding
    /// application's policy for transport-level failures.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProcessorError::Request(_) | ProcessorError::Timeout => true,
            ProcessorError::Status(code) => *code >= 500,
            _ => false,
        }
    }
}

/// Port for exchanging encrypted envelopes with the processor.
#[async_trait]
pub trait ProcessorClient: Send + Sync {
    /// POST the outbound envelope to the endpoint and return the
    /// URL-decoded inbound `encData` hex extracted from the reply.
    async fn exchange(
        &self,
        endpoint: ProcessorEndpoint,
        envelope: &OutboundEnvelope,
    ) -> Result<String, ProcessorError>;
}
