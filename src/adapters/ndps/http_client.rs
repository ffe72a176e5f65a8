//! NDPS HTTP transport adapter.
//!
//! Implements `ProcessorClient` over reqwest: posts the form-encoded
//! envelope to the configured endpoint and extracts the reply's `encData`.
//! Timeouts live here, on the HTTP client, never in the crypto core.

use async_trait::async_trait;
use std::time::Duration;

use crate::config::ProcessorConfig;
use crate::ports::{OutboundEnvelope, ProcessorClient, ProcessorEndpoint, ProcessorError};

use super::wire;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP client for the NDPS processor APIs.
pub struct NdpsHttpClient {
    auth_url: String,
    status_url: String,
    refund_url: String,
    http_client: reqwest::Client,
}

impl NdpsHttpClient {
    /// Builds a client with the configured endpoints and request timeout.
    pub fn new(config: &ProcessorConfig) -> Result<Self, ProcessorError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ProcessorError::Request(e.to_string()))?;

        Ok(Self {
            auth_url: config.auth_url.clone(),
            status_url: config.status_url.clone(),
            refund_url: config.refund_url.clone(),
            http_client,
        })
    }

    fn url_for(&self, endpoint: ProcessorEndpoint) -> &str {
        match endpoint {
            ProcessorEndpoint::Auth => &self.auth_url,
            ProcessorEndpoint::Status => &self.status_url,
            ProcessorEndpoint::Refund => &self.refund_url,
        }
    }
}

#[async_trait]
impl ProcessorClient for NdpsHttpClient {
    async fn exchange(
        &self,
        endpoint: ProcessorEndpoint,
        envelope: &OutboundEnvelope,
    ) -> Result<String, ProcessorError> {
        let url = self.url_for(endpoint);
        let body = wire::to_form_body(envelope)?;

        tracing::debug!(url, endpoint = ?endpoint, "posting envelope to processor");

        let response = self
            .http_client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProcessorError::Timeout
                } else {
                    ProcessorError::Request(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "processor returned an error status");
            return Err(ProcessorError::Status(status.as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ProcessorError::Request(e.to_string()))?;

        wire::extract_enc_data(&text)
    }
}
