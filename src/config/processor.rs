//! Processor endpoint configuration.

use serde::Deserialize;

use super::error::ValidationError;

fn default_timeout_secs() -> u64 {
    30
}

/// Endpoints and transport policy for the NDPS processor APIs.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessorConfig {
    /// Payment initiation (AUTH) endpoint.
    pub auth_url: String,

    /// Transaction status enquiry endpoint.
    pub status_url: String,

    /// Refund initiation endpoint.
    pub refund_url: String,

    /// Per-request timeout for processor calls.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl ProcessorConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let urls: [(&str, &'static str); 3] = [
            (&self.auth_url, "PROCESSOR_AUTH_URL"),
            (&self.status_url, "PROCESSOR_STATUS_URL"),
            (&self.refund_url, "PROCESSOR_REFUND_URL"),
        ];
        for (url, name) in urls {
            if url.is_empty() {
                return Err(ValidationError::MissingRequired(name));
            }
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidUrl(name));
            }
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}
