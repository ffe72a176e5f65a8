//! Merchant-side transaction identifiers.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Merchant-generated transaction identifier.
///
/// The merchant owns this id: it keys the transaction store and is echoed
/// back by the processor in responses and callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerchantTxnId(String);

impl MerchantTxnId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a payment transaction id: `TXN_<epoch-millis>_<suffix>`.
    pub fn generate() -> Self {
        Self::with_prefix("TXN")
    }

    /// Generates a refund transaction id: `REFUND_<epoch-millis>_<suffix>`.
    pub fn generate_refund() -> Self {
        Self::with_prefix("REFUND")
    }

    fn with_prefix(prefix: &str) -> Self {
        let millis = Utc::now().timestamp_millis();
        let uuid = Uuid::new_v4().simple().to_string();
        Self(format!("{}_{}_{}", prefix, millis, &uuid[..9]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MerchantTxnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MerchantTxnId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
