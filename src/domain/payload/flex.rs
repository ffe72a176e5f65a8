//! Tolerant identifier type for processor JSON.
//!
//! The processor is inconsistent about whether identifier fields travel as
//! JSON strings or numbers (`merchId` is a string in AUTH documents but a
//! number in callbacks; `atomTxnId` and `bankTxnId` vary by channel).
//! Signature construction stringifies whatever arrived, so the raw shape
//! must be preserved through deserialization.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An identifier that may travel as a JSON string or a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlexId {
    Num(i64),
    Str(String),
}

impl FlexId {
    /// Parses the input as a number where possible, mirroring integrations
    /// that send numeric identifiers for certain operations.
    pub fn numeric(value: &str) -> Self {
        match value.parse::<i64>() {
            Ok(n) => FlexId::Num(n),
            Err(_) => FlexId::Str(value.to_string()),
        }
    }

    /// The stringified form used in signature concatenation.
    pub fn as_wire_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FlexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlexId::Num(n) => write!(f, "{}", n),
            FlexId::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FlexId {
    fn from(value: &str) -> Self {
        FlexId::Str(value.to_string())
    }
}

impl From<String> for FlexId {
    fn from(value: String) -> Self {
        FlexId::Str(value)
    }
}

impl From<i64> for FlexId {
    fn from(value: i64) -> Self {
        FlexId::Num(value)
    }
}
