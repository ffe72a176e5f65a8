//! Monetary amount with protocol wire formatting.
//!
//! The processor validates signatures over amounts formatted with exactly
//! two decimal digits. Any other rendering (more, fewer or no decimals,
//! scientific notation) produces a signature the processor silently rejects
//! without a specific diagnostic, so the formatting lives in one tested
//! place and is never done ad hoc at call sites.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A transaction amount in the processor's currency units.
///
/// Wraps an `f64` because that is what travels in the processor's JSON
/// documents; all signature-relevant rendering goes through [`Amount::to_wire`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Renders the amount with exactly two decimal digits, e.g. `100` ->
    /// `"100.00"`, `100.456` -> `"100.46"`.
    ///
    /// This is the only rendering the processor accepts inside signature
    /// strings. Rounds to nearest over the IEEE-754 value, matching the
    /// observed behavior of the processor's reference integrations.
    pub fn to_wire(&self) -> String {
        format!("{:.2}", self.0)
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

/// Amounts arrive as JSON numbers from our own payloads but occasionally as
/// numeric strings in processor documents; accept both.
impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AmountVisitor;

        impl Visitor<'_> for AmountVisitor {
            type Value = Amount;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a number or a numeric string")
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
                Ok(Amount(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
                Ok(Amount(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
                Ok(Amount(v as f64))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
                v.parse::<f64>()
                    .map(Amount)
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}
