//! Transaction date rendering.

use chrono::{DateTime, Utc};

/// Renders a timestamp the way the processor expects `merchTxnDate`:
/// `YYYY-MM-DD HH:MM:SS`, UTC, no timezone suffix.
pub fn merch_txn_date(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// `merch_txn_date` for the current instant.
pub fn merch_txn_date_now() -> String {
    merch_txn_date(Utc::now())
}
