//! Processor status codes.
//!
//! The processor reports outcomes as opaque alphanumeric codes with a fixed
//! `OTS` prefix. The enumeration belongs to the processor, not to this
//! crate; only the codes observed in practice are named here, and unknown
//! codes must always be representable.

/// Transaction processed successfully (AUTH, callback, status enquiry).
pub const SUCCESS: &str = "OTS0000";

/// Refund request accepted for processing.
pub const REFUND_ACCEPTED: &str = "OTS0001";

/// Status enquiry: transaction found and confirmed.
pub const STATUS_CONFIRMED: &str = "OTS0002";

/// Status enquiry: no transaction matched the query.
pub const NOT_FOUND: &str = "OTS0401";

/// Whether a callback status code reports a successful payment.
pub fn is_payment_success(code: &str) -> bool {
    code == SUCCESS
}

/// Whether a status-enquiry code counts as a successful lookup.
pub fn is_status_success(code: &str) -> bool {
    code == SUCCESS || code == STATUS_CONFIRMED
}

/// Whether a refund-initiation code counts as accepted.
pub fn is_refund_success(code: &str) -> bool {
    code == SUCCESS || code == REFUND_ACCEPTED
}
