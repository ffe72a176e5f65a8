//! Command handlers for the gateway operations.
//!
//! - `initiate_payment` - start a payment and obtain the checkout token
//! - `query_status` - signed transaction status enquiry
//! - `initiate_refund` - signed refund initiation
//! - `process_callback` - decrypt, authenticate and apply callbacks

mod initiate_payment;
mod initiate_refund;
mod process_callback;
mod query_status;

pub use initiate_payment::{
    InitiatePaymentCommand, InitiatePaymentHandler, InitiatePaymentResult,
};
pub use initiate_refund::{
    InitiateRefundCommand, InitiateRefundHandler, InitiateRefundResult,
};
pub use process_callback::{
    ProcessCallbackCommand, ProcessCallbackHandler, ProcessCallbackResult,
};
pub use query_status::{
    QueryTransactionStatusCommand, QueryTransactionStatusHandler,
    QueryTransactionStatusResult, StatusTransactionSummary,
};
