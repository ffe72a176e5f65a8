//! Application layer - Commands and Handlers.
//!
//! Orchestrates the crypto envelope, the processor transport and the
//! transaction store. Each operation is a command/handler pair; handlers
//! own no state beyond their injected ports.

mod error;
pub mod handlers;

pub use error::GatewayError;
pub use handlers::{
    InitiatePaymentCommand, InitiatePaymentHandler, InitiatePaymentResult,
    InitiateRefundCommand, InitiateRefundHandler, InitiateRefundResult,
    ProcessCallbackCommand, ProcessCallbackHandler, ProcessCallbackResult,
    QueryTransactionStatusCommand, QueryTransactionStatusHandler,
    QueryTransactionStatusResult, StatusTransactionSummary,
};
