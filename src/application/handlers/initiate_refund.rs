//! InitiateRefundHandler - Command handler for refund initiation.

use std::sync::Arc;

use crate::application::error::GatewayError;
use crate::domain::envelope::CryptoEnvelope;
use crate::domain::foundation::{Amount, MerchantTxnId};
use crate::domain::payload::{
    status_code, Document, FlexId, HeadDetails, MerchDetails, ProdDetail, RefundPayDetails,
    RefundRequestBody, RefundResponse, API_REFUND, TXN_CURRENCY_INR,
};
use crate::ports::{OutboundEnvelope, ProcessorClient, ProcessorEndpoint};

/// Command to initiate a refund against a settled transaction.
#[derive(Debug, Clone)]
pub struct InitiateRefundCommand {
    /// Processor-assigned id of the original transaction.
    pub atom_txn_id: String,
    /// Product line being refunded.
    pub prod_name: String,
    pub prod_refund_amount: f64,
    pub total_refund_amount: f64,
    /// Merchant id for the refund transaction; generated when absent.
    pub merch_txn_id: Option<String>,
}

/// Result of a refund initiation.
#[derive(Debug, Clone)]
pub struct InitiateRefundResult {
    pub accepted: bool,
    pub status_code: String,
    pub message: Option<String>,
    pub description: Option<String>,
    pub refund_txn_id: String,
    pub atom_txn_id: Option<FlexId>,
    pub total_refund_amount: Option<Amount>,
    pub prod_details: Vec<ProdDetail>,
}

/// Handler for signed `REFUNDINIT` requests.
pub struct InitiateRefundHandler {
    envelope: Arc<CryptoEnvelope>,
    client: Arc<dyn ProcessorClient>,
}

impl InitiateRefundHandler {
    pub fn new(envelope: Arc<CryptoEnvelope>, client: Arc<dyn ProcessorClient>) -> Self {
        Self { envelope, client }
    }

    pub async fn handle(
        &self,
        cmd: InitiateRefundCommand,
    ) -> Result<InitiateRefundResult, GatewayError> {
        if cmd.atom_txn_id.is_empty() {
            return Err(GatewayError::Validation("atom_txn_id is required"));
        }
        if cmd.prod_name.is_empty() {
            return Err(GatewayError::Validation("prod_name is required"));
        }
        if !cmd.total_refund_amount.is_finite() || cmd.total_refund_amount <= 0.0 {
            return Err(GatewayError::Validation(
                "total_refund_amount must be positive",
            ));
        }
        if !cmd.prod_refund_amount.is_finite() || cmd.prod_refund_amount <= 0.0 {
            return Err(GatewayError::Validation(
                "prod_refund_amount must be positive",
            ));
        }

        let refund_txn_id = cmd
            .merch_txn_id
            .filter(|id| !id.is_empty())
            .map(MerchantTxnId::new)
            .unwrap_or_else(MerchantTxnId::generate_refund);
        let total_refund_amount = Amount::new(cmd.total_refund_amount);

        let signature = self.envelope.sign_request(
            refund_txn_id.as_str(),
            total_refund_amount,
            TXN_CURRENCY_INR,
            API_REFUND,
        );

        tracing::info!(
            refund_txn_id = %refund_txn_id,
            atom_txn_id = %cmd.atom_txn_id,
            total_refund_amount = %total_refund_amount,
            "initiating refund"
        );

        let body = RefundRequestBody {
            head_details: HeadDetails::ots(API_REFUND),
            merch_details: MerchDetails {
                merch_id: FlexId::numeric(self.envelope.merch_id()),
                password: Some(self.envelope.password().to_string()),
                merch_txn_id: refund_txn_id.to_string(),
                merch_txn_date: None,
            },
            pay_details: RefundPayDetails {
                signature,
                atom_txn_id: FlexId::numeric(&cmd.atom_txn_id),
                total_refund_amount,
                txn_currency: TXN_CURRENCY_INR.to_string(),
                prod_details: vec![ProdDetail {
                    prod_name: cmd.prod_name,
                    prod_refund_amount: Amount::new(cmd.prod_refund_amount),
                    prod_refund_id: MerchantTxnId::generate_refund().to_string(),
                }],
            },
        };

        let enc_data = self.envelope.encrypt(&Document::new(body))?;
        let outbound = OutboundEnvelope {
            enc_data,
            merch_id: self.envelope.merch_id().to_string(),
        };

        let reply_hex = self
            .client
            .exchange(ProcessorEndpoint::Refund, &outbound)
            .await?;
        let response: RefundResponse = self.envelope.decrypt(&reply_hex)?;

        let body = response
            .pay_instrument
            .ok_or_else(|| GatewayError::Declined {
                status_code: "NO_DATA".to_string(),
                message: "refund response carried no data".to_string(),
            })?;
        let details = body.response_details.ok_or_else(|| GatewayError::Declined {
            status_code: "MALFORMED".to_string(),
            message: "refund response carried no outcome details".to_string(),
        })?;

        let accepted = status_code::is_refund_success(&details.status_code);
        if !accepted {
            tracing::warn!(
                refund_txn_id = %refund_txn_id,
                status_code = %details.status_code,
                "refund initiation declined"
            );
        }

        let pay_details = body.pay_details;

        Ok(InitiateRefundResult {
            accepted,
            status_code: details.status_code,
            message: details.message,
            description: details.description,
            refund_txn_id: refund_txn_id.to_string(),
            atom_txn_id: pay_details.as_ref().and_then(|p| p.atom_txn_id.clone()),
            total_refund_amount: pay_details.as_ref().and_then(|p| p.total_refund_amount),
            prod_details: pay_details
                .and_then(|p| p.prod_details)
                .unwrap_or_default(),
        })
    }
}
