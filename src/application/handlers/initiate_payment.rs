//! InitiatePaymentHandler - Command handler for starting a payment.

use std::sync::Arc;

use crate::application::error::GatewayError;
use crate::domain::envelope::CryptoEnvelope;
use crate::domain::foundation::{merch_txn_date_now, Amount, MerchantTxnId};
use crate::domain::payload::{
    status_code, AuthPayDetails, AuthRequestBody, AuthResponse, CustDetails, Document, FlexId,
    HeadDetails, MerchDetails, PayModeSpecificData, SubChannel, TXN_CURRENCY_INR,
};
use crate::domain::transaction::TransactionRecord;
use crate::ports::{OutboundEnvelope, ProcessorClient, ProcessorEndpoint, TransactionStore};

/// Default product code when the checkout does not name one.
const DEFAULT_PRODUCT: &str = "NSE";

/// Payment-method wildcard: no sub-channel restriction.
const ALL_METHODS: &str = "ALL";

/// Command to initiate a payment.
#[derive(Debug, Clone)]
pub struct InitiatePaymentCommand {
    pub amount: f64,
    pub email: String,
    pub mobile: String,
    pub product: Option<String>,
    /// Restricts checkout to one sub-channel (e.g. `UPI`); `None` or
    /// `"ALL"` leaves every payment mode open.
    pub payment_method: Option<String>,
}

/// Result of a successful initiation.
#[derive(Debug, Clone)]
pub struct InitiatePaymentResult {
    pub merch_txn_id: MerchantTxnId,
    /// Checkout token the client-side SDK needs to open the payment page.
    pub atom_token_id: FlexId,
    pub amount: Amount,
}

/// Handler for payment initiation.
///
/// Records the transaction as INITIATED, sends the encrypted AUTH request
/// and returns the processor's checkout token.
pub struct InitiatePaymentHandler {
    envelope: Arc<CryptoEnvelope>,
    store: Arc<dyn TransactionStore>,
    client: Arc<dyn ProcessorClient>,
}

impl InitiatePaymentHandler {
    pub fn new(
        envelope: Arc<CryptoEnvelope>,
        store: Arc<dyn TransactionStore>,
        client: Arc<dyn ProcessorClient>,
    ) -> Self {
        Self {
            envelope,
            store,
            client,
        }
    }

    pub async fn handle(
        &self,
        cmd: InitiatePaymentCommand,
    ) -> Result<InitiatePaymentResult, GatewayError> {
        if cmd.email.is_empty() {
            return Err(GatewayError::Validation("email is required"));
        }
        if cmd.mobile.is_empty() {
            return Err(GatewayError::Validation("mobile is required"));
        }
        if !cmd.amount.is_finite() || cmd.amount <= 0.0 {
            return Err(GatewayError::Validation("amount must be positive"));
        }

        let merch_txn_id = MerchantTxnId::generate();
        let merch_txn_date = merch_txn_date_now();
        let amount = Amount::new(cmd.amount);
        let product = cmd
            .product
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_PRODUCT.to_string());

        tracing::info!(
            merch_txn_id = %merch_txn_id,
            amount = %amount,
            product = %product,
            "initiating payment"
        );

        // Record first: a processor failure after this point leaves an
        // INITIATED transaction the status enquiry can reconcile later.
        self.store
            .put(TransactionRecord::initiated(
                merch_txn_id.clone(),
                merch_txn_date.clone(),
                amount,
                product.clone(),
                cmd.email.clone(),
                cmd.mobile.clone(),
            ))
            .await?;

        let pay_mode_specific_data = cmd
            .payment_method
            .filter(|method| !method.is_empty() && method != ALL_METHODS)
            .map(|method| PayModeSpecificData {
                sub_channel: SubChannel::One(method),
            });

        let body = AuthRequestBody {
            head_details: HeadDetails::auth(),
            merch_details: MerchDetails {
                merch_id: FlexId::from(self.envelope.merch_id()),
                password: Some(self.envelope.password().to_string()),
                merch_txn_id: merch_txn_id.to_string(),
                merch_txn_date: Some(merch_txn_date),
            },
            pay_details: AuthPayDetails {
                amount,
                product,
                txn_currency: TXN_CURRENCY_INR.to_string(),
            },
            cust_details: CustDetails {
                cust_email: cmd.email,
                cust_mobile: cmd.mobile,
            },
            pay_mode_specific_data,
        };

        let enc_data = self.envelope.encrypt(&Document::new(body))?;
        let outbound = OutboundEnvelope {
            enc_data,
            merch_id: self.envelope.merch_id().to_string(),
        };

        let reply_hex = self
            .client
            .exchange(ProcessorEndpoint::Auth, &outbound)
            .await?;
        let response: AuthResponse = self.envelope.decrypt(&reply_hex)?;

        let details = response
            .response_details
            .ok_or_else(|| GatewayError::Declined {
                status_code: "MALFORMED".to_string(),
                message: "response carried no outcome details".to_string(),
            })?;

        if !status_code::is_payment_success(&details.txn_status_code) {
            tracing::warn!(
                merch_txn_id = %merch_txn_id,
                status_code = %details.txn_status_code,
                "payment initiation declined"
            );
            return Err(GatewayError::Declined {
                status_code: details.txn_status_code,
                message: details
                    .txn_description
                    .or(details.txn_message)
                    .unwrap_or_else(|| "payment initiation failed".to_string()),
            });
        }

        let atom_token_id = response
            .atom_token_id
            .ok_or_else(|| GatewayError::Declined {
                status_code: details.txn_status_code.clone(),
                message: "success response carried no checkout token".to_string(),
            })?;

        tracing::info!(
            merch_txn_id = %merch_txn_id,
            atom_token_id = %atom_token_id,
            "payment initiated"
        );

        Ok(InitiatePaymentResult {
            merch_txn_id,
            atom_token_id,
            amount,
        })
    }
}
