//! QueryTransactionStatusHandler - Command handler for status enquiries.

use std::sync::Arc;

use crate::application::error::GatewayError;
use crate::domain::envelope::CryptoEnvelope;
use crate::domain::foundation::Amount;
use crate::domain::payload::{
    status_code, Document, FlexId, HeadDetails, MerchDetails, StatusPayDetails, StatusQueryBody,
    StatusResponse, StatusTransaction, API_STATUS, TXN_CURRENCY_INR,
};
use crate::ports::{OutboundEnvelope, ProcessorClient, ProcessorEndpoint, ProcessorError};

/// Command to query a transaction's status at the processor.
#[derive(Debug, Clone)]
pub struct QueryTransactionStatusCommand {
    pub merch_txn_id: String,
    pub merch_txn_date: String,
    pub amount: f64,
}

/// Condensed view of the transaction the processor reported.
#[derive(Debug, Clone)]
pub struct StatusTransactionSummary {
    pub merch_id: Option<FlexId>,
    pub merch_txn_id: Option<String>,
    pub atom_txn_id: Option<FlexId>,
    pub amount: Option<Amount>,
    pub total_amount: Option<Amount>,
}

/// Result of a status enquiry.
#[derive(Debug, Clone)]
pub enum QueryTransactionStatusResult {
    /// The processor knows the transaction.
    Found {
        success: bool,
        status_code: String,
        message: String,
        description: String,
        transaction: StatusTransactionSummary,
    },
    /// The processor has no record of the transaction.
    NotFound,
}

/// Handler for signed `TXNVERIFICATION` enquiries.
pub struct QueryTransactionStatusHandler {
    envelope: Arc<CryptoEnvelope>,
    client: Arc<dyn ProcessorClient>,
}

impl QueryTransactionStatusHandler {
    pub fn new(envelope: Arc<CryptoEnvelope>, client: Arc<dyn ProcessorClient>) -> Self {
        Self { envelope, client }
    }

    pub async fn handle(
        &self,
        cmd: QueryTransactionStatusCommand,
    ) -> Result<QueryTransactionStatusResult, GatewayError> {
        if cmd.merch_txn_id.is_empty() {
            return Err(GatewayError::Validation("merch_txn_id is required"));
        }
        if cmd.merch_txn_date.is_empty() {
            return Err(GatewayError::Validation("merch_txn_date is required"));
        }
        if !cmd.amount.is_finite() || cmd.amount <= 0.0 {
            return Err(GatewayError::Validation("amount must be positive"));
        }

        let amount = Amount::new(cmd.amount);
        let signature =
            self.envelope
                .sign_request(&cmd.merch_txn_id, amount, TXN_CURRENCY_INR, API_STATUS);

        let body = StatusQueryBody {
            head_details: HeadDetails::ots(API_STATUS),
            merch_details: MerchDetails {
                merch_id: FlexId::numeric(self.envelope.merch_id()),
                password: Some(self.envelope.password().to_string()),
                merch_txn_id: cmd.merch_txn_id.clone(),
                merch_txn_date: Some(cmd.merch_txn_date),
            },
            pay_details: StatusPayDetails {
                amount,
                txn_currency: TXN_CURRENCY_INR.to_string(),
                signature,
            },
        };

        let enc_data = self.envelope.encrypt(&Document::new(body))?;
        let outbound = OutboundEnvelope {
            enc_data,
            merch_id: self.envelope.merch_id().to_string(),
        };

        tracing::info!(merch_txn_id = %cmd.merch_txn_id, "querying transaction status");

        let reply_hex = match self
            .client
            .exchange(ProcessorEndpoint::Status, &outbound)
            .await
        {
            Ok(hex) => hex,
            // The processor answers enquiries for unknown transactions with
            // an empty body rather than an error document.
            Err(ProcessorError::EmptyBody) => {
                tracing::info!(merch_txn_id = %cmd.merch_txn_id, "no status data for transaction");
                return Ok(QueryTransactionStatusResult::NotFound);
            }
            Err(e) => return Err(e.into()),
        };

        let response: StatusResponse = self.envelope.decrypt(&reply_hex)?;
        let transactions = response.pay_instrument.unwrap_or_default();

        let Some(transaction) = transactions.into_iter().next() else {
            return Ok(QueryTransactionStatusResult::NotFound);
        };

        Ok(Self::summarize(transaction))
    }

    fn summarize(transaction: StatusTransaction) -> QueryTransactionStatusResult {
        let Some(details) = transaction.response_details else {
            // A listed transaction without outcome details is unusable;
            // report it the same way as an unknown transaction.
            return QueryTransactionStatusResult::NotFound;
        };

        let summary = StatusTransactionSummary {
            merch_id: transaction
                .merch_details
                .as_ref()
                .and_then(|m| m.merch_id.clone()),
            merch_txn_id: transaction
                .merch_details
                .as_ref()
                .and_then(|m| m.merch_txn_id.clone()),
            atom_txn_id: transaction
                .pay_details
                .as_ref()
                .and_then(|p| p.atom_txn_id.clone()),
            amount: transaction.pay_details.as_ref().and_then(|p| p.amount),
            total_amount: transaction
                .pay_details
                .as_ref()
                .and_then(|p| p.total_amount),
        };

        QueryTransactionStatusResult::Found {
            success: status_code::is_status_success(&details.status_code),
            status_code: details.status_code,
            message: details.message.unwrap_or_else(|| "Status retrieved".to_string()),
            description: details.description.unwrap_or_default(),
            transaction: summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockProcessorClient;
    use crate::domain::envelope::test_support;

    fn handler(client: Arc<MockProcessorClient>) -> QueryTransactionStatusHandler {
        QueryTransactionStatusHandler::new(test_support::SYMMETRIC_ENVELOPE.clone(), client)
    }

    fn command() -> QueryTransactionStatusCommand {
        QueryTransactionStatusCommand {
            merch_txn_id: "TXN_1738216820431_ab12cd34e".to_string(),
            merch_txn_date: "2026-01-30 09:05:07".to_string(),
            amount: 500.0,
        }
    }

    fn found_reply() -> String {
        test_support::SYMMETRIC_ENVELOPE
            .encrypt(&serde_json::json!({
                "payInstrument": [{
                    "merchDetails": {
                        "merchId": 446442,
                        "merchTxnId": "TXN_1738216820431_ab12cd34e"
                    },
                    "payDetails": { "atomTxnId": 9001, "amount": 500.0, "totalAmount": 510.0 },
                    "responseDetails": {
                        "statusCode": "OTS0002",
                        "message": "Transaction confirmed",
                        "description": "Settled"
                    }
                }]
            }))
            .unwrap()
    }

    #[tokio::test]
    async fn found_transaction_is_summarized() {
        let client = Arc::new(MockProcessorClient::new());
        client.enqueue(ProcessorEndpoint::Status, Ok(found_reply()));

        let result = handler(client).handle(command()).await.unwrap();

        match result {
            QueryTransactionStatusResult::Found {
                success,
                status_code,
                transaction,
                ..
            } => {
                assert!(success);
                assert_eq!(status_code, "OTS0002");
                assert_eq!(transaction.atom_txn_id, Some(FlexId::Num(9001)));
                assert_eq!(transaction.total_amount, Some(Amount::new(510.0)));
            }
            other => panic!("expected Found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_processor_body_means_not_found() {
        let client = Arc::new(MockProcessorClient::new());
        client.enqueue(ProcessorEndpoint::Status, Err(ProcessorError::EmptyBody));

        let result = handler(client).handle(command()).await.unwrap();
        assert!(matches!(result, QueryTransactionStatusResult::NotFound));
    }

    #[tokio::test]
    async fn empty_transaction_list_means_not_found() {
        let client = Arc::new(MockProcessorClient::new());
        let reply = test_support::SYMMETRIC_ENVELOPE
            .encrypt(&serde_json::json!({ "payInstrument": [] }))
            .unwrap();
        client.enqueue(ProcessorEndpoint::Status, Ok(reply));

        let result = handler(client).handle(command()).await.unwrap();
        assert!(matches!(result, QueryTransactionStatusResult::NotFound));
    }

    #[tokio::test]
    async fn listed_transaction_without_outcome_is_not_found() {
        let client = Arc::new(MockProcessorClient::new());
        let reply = test_support::SYMMETRIC_ENVELOPE
            .encrypt(&serde_json::json!({
                "payInstrument": [{
                    "merchDetails": { "merchId": 446442 }
                }]
            }))
            .unwrap();
        client.enqueue(ProcessorEndpoint::Status, Ok(reply));

        let result = handler(client).handle(command()).await.unwrap();
        assert!(matches!(result, QueryTransactionStatusResult::NotFound));
    }

    #[tokio::test]
    async fn enquiry_is_signed_with_the_operation_name() {
        let client = Arc::new(MockProcessorClient::new());
        client.enqueue(ProcessorEndpoint::Status, Ok(found_reply()));

        let h = handler(client.clone());
        h.handle(command()).await.unwrap();

        let sent = &client.requests()[0].1.enc_data;
        let value: serde_json::Value = test_support::SYMMETRIC_ENVELOPE.decrypt(sent).unwrap();
        let instrument = &value["payInstrument"];

        assert_eq!(instrument["headDetails"]["api"], "TXNVERIFICATION");
        assert_eq!(instrument["headDetails"]["source"], "OTS");
        // Back-office operations send the merchant id as a number.
        assert_eq!(instrument["merchDetails"]["merchId"], 446442);

        let expected = test_support::SYMMETRIC_ENVELOPE.sign_request(
            "TXN_1738216820431_ab12cd34e",
            Amount::new(500.0),
            "INR",
            "TXNVERIFICATION",
        );
        assert_eq!(instrument["payDetails"]["signature"], expected.as_str());
    }

    #[tokio::test]
    async fn transport_failures_propagate() {
        let client = Arc::new(MockProcessorClient::new());
        client.enqueue(ProcessorEndpoint::Status, Err(ProcessorError::Timeout));

        let result = handler(client).handle(command()).await;
        assert!(matches!(
            result,
            Err(GatewayError::Processor(ProcessorError::Timeout))
        ));
    }

    #[tokio::test]
    async fn blank_inputs_fail_validation() {
        let client = Arc::new(MockProcessorClient::new());
        let h = handler(client);

        let mut cmd = command();
        cmd.merch_txn_id = String::new();
        assert!(matches!(
            h.handle(cmd).await,
            Err(GatewayError::Validation(_))
        ));

        let mut cmd = command();
        cmd.amount = -5.0;
        assert!(matches!(
            h.handle(cmd).await,
            Err(GatewayError::Validation(_))
        ));
    }
}
