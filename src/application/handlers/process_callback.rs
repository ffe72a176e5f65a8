//! ProcessCallbackHandler - Command handler for inbound payment callbacks.
//!
//! Drives the RECEIVED -> DECRYPTED -> SIGNATURE_CHECKED ->
//! {ACCEPTED | REJECTED} pipeline. A rejected callback never touches the
//! transaction store and is never treated as authoritative, regardless of
//! the status code it claims.

use std::sync::Arc;

use crate::application::error::GatewayError;
use crate::domain::envelope::CryptoEnvelope;
use crate::domain::foundation::{MerchantTxnId, StateMachine};
use crate::domain::payload::{CallbackBody, Document, FlexId};
use crate::domain::transaction::{
    CallbackStage, RejectionReason, TransactionRecord, TransactionStatus,
};
use crate::ports::{StoreError, TransactionStore};

/// Command carrying the raw callback envelope.
#[derive(Debug, Clone)]
pub struct ProcessCallbackCommand {
    /// URL-decoded `encData` field of the callback body.
    pub enc_data: String,
}

/// Outcome of callback processing.
#[derive(Debug, Clone)]
pub enum ProcessCallbackResult {
    /// Signature verified; the reported outcome is authoritative.
    Accepted {
        merch_txn_id: String,
        atom_txn_id: FlexId,
        status: TransactionStatus,
    },
    /// The callback could not be authenticated and was discarded.
    Rejected {
        stage: CallbackStage,
        reason: RejectionReason,
    },
}

/// Handler for processor callbacks.
pub struct ProcessCallbackHandler {
    envelope: Arc<CryptoEnvelope>,
    store: Arc<dyn TransactionStore>,
}

impl ProcessCallbackHandler {
    pub fn new(envelope: Arc<CryptoEnvelope>, store: Arc<dyn TransactionStore>) -> Self {
        Self { envelope, store }
    }

    pub async fn handle(
        &self,
        cmd: ProcessCallbackCommand,
    ) -> Result<ProcessCallbackResult, GatewayError> {
        let stage = CallbackStage::Received;

        // 1. Decrypt. Failures short-circuit to the terminal rejected
        // state without ever reaching the signature check.
        let document: Document<CallbackBody> = match self.envelope.decrypt(&cmd.enc_data) {
            Ok(document) => document,
            Err(error) => {
                let stage = stage.transition_to(CallbackStage::Rejected)?;
                tracing::warn!(%error, "callback rejected: decryption failed");
                return Ok(ProcessCallbackResult::Rejected {
                    stage,
                    reason: RejectionReason::DecryptionFailed,
                });
            }
        };
        let stage = stage.transition_to(CallbackStage::Decrypted)?;
        let callback = document.pay_instrument;

        // 2. Verify the signature before trusting a single field.
        let check = self.envelope.verify_callback(&callback);
        let stage = stage.transition_to(CallbackStage::SignatureChecked)?;

        if !check.is_valid {
            let stage = stage.transition_to(CallbackStage::Rejected)?;
            tracing::warn!(
                merch_txn_id = %callback.merch_details.merch_txn_id,
                "callback rejected: signature mismatch"
            );
            tracing::debug!(
                calculated = %check.calculated,
                received = %check.received,
                "callback signature digests"
            );
            return Ok(ProcessCallbackResult::Rejected {
                stage,
                reason: RejectionReason::SignatureMismatch,
            });
        }

        let stage = stage.transition_to(CallbackStage::Accepted)?;
        debug_assert!(stage.is_terminal());

        let merch_txn_id = MerchantTxnId::new(callback.merch_details.merch_txn_id.clone());
        let atom_txn_id = callback.pay_details.atom_txn_id.clone();
        let status = TransactionRecord::status_for_code(&callback.response_details.status_code);

        tracing::info!(
            merch_txn_id = %merch_txn_id,
            atom_txn_id = %atom_txn_id,
            status = ?status,
            status_code = %callback.response_details.status_code,
            "callback accepted"
        );

        // 3. Apply to the stored transaction. A callback for an id this
        // process never initiated is still authenticated and acknowledged;
        // there is just nothing to update.
        let update = self
            .store
            .update(
                &merch_txn_id,
                Box::new(move |record| {
                    record
                        .apply_callback(callback)
                        .map_err(|e| e.to_string())
                }),
            )
            .await;

        match update {
            Ok(_) => {}
            Err(StoreError::NotFound(id)) => {
                tracing::warn!(merch_txn_id = %id, "callback for unknown transaction");
            }
            Err(StoreError::UpdateRejected(reason)) => {
                // Authenticated but conflicting with the recorded outcome
                // (e.g. FAILED after SUCCESS); keep the stored record.
                tracing::warn!(
                    merch_txn_id = %merch_txn_id,
                    %reason,
                    "callback conflicts with recorded outcome; store unchanged"
                );
            }
            Err(e) => return Err(e.into()),
        }

        Ok(ProcessCallbackResult::Accepted {
            merch_txn_id: merch_txn_id.to_string(),
            atom_txn_id,
            status,
        })
    }
}
