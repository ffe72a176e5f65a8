//! The merchant-side transaction record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Amount, InvalidTransition, MerchantTxnId, StateMachine};
use crate::domain::payload::{status_code, CallbackBody, FlexId};

use super::status::TransactionStatus;

/// One merchant transaction, keyed by merchant transaction id.
///
/// Created at initiation, updated by authenticated callbacks, never deleted
/// in this scope. Owned exclusively by the transaction store; the crypto
/// core holds no transaction state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub merch_txn_id: MerchantTxnId,
    pub merch_txn_date: String,
    pub amount: Amount,
    pub product: String,
    pub cust_email: String,
    pub cust_mobile: String,
    pub status: TransactionStatus,
    /// Processor-assigned transaction id, known once a callback arrives.
    pub atom_txn_id: Option<FlexId>,
    /// The last authenticated callback applied to this record.
    pub callback: Option<CallbackBody>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TransactionRecord {
    /// A fresh record at initiation time.
    pub fn initiated(
        merch_txn_id: MerchantTxnId,
        merch_txn_date: String,
        amount: Amount,
        product: String,
        cust_email: String,
        cust_mobile: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            merch_txn_id,
            merch_txn_date,
            amount,
            product,
            cust_email,
            cust_mobile,
            status: TransactionStatus::Initiated,
            atom_txn_id: None,
            callback: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// The status a callback with the given processor code maps to.
    pub fn status_for_code(code: &str) -> TransactionStatus {
        if status_code::is_payment_success(code) {
            TransactionStatus::Success
        } else {
            TransactionStatus::Failed
        }
    }

    /// Applies an authenticated callback: transitions the status, records
    /// the processor transaction id and retains the payload.
    ///
    /// Only ever call this with a callback whose signature has been
    /// verified; the record trusts its input.
    pub fn apply_callback(&mut self, callback: CallbackBody) -> Result<(), InvalidTransition> {
        let target = Self::status_for_code(&callback.response_details.status_code);
        self.status = self.status.transition_to(target)?;
        self.atom_txn_id = Some(callback.pay_details.atom_txn_id.clone());
        self.callback = Some(callback);
        self.updated_at = Utc::now();
        Ok(())
    }
}
