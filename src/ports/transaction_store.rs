//! Transaction store port.
//!
//! The crypto core never holds transaction state; the surrounding
//! application owns it behind this interface. Keeping the store injected
//! means the handlers' tests never depend on global state and the
//! application can swap in a persistent implementation without touching
//! the envelope.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::MerchantTxnId;
use crate::domain::transaction::TransactionRecord;

/// Errors from transaction store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("transaction not found: {0}")]
    NotFound(String),

    /// The update closure refused the mutation (e.g. an invalid status
    /// transition); the stored record is left unchanged.
    #[error("update rejected: {0}")]
    UpdateRejected(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Mutation applied atomically to a stored record.
///
/// Returning an error aborts the update and leaves the stored record
/// untouched.
pub type UpdateFn =
    Box<dyn FnOnce(&mut TransactionRecord) -> Result<(), String> + Send>;

/// Port for persisting and updating merchant transactions.
///
/// Implementations must provide per-key atomicity for `update`: concurrent
/// updates to the same id may not interleave.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Look up a transaction by merchant transaction id.
    async fn get(&self, id: &MerchantTxnId)
        -> Result<Option<TransactionRecord>, StoreError>;

    /// Insert or replace a transaction record.
    async fn put(&self, record: TransactionRecord) -> Result<(), StoreError>;

    /// Atomically mutate an existing record and return the updated copy.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` when no record exists for the id
    /// - `StoreError::UpdateRejected` when the mutation itself refuses
    async fn update(
        &self,
        id: &MerchantTxnId,
        mutate: UpdateFn,
    ) -> Result<TransactionRecord, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn TransactionStore) {}
    }

    #[test]
    fn not_found_displays_the_missing_id() {
        let err = StoreError::NotFound("TXN_42".to_string());
        assert!(err.to_string().contains("TXN_42"));
    }

    #[test]
    fn update_rejected_carries_the_reason() {
        let err = StoreError::UpdateRejected("cannot transition".to_string());
        assert!(err.to_string().contains("cannot transition"));
    }
}
