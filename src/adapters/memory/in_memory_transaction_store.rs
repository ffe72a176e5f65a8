//! In-Memory Transaction Store Adapter
//!
//! Keeps transaction records in a process-local map. Useful for testing
//! and development; production deployments are expected to plug a durable
//! implementation into the same port.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::MerchantTxnId;
use crate::domain::transaction::TransactionRecord;
use crate::ports::{StoreError, TransactionStore, UpdateFn};

/// In-memory storage for transaction records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransactionStore {
    records: Arc<RwLock<HashMap<MerchantTxnId, TransactionRecord>>>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored data (useful for tests).
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }

    /// Number of stored transactions.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn get(
        &self,
        id: &MerchantTxnId,
    ) -> Result<Option<TransactionRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.get(id).cloned())
    }

    async fn put(&self, record: TransactionRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        records.insert(record.merch_txn_id.clone(), record);
        Ok(())
    }

    async fn update(
        &self,
        id: &MerchantTxnId,
        mutate: UpdateFn,
    ) -> Result<TransactionRecord, StoreError> {
        // The write guard spans read-mutate-commit, so concurrent updates
        // to the same id serialize.
        let mut records = self.records.write().await;
        let stored = records
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        // Mutate a copy and commit only on success, leaving the stored
        // record untouched when the closure rejects.
        let mut updated = stored.clone();
        mutate(&mut updated).map_err(StoreError::UpdateRejected)?;
        records.insert(id.clone(), updated.clone());
        Ok(updated)
    }
}
