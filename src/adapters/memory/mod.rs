//! In-memory adapter implementations.

mod in_memory_transaction_store;

pub use in_memory_transaction_store::InMemoryTransactionStore;
