//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `TransactionStore` - transaction bookkeeping owned by the application
//! - `ProcessorClient` - transport of encrypted envelopes to the processor

mod processor_client;
mod transaction_store;

pub use processor_client::{
    OutboundEnvelope, ProcessorClient, ProcessorEndpoint, ProcessorError,
};
pub use transaction_store::{StoreError, TransactionStore, UpdateFn};
