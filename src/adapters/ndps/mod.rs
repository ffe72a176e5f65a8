//! NDPS processor transport adapters.
//!
//! - `wire` - form-encoded envelope codec
//! - `http_client` - reqwest-backed `ProcessorClient`
//! - `mock_client` - scripted client for tests and development

mod http_client;
mod mock_client;
pub mod wire;

pub use http_client::NdpsHttpClient;
pub use mock_client::MockProcessorClient;
