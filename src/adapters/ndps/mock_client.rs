//! Mock processor client.
//!
//! Replays canned `encData` replies per endpoint and records every
//! envelope it is handed. Useful for testing and development without a
//! processor UAT account.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::ports::{OutboundEnvelope, ProcessorClient, ProcessorEndpoint, ProcessorError};

/// Scripted processor client for tests.
#[derive(Default)]
pub struct MockProcessorClient {
    replies: Mutex<HashMap<ProcessorEndpoint, VecDeque<Result<String, ProcessorError>>>>,
    requests: Mutex<Vec<(ProcessorEndpoint, OutboundEnvelope)>>,
}

impl MockProcessorClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the next reply for an endpoint.
    pub fn enqueue(
        &self,
        endpoint: ProcessorEndpoint,
        reply: Result<String, ProcessorError>,
    ) {
        self.replies
            .lock()
            .expect("mock replies lock poisoned")
            .entry(endpoint)
            .or_default()
            .push_back(reply);
    }

    /// Every envelope exchanged so far, in order.
    pub fn requests(&self) -> Vec<(ProcessorEndpoint, OutboundEnvelope)> {
        self.requests
            .lock()
            .expect("mock requests lock poisoned")
            .clone()
    }
}

#[async_trait]
impl ProcessorClient for MockProcessorClient {
    async fn exchange(
        &self,
        endpoint: ProcessorEndpoint,
        envelope: &OutboundEnvelope,
    ) -> Result<String, ProcessorError> {
        self.requests
            .lock()
            .expect("mock requests lock poisoned")
            .push((endpoint, envelope.clone()));

        self.replies
            .lock()
            .expect("mock replies lock poisoned")
            .get_mut(&endpoint)
            .and_then(VecDeque::pop_front)
            .unwrap_or(Err(ProcessorError::EmptyBody))
    }
}
