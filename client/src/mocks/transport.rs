//! Mock transport for testing.

use crate::error::TransportError;
use crate::transport::{ApiRequest, RawResponse, Transport};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

type Outcome = Result<RawResponse, TransportError>;

#[derive(Debug, Default)]
struct State {
    script: VecDeque<Outcome>,
    requests: Vec<ApiRequest>,
}

/// Transport answering from a script of canned outcomes.
///
/// Outcomes are consumed in order, one per request. Once the script is
/// exhausted every request fails as a network error. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<State>>,
}

impl MockTransport {
    /// Create a transport with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    /// Queue an arbitrary outcome.
    pub fn push(&self, outcome: Outcome) {
        self.with_state(|state| state.script.push_back(outcome));
    }

    /// Queue a 200 response with a JSON body.
    pub fn push_json(&self, body: Value) {
        self.push(Ok(RawResponse::json(body)));
    }

    /// Queue a 200 response with a binary body.
    pub fn push_binary(&self, bytes: impl Into<Vec<u8>>) {
        self.push(Ok(RawResponse::binary(bytes.into())));
    }

    /// Queue a non-success response.
    pub fn push_status(&self, status: u16, body: Value) {
        self.push(Err(TransportError::status(status, body)));
    }

    /// Queue a failure with no response.
    pub fn push_network_error(&self, message: impl Into<String>) {
        self.push(Err(TransportError::network(message)));
    }

    /// Requests received so far, oldest first, as seen after interceptors.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.with_state(|state| state.requests.clone())
    }

    /// Most recent request.
    #[must_use]
    pub fn last_request(&self) -> Option<ApiRequest> {
        self.with_state(|state| state.requests.last().cloned())
    }

    /// Number of requests received.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.with_state(|state| state.requests.len())
    }
}

impl Transport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        self.with_state(|state| {
            state.requests.push(request);
            state
                .script
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::network("no scripted response")))
        })
    }
}
