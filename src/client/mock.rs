//! Simulated transport for tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use serde_json::Value;

use super::{FetchError, Transport, TransportResponse};

/// A request captured by [`MockTransport`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub api_key: String,
    pub body: Value,
}

/// Answers every POST with a fixed response and counts the calls
#[derive(Debug)]
pub struct MockTransport {
    status: u16,
    body: Vec<u8>,
    calls: AtomicUsize,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn with_response(status: u16, body: impl AsRef<[u8]>) -> Self {
        Self {
            status,
            body: body.as_ref().to_vec(),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl Transport for MockTransport {
    async fn post(
        &self,
        url: &str,
        api_key: &str,
        body: Vec<u8>,
    ) -> Result<TransportResponse, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            api_key: api_key.to_string(),
            body: serde_json::from_slice(&body).unwrap_or(Value::Null),
        });
        Ok(TransportResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}
