//! Mock transport for testing.
//!
//! Provides a programmable transport that answers per endpoint without
//! needing a router on the network.

use super::{Request, Response, Transport};
use crate::error::{Error, Result};
use bytes::Bytes;
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::{Arc, Mutex};

/// A mock response to return for a request.
#[derive(Clone, Debug)]
pub enum MockResponse {
    /// Answer with this status and body.
    Reply(Response),
    /// Simulate a failure before any status was received.
    NetworkError(String),
}

/// Mock transport state shared between clones.
#[derive(Default)]
struct MockTransportInner {
    /// Queued responses per endpoint
    responses: HashMap<&'static str, VecDeque<MockResponse>>,
    /// Answer per endpoint when its queue is empty
    defaults: HashMap<&'static str, MockResponse>,
    /// Recorded requests, in order
    requests: Vec<Request>,
}

/// Mock transport for testing client and session behavior.
///
/// Endpoints with nothing queued and no default answer `404`.
///
/// # Example
///
/// ```rust
/// use arris_connectbox::transport::MockTransport;
///
/// let mock = MockTransport::new();
/// mock.queue_response("login", 200, "eyJuYW1lIjogImFkbWluIn0=");
/// mock.queue_status("getConnDevices", 401);
/// mock.queue_network_error("getConnDevices", "connection reset");
/// ```
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

impl MockTransport {
    /// Create a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for an endpoint.
    pub fn queue_response(&self, endpoint: &'static str, status: u16, body: impl Into<Bytes>) {
        self.queue(endpoint, MockResponse::Reply(Response::new(status, body)));
    }

    /// Queue an empty-bodied response with the given status.
    pub fn queue_status(&self, endpoint: &'static str, status: u16) {
        self.queue_response(endpoint, status, Bytes::new());
    }

    /// Queue a network failure.
    pub fn queue_network_error(&self, endpoint: &'static str, msg: impl Into<String>) {
        self.queue(endpoint, MockResponse::NetworkError(msg.into()));
    }

    /// Queue any mock response.
    pub fn queue(&self, endpoint: &'static str, response: MockResponse) {
        let mut inner = self.inner.lock().unwrap();
        inner
            .responses
            .entry(endpoint)
            .or_default()
            .push_back(response);
    }

    /// Set the answer for an endpoint once its queue is empty.
    pub fn set_default_response(&self, endpoint: &'static str, status: u16, body: impl Into<Bytes>) {
        let mut inner = self.inner.lock().unwrap();
        inner.defaults.insert(
            endpoint,
            MockResponse::Reply(Response::new(status, body)),
        );
    }

    /// Get all recorded requests.
    pub fn requests(&self) -> Vec<Request> {
        let inner = self.inner.lock().unwrap();
        inner.requests.clone()
    }

    /// Get recorded requests to one endpoint.
    pub fn requests_to(&self, endpoint: &str) -> Vec<Request> {
        let inner = self.inner.lock().unwrap();
        inner
            .requests
            .iter()
            .filter(|r| r.endpoint == endpoint)
            .cloned()
            .collect()
    }

    /// Number of requests sent to one endpoint.
    pub fn request_count(&self, endpoint: &str) -> usize {
        self.requests_to(endpoint).len()
    }

    /// Clear recorded requests.
    pub fn clear_requests(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.requests.clear();
    }

    /// Number of queued responses remaining across all endpoints.
    pub fn queued_response_count(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.responses.values().map(VecDeque::len).sum()
    }
}

impl Transport for MockTransport {
    fn get(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        let endpoint = request.endpoint;
        let response = {
            let mut inner = self.inner.lock().unwrap();
            inner.requests.push(request);
            let queued = inner
                .responses
                .get_mut(endpoint)
                .and_then(VecDeque::pop_front);
            queued.or_else(|| inner.defaults.get(endpoint).cloned())
        };

        async move {
            match response {
                Some(MockResponse::Reply(response)) => Ok(response),
                Some(MockResponse::NetworkError(msg)) => Err(Error::Network {
                    endpoint: endpoint.into(),
                    source: Box::new(std::io::Error::other(msg)),
                }
                .boxed()),
                None => Ok(Response::new(404, Bytes::new())),
            }
        }
    }

    fn base_url(&self) -> &str {
        "http://mock"
    }
}
