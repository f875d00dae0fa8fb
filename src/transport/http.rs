//! reqwest-backed HTTP transport.

use super::{Request, Response, Transport};
use crate::error::{Error, Result};
use reqwest::header::COOKIE;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// HTTP transport for the router's management API.
///
/// Wraps a `reqwest::Client` (itself reference counted) and the base URL.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Arc<str>,
}

impl HttpTransport {
    /// Create a transport for `base_url` with a per-request timeout.
    ///
    /// A trailing `/` on the base URL is removed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("could not build HTTP client: {}", e).into()).boxed())?;

        Ok(Self::with_client(client, base_url))
    }

    /// Create a transport from an existing reqwest client.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').into(),
        }
    }
}

impl Transport for HttpTransport {
    fn get(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        let url = format!("{}{}", self.base_url, request.path_and_query());
        let mut builder = self.client.get(&url);
        if let Some(token) = &request.credential {
            builder = builder.header(COOKIE, format!("credential={}", token));
        }
        let endpoint = request.endpoint;

        async move {
            tracing::trace!(target: "arris_connectbox::transport", { endpoint }, "sending request");

            let network = |e: reqwest::Error| {
                Error::Network {
                    endpoint: endpoint.into(),
                    source: Box::new(e),
                }
                .boxed()
            };

            let response = builder.send().await.map_err(network)?;
            let status = response.status().as_u16();
            let body = response.bytes().await.map_err(network)?;

            tracing::trace!(target: "arris_connectbox::transport", { endpoint, status, bytes = body.len() }, "received response");
            Ok(Response { status, body })
        }
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
