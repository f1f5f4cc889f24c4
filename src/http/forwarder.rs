//! Outbound HTTP client.
//!
//! # Responsibilities
//! - Issue the upstream request with the inbound body streamed through
//! - Bound the wait for the response head with an optional deadline
//! - Turn deadline expiry into the synthetic 504, and nothing else
//!
//! # Design Decisions
//! - One pooled hyper client shared by all requests (cheap to clone)
//! - HTTP and HTTPS upstreams; HTTP/2 negotiated via ALPN when offered
//! - The deadline covers connect + response head; once the head arrives
//!   the body streams for as long as the upstream keeps sending

use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{Request, Version};
use axum::response::Response;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::error::ProxyError;
use crate::http::response::{gateway_timeout, relay};
use crate::resilience::timeouts::{with_deadline, Deadlined};
use crate::security::headers::strip_hop_by_hop;

pub type HttpsClient = Client<HttpsConnector<HttpConnector>, Body>;

/// Sends requests to upstreams.
#[derive(Clone)]
pub struct Forwarder {
    client: HttpsClient,
}

impl Forwarder {
    pub fn new() -> Self {
        let connector = HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .enable_http2()
            .build();

        let client = Client::builder(TokioExecutor::new()).build(connector);
        Self { client }
    }

    /// Forward `request` to the absolute URI it carries.
    ///
    /// With a deadline, an upstream that has not produced its response head
    /// in time is abandoned (the connection is dropped) and the caller gets
    /// `504 Request timeout`. Transport faults are returned as
    /// [`ProxyError::Upstream`] whether or not a deadline was set.
    pub async fn forward(
        &self,
        mut request: Request<Body>,
        deadline: Option<Duration>,
    ) -> Result<Response, ProxyError> {
        strip_hop_by_hop(request.headers_mut());
        // The pooled connection decides the wire version; an inbound HTTP/2
        // version would be refused on an HTTP/1 upstream.
        *request.version_mut() = Version::HTTP_11;

        let method = request.method().clone();
        let uri = request.uri().clone();
        let start_time = Instant::now();

        match with_deadline(deadline, self.client.request(request)).await {
            Deadlined::Completed(Ok(response)) => {
                tracing::debug!(
                    %method,
                    upstream = %uri,
                    status = response.status().as_u16(),
                    elapsed_ms = start_time.elapsed().as_millis() as u64,
                    "Upstream responded"
                );
                Ok(relay(response))
            }
            Deadlined::Completed(Err(e)) => {
                tracing::error!(
                    %method,
                    upstream = %uri,
                    error = ?e,
                    elapsed_ms = start_time.elapsed().as_millis() as u64,
                    "Upstream request failed"
                );
                Err(ProxyError::Upstream(e))
            }
            Deadlined::Expired => {
                tracing::warn!(
                    %method,
                    upstream = %uri,
                    deadline_ms = deadline.map(|d| d.as_millis() as u64),
                    "Upstream timed out"
                );
                Ok(gateway_timeout())
            }
        }
    }
}

impl Default for Forwarder {
    fn default() -> Self {
        Self::new()
    }
}
