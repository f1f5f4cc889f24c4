//! Response handling and transformation.
//!
//! # Responsibilities
//! - Relay upstream responses to the client without buffering
//! - Strip hop-by-hop headers from relayed responses
//! - Fabricate the gateway's own responses (timeout, not found)
//!
//! # Design Decisions
//! - Status, end-to-end headers and body bytes pass through untouched
//! - Upstream timeouts result in 504 Gateway Timeout with a fixed body

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hyper::body::Incoming;

use crate::security::headers::strip_hop_by_hop;

/// Body of the synthetic response sent when an upstream misses its deadline.
pub const TIMEOUT_BODY: &str = "Request timeout";

/// Body of the terminal stage when no route handled the request.
pub const NOT_FOUND_BODY: &str = "404 Not Found";

/// Wrap an upstream response for the client, streaming its body.
pub fn relay(response: hyper::Response<Incoming>) -> Response {
    let (mut parts, body) = response.into_parts();
    strip_hop_by_hop(&mut parts.headers);
    Response::from_parts(parts, Body::new(body))
}

/// Synthetic response for an upstream that did not answer in time.
pub fn gateway_timeout() -> Response {
    (StatusCode::GATEWAY_TIMEOUT, TIMEOUT_BODY).into_response()
}

/// Terminal stage of the handler chain.
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn timeout_body_is_fixed() {
        let response = gateway_timeout();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);

        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], TIMEOUT_BODY.as_bytes());
    }
}
