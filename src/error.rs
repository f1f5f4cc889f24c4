//! Request-path error type.
//!
//! Upstream timeouts are not errors: they become a synthetic 504 inside the
//! forwarder. Everything here is either the caller's fault (4xx) or an
//! unexpected transport failure (generic 500).

use axum::http::{uri::InvalidUri, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    /// The ad-hoc endpoint was given a missing or malformed `url` parameter.
    #[error("invalid target url: {0}")]
    InvalidTarget(String),

    /// A matched route produced a URL the HTTP client cannot use.
    #[error("invalid upstream uri {uri:?}: {source}")]
    InvalidUpstreamUri {
        uri: String,
        #[source]
        source: InvalidUri,
    },

    /// Connect, DNS, TLS or protocol failure talking to the upstream.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::InvalidTarget(_) => StatusCode::BAD_REQUEST,
            ProxyError::InvalidUpstreamUri { .. } | ProxyError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ProxyError::InvalidTarget(message) => {
                tracing::debug!(%message, "Rejected ad-hoc proxy request");
                let body = serde_json::json!({ "success": false, "error": message });
                (status, Json(body)).into_response()
            }
            ProxyError::InvalidUpstreamUri { uri, source } => {
                tracing::error!(%uri, error = %source, "Route produced an unusable upstream URI");
                (status, "Internal Server Error").into_response()
            }
            // Logged with method and upstream by the forwarder.
            ProxyError::Upstream(_) => (status, "Internal Server Error").into_response(),
        }
    }
}
