//! Endpoint handlers.
//!
//! The handler chain, in order:
//! 1. fixed endpoints (`GET /`, `POST /custom-model-proxy`)
//! 2. [`dispatch`]: the route table
//! 3. [`not_found`]: terminal stage

use axum::{
    body::Body,
    extract::{rejection::QueryRejection, Query, State},
    http::{Request, Uri},
    response::Response,
};
use serde::Deserialize;
use url::Url;

use crate::error::ProxyError;
use crate::http::response::not_found;
use crate::http::server::AppState;
use crate::routing::Dispatch;

pub const LIVENESS_BODY: &str = "A proxy for AI!";

/// `GET /`
pub async fn liveness() -> &'static str {
    LIVENESS_BODY
}

#[derive(Debug, Deserialize)]
pub struct CustomProxyQuery {
    url: String,
}

/// Validate the caller-supplied target: an absolute http(s) URL.
fn parse_target(raw: &str) -> Result<Uri, ProxyError> {
    let url = Url::parse(raw).map_err(|e| ProxyError::InvalidTarget(format!("{raw:?}: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ProxyError::InvalidTarget(format!(
            "{raw:?}: unsupported scheme {:?}",
            url.scheme()
        )));
    }

    url.as_str()
        .parse()
        .map_err(|e| ProxyError::InvalidTarget(format!("{raw:?}: {e}")))
}

/// `POST /custom-model-proxy?url=<absolute URL>`
///
/// Forwards method, headers (including `Host`) and body to the given URL
/// as received. No sanitization, no deadline, no route table.
///
/// Caveats:
/// - There is no allow-list: any caller can make the gateway reach any
///   http(s) address it can route to, internal ones included.
/// - The inbound `Host` (normally the gateway's own address) is sent as is.
///   Fetch-style clients derive `Host` from the target URL instead, so
///   upstreams behind name-based virtual hosting may reject these requests.
pub async fn custom_model_proxy(
    State(state): State<AppState>,
    query: Result<Query<CustomProxyQuery>, QueryRejection>,
    mut request: Request<Body>,
) -> Result<Response, ProxyError> {
    let Query(query) = query.map_err(|rejection| ProxyError::InvalidTarget(rejection.body_text()))?;
    let uri = parse_target(&query.url)?;

    tracing::debug!(method = %request.method(), target = %uri, "Ad-hoc proxy request");

    *request.uri_mut() = uri;
    state.forwarder.forward(request, None).await
}

/// Route-table stage; unmatched requests continue to [`not_found`].
pub async fn dispatch(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Result<Response, ProxyError> {
    match state.dispatcher.dispatch(request).await? {
        Dispatch::Handled(response) => Ok(response),
        Dispatch::Unhandled(request) => {
            tracing::debug!(
                method = %request.method(),
                path = %request.uri().path(),
                "No route matched"
            );
            Ok(not_found())
        }
    }
}
