//! Header sanitization for forwarded requests.
//!
//! # Responsibilities
//! - Drop edge/CDN metadata (`cf-*`, `cdn-*`, `x-forwarded-*`, `x-real-ip`)
//!   before a request crosses to an upstream behind a different edge
//! - Re-derive `Host` from the upstream target
//! - Strip hop-by-hop headers, which describe one connection only
//!
//! # Design Decisions
//! - Allow by default, deny by prefix
//! - Multi-valued headers are copied value by value, in order

use axum::http::{header, HeaderMap, HeaderName, HeaderValue};

const DENIED_PREFIXES: [&str; 3] = ["cf-", "x-forwarded-", "cdn-"];

static HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// True if a header must not be relayed to an upstream.
///
/// `HeaderName` is always lowercase, so plain comparisons are
/// case-insensitive with respect to what the client sent.
pub fn is_edge_header(name: &HeaderName) -> bool {
    let name = name.as_str();
    name == "x-real-ip"
        || name == header::HOST.as_str()
        || DENIED_PREFIXES.iter().any(|p| name.starts_with(p))
}

/// Build the outbound header set for a routed request.
pub fn sanitize(inbound: &HeaderMap, upstream_host: &HeaderValue) -> HeaderMap {
    let mut outbound = HeaderMap::with_capacity(inbound.len());

    for (name, value) in inbound {
        if !is_edge_header(name) {
            outbound.append(name.clone(), value.clone());
        }
    }

    outbound.insert(header::HOST, upstream_host.clone());
    outbound
}

/// Remove hop-by-hop headers, including any listed in `Connection`.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let listed: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|token| HeaderName::from_bytes(token.trim().as_bytes()).ok())
        .collect();

    for name in listed.iter().chain(HOP_BY_HOP.iter()) {
        headers.remove(name);
    }
}
