//! Route matching logic.
//!
//! # Responsibilities
//! - Match the leading `/<segment>/` of the path (case-sensitive)
//! - Match the request hostname (exact, case-insensitive)
//! - Combine conditions with OR semantics
//!
//! # Design Decisions
//! - Hostname comes from the Host header, falling back to the URI authority
//!   (HTTP/2 requests carry it in `:authority`)
//! - Port is not part of the hostname
//! - No regex to guarantee O(n) matching

use axum::body::Body;
use axum::http::{header, uri::Authority, Request};

/// Trait for matching requests against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the request matches this condition.
    fn matches(&self, req: &Request<Body>) -> bool;
}

/// Hostname the client addressed, without port, lowercased.
pub fn request_hostname<B>(req: &Request<B>) -> Option<String> {
    let from_header = req
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.parse::<Authority>().ok())
        .map(|a| a.host().to_string());

    from_header
        .or_else(|| req.uri().host().map(str::to_string))
        .map(|h| h.to_ascii_lowercase())
}

/// Matches requests addressed to a given hostname.
#[derive(Debug, Clone)]
pub struct HostnameMatcher {
    expected: String,
}

impl HostnameMatcher {
    /// The hostname is normalized to lowercase for case-insensitive matching.
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            expected: hostname.into().to_ascii_lowercase(),
        }
    }
}

impl Matcher for HostnameMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        request_hostname(req).is_some_and(|h| h == self.expected)
    }
}

/// Matches paths that start with `/<segment>/`.
///
/// A bare `/<segment>` (no trailing slash) does not match.
#[derive(Debug, Clone)]
pub struct PathSegmentMatcher {
    prefix: String,
}

impl PathSegmentMatcher {
    pub fn new(segment: &str) -> Self {
        Self {
            prefix: format!("/{segment}/"),
        }
    }

    /// The `/<segment>/` prefix this matcher looks for.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Matcher for PathSegmentMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        req.uri().path().starts_with(&self.prefix)
    }
}

/// Combines multiple matchers with OR semantics.
#[derive(Debug)]
pub struct AnyMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AnyMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }
}

impl Matcher for AnyMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        self.matchers.iter().any(|m| m.matches(req))
    }
}
