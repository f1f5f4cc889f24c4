//! Route table and target rewriting.
//!
//! # Responsibilities
//! - Compile route rules into immutable routes
//! - Look up the first route matching a request
//! - Build the upstream URL for a matched request
//!
//! # Design Decisions
//! - Immutable after construction (shared via Arc without locks)
//! - O(n) scan in file order; first match wins
//! - Invalid rules are dropped with a warning, the rest keep their order

use axum::body::Body;
use axum::http::{HeaderValue, Request, Uri};

use crate::config::schema::RouteRule;
use crate::config::validation::validate_rule;
use crate::routing::matcher::{AnyMatcher, HostnameMatcher, Matcher, PathSegmentMatcher};

/// A compiled route rule.
#[derive(Debug)]
pub struct Route {
    rule: RouteRule,
    prefix: String,
    upstream_host: HeaderValue,
    matcher: AnyMatcher,
}

impl Route {
    /// Compile a rule. Returns `None` (after logging why) if the rule is invalid.
    fn compile(rule: RouteRule) -> Option<Self> {
        let target = match validate_rule(&rule) {
            Ok(url) => url,
            Err(errors) => {
                for error in &errors {
                    tracing::warn!(path_segment = %rule.path_segment, %error, "Skipping invalid route rule");
                }
                return None;
            }
        };

        let host = target.host_str()?;
        let upstream_host = match HeaderValue::from_str(host) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(path_segment = %rule.path_segment, error = %e, "Skipping route with unusable hostname");
                return None;
            }
        };

        let path_matcher = PathSegmentMatcher::new(&rule.path_segment);
        let prefix = path_matcher.prefix().to_string();

        let mut matchers: Vec<Box<dyn Matcher>> = vec![Box::new(path_matcher)];
        if let Some(hostname) = &rule.or_hostname {
            matchers.push(Box::new(HostnameMatcher::new(hostname.as_str())));
        }

        Some(Self {
            rule,
            prefix,
            upstream_host,
            matcher: AnyMatcher::new(matchers),
        })
    }

    pub fn rule(&self) -> &RouteRule {
        &self.rule
    }

    /// Hostname of the upstream target, ready to be sent as `Host`.
    pub fn upstream_host(&self) -> &HeaderValue {
        &self.upstream_host
    }

    /// Build the upstream URL for `uri`.
    ///
    /// `target` + path with the first `/<segment>/` replaced by `/` + query.
    /// Only the first occurrence is replaced, wherever it appears, so a
    /// hostname-matched request whose path lacks the prefix keeps its path.
    pub fn target_url(&self, uri: &Uri) -> String {
        let path = uri.path().replacen(&self.prefix, "/", 1);
        match uri.query() {
            Some(query) if !query.is_empty() => format!("{}{}?{}", self.rule.target, path, query),
            _ => format!("{}{}", self.rule.target, path),
        }
    }
}

/// Ordered, immutable set of routes.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Compile rules in order, dropping invalid ones.
    pub fn build(rules: impl IntoIterator<Item = RouteRule>) -> Self {
        let routes: Vec<Route> = rules.into_iter().filter_map(Route::compile).collect();

        for route in &routes {
            tracing::info!(
                path_segment = %route.rule.path_segment,
                target = %route.rule.target,
                or_hostname = ?route.rule.or_hostname,
                "Route registered"
            );
        }

        Self { routes }
    }

    /// First route matching the request, in table order.
    pub fn match_request(&self, req: &Request<Body>) -> Option<&Route> {
        self.routes.iter().find(|r| r.matcher.matches(req))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }
}
