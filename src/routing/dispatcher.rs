//! Route dispatch.
//!
//! # Responsibilities
//! - Find the first route matching a request
//! - Rewrite URL and headers for the upstream
//! - Hand the request to the forwarder under the route deadline
//!
//! # Design Decisions
//! - A request matching no route is handed back untouched as
//!   [`Dispatch::Unhandled`]; the dispatcher never answers on its own
//! - The inbound body is moved into the outbound request, never read here

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Uri};
use axum::response::Response;

use crate::error::ProxyError;
use crate::http::forwarder::Forwarder;
use crate::routing::router::RouteTable;
use crate::security::headers::sanitize;

/// Result of one stage of the handler chain.
#[derive(Debug)]
pub enum Dispatch {
    /// The stage produced the response.
    Handled(Response),
    /// The stage declined; the request goes to the next stage.
    Unhandled(Request<Body>),
}

/// Forwards requests that match the route table.
#[derive(Clone)]
pub struct Dispatcher {
    routes: Arc<RouteTable>,
    forwarder: Forwarder,
    deadline: Duration,
}

impl Dispatcher {
    pub fn new(routes: Arc<RouteTable>, forwarder: Forwarder, deadline: Duration) -> Self {
        Self {
            routes,
            forwarder,
            deadline,
        }
    }

    pub async fn dispatch(&self, request: Request<Body>) -> Result<Dispatch, ProxyError> {
        let Some(route) = self.routes.match_request(&request) else {
            return Ok(Dispatch::Unhandled(request));
        };

        let target = route.target_url(request.uri());
        let uri: Uri = target
            .parse()
            .map_err(|source| ProxyError::InvalidUpstreamUri {
                uri: target.clone(),
                source,
            })?;

        tracing::debug!(
            method = %request.method(),
            path = %request.uri().path(),
            route = %route.rule().path_segment,
            target = %uri,
            "Route matched"
        );

        let (mut parts, body) = request.into_parts();
        parts.headers = sanitize(&parts.headers, route.upstream_host());
        parts.uri = uri;

        let response = self
            .forwarder
            .forward(Request::from_parts(parts, body), Some(self.deadline))
            .await?;

        Ok(Dispatch::Handled(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RouteRule;

    fn dispatcher(rules: Vec<RouteRule>) -> Dispatcher {
        Dispatcher::new(
            Arc::new(RouteTable::build(rules)),
            Forwarder::new(),
            Duration::from_secs(1),
        )
    }

    #[tokio::test]
    async fn unmatched_request_falls_through_untouched() {
        let dispatcher = dispatcher(vec![RouteRule::new("models", "http://127.0.0.1:9")]);
        let request = Request::builder()
            .method("POST")
            .uri("/other/v1?x=1")
            .header("host", "gw.test")
            .header("x-forwarded-for", "203.0.113.9")
            .body(Body::from("payload"))
            .unwrap();

        let Dispatch::Unhandled(request) = dispatcher.dispatch(request).await.unwrap() else {
            panic!("dispatcher answered an unmatched request");
        };

        assert_eq!(request.uri(), "/other/v1?x=1");
        assert_eq!(request.headers().get("x-forwarded-for").unwrap(), "203.0.113.9");
        let body = axum::body::to_bytes(request.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"payload");
    }

    #[tokio::test]
    async fn empty_table_never_handles() {
        let dispatcher = dispatcher(Vec::new());
        let request = Request::builder().uri("/models/x").body(Body::empty()).unwrap();
        assert!(matches!(
            dispatcher.dispatch(request).await.unwrap(),
            Dispatch::Unhandled(_)
        ));
    }
}
