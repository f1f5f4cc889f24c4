//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the handler chain
//! - Wire up middleware (tracing, CORS, response headers)
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Method, Request},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowHeaders, Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};
use uuid::Uuid;

use crate::config::GatewayConfig;
use crate::http::forwarder::Forwarder;
use crate::http::handlers::{custom_model_proxy, dispatch, liveness};
use crate::lifecycle::ShutdownSignal;
use crate::routing::{Dispatcher, RouteTable};

/// Tells buffering intermediaries (nginx and friends) to stream responses.
pub const X_ACCEL_BUFFERING: HeaderName = HeaderName::from_static("x-accel-buffering");

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub forwarder: Forwarder,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// The route table is compiled here, before any listener exists.
    pub fn new(config: GatewayConfig) -> Self {
        let routes = Arc::new(RouteTable::build(config.proxies));
        if routes.is_empty() {
            tracing::warn!("No reverse proxy routes configured");
        }

        let forwarder = Forwarder::new();
        let dispatcher = Dispatcher::new(
            routes,
            forwarder.clone(),
            Duration::from_millis(config.upstream_timeout_ms),
        );

        let state = AppState {
            dispatcher,
            forwarder,
        };

        let router = Self::build_router(state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Method mismatches on the fixed endpoints fall back to the route table
    /// rather than answering 405, so they continue down the chain.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", get(liveness).fallback(dispatch))
            .route("/custom-model-proxy", post(custom_model_proxy).fallback(dispatch))
            .fallback(dispatch)
            .with_state(state)
            .layer(cors_layer())
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(make_span)
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(SetResponseHeaderLayer::overriding(
                X_ACCEL_BUFFERING,
                HeaderValue::from_static("no"),
            ))
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers(AllowHeaders::mirror_request())
}

fn make_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %request.method(),
        uri = %request.uri(),
    )
}
