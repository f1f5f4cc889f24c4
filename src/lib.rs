//! HTTP forwarding gateway for AI model APIs.
//!
//! Requests are matched against configured route rules, stripped of
//! edge/CDN metadata, forwarded under a deadline and streamed back.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod routing;
pub mod security;

pub use config::{GatewayConfig, RouteRule};
pub use error::ProxyError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
