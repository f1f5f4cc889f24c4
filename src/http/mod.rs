//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: trace, CORS, X-Accel-Buffering)
//!     → handlers.rs (fixed endpoints, then the route table, then 404)
//!     → routing::Dispatcher (match, rewrite, sanitize)
//!     → forwarder.rs (outbound call, deadline)
//!     → response.rs (relay or synthetic response)
//!     → Send to client
//! ```

pub mod forwarder;
pub mod handlers;
pub mod response;
pub mod server;

pub use forwarder::Forwarder;
pub use server::{AppState, HttpServer};
