//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields (route, upstream, status, elapsed_ms)
//!     → inside the per-request span opened by the HTTP layer (request_id, method, uri)
//!
//! Consumers:
//!     → stdout, pretty or JSON (logging.rs)
//! ```

pub mod logging;

pub use logging::{init, LogFormat};
