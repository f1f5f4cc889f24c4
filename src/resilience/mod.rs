//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Routed request to upstream:
//!     → timeouts.rs (race the call against the route deadline)
//!     → Completed(result) | Expired → synthetic 504
//! ```
//!
//! # Design Decisions
//! - Every routed call has a deadline; the ad-hoc endpoint has none
//! - No retries: request bodies are streamed and cannot be replayed

pub mod timeouts;

pub use timeouts::{with_deadline, Deadlined};
