//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Routed request:
//!     → headers.rs (drop edge metadata, rewrite Host)
//!     → Forwarder
//! ```
//!
//! # Design Decisions
//! - No trust in edge-injected client metadata
//! - The ad-hoc endpoint bypasses sanitization entirely

pub mod headers;
