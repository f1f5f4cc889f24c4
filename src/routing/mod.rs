//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (host, path, query)
//!     → dispatcher.rs (stage in the handler chain)
//!     → router.rs (route lookup, target URL rewrite)
//!     → matcher.rs (evaluate path-segment / hostname conditions)
//!     → Handled(response) or Unhandled(request) for the next stage
//!
//! Route Compilation (at startup):
//!     RouteRule[] (file order)
//!     → validate, drop invalid
//!     → compile matchers
//!     → freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - First match wins, in configuration order
//! - No match is not an error: the request falls through

pub mod dispatcher;
pub mod matcher;
pub mod router;

pub use dispatcher::{Dispatch, Dispatcher};
pub use router::{Route, RouteTable};
