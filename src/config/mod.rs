//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config.yaml | config.yml | config.json (first found)
//!     → loader.rs (discover, parse & deserialize)
//!     → GatewayConfig (immutable)
//!     → routing::RouteTable::build (validation.rs per rule)
//!     → shared via Arc with every request
//! ```
//!
//! # Design Decisions
//! - Loaded once at startup; changes require a restart
//! - All fields have defaults so a missing file means "no routes", not a crash
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_or_default, ConfigError};
pub use schema::{GatewayConfig, RouteRule};
pub use validation::ValidationError;
