//! Configuration schema definitions.
//!
//! Mirrors the on-disk layout of `config.yaml` / `config.json`. Keys are
//! camelCase on disk; every field has a default so an empty file is valid.

use serde::{Deserialize, Deserializer, Serialize};

/// Deadline of routed upstream calls (60 s) when the file does not set one.
pub const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 60_000;

/// Root configuration for the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GatewayConfig {
    /// Route rules, evaluated in file order.
    #[serde(deserialize_with = "null_as_empty")]
    pub proxies: Vec<RouteRule>,

    /// Time allowed for an upstream to send its response head, in milliseconds.
    ///
    /// Routed calls get a fixed 60000 ms unless the file sets
    /// `upstreamTimeoutMs`; the key is an extension for deployments and tests
    /// that need a shorter bound. The ad-hoc endpoint never has a deadline.
    pub upstream_timeout_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            proxies: Vec::new(),
            upstream_timeout_ms: DEFAULT_UPSTREAM_TIMEOUT_MS,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<RouteRule>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<RouteRule>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A configured mapping from a path prefix (or alternate hostname) to an
/// upstream base URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRule {
    /// Matched as the leading `/<segment>/` of the request path.
    pub path_segment: String,

    /// Absolute base URL of the upstream, e.g. `https://api.openai.com`.
    pub target: String,

    /// Requests addressed to this hostname match regardless of path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub or_hostname: Option<String>,
}

impl RouteRule {
    pub fn new(path_segment: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            path_segment: path_segment.into(),
            target: target.into(),
            or_hostname: None,
        }
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.or_hostname = Some(hostname.into());
        self
    }
}
