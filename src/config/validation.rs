//! Route rule validation.
//!
//! Serde handles the syntax; this checks what the router relies on: a
//! non-empty path segment and an absolute http(s) target with a hostname.
//! All problems with one rule are reported together.

use thiserror::Error;
use url::Url;

use crate::config::schema::RouteRule;

/// A single semantic problem with a route rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("pathSegment must not be empty")]
    EmptyPathSegment,

    #[error("target {target:?} is not an absolute URL: {reason}")]
    InvalidTarget { target: String, reason: String },

    #[error("target {0:?} has no hostname")]
    MissingHostname(String),

    #[error("target {0:?} must use http or https")]
    UnsupportedScheme(String),
}

/// Validate a rule, returning the parsed target on success.
pub fn validate_rule(rule: &RouteRule) -> Result<Url, Vec<ValidationError>> {
    let mut errors = Vec::new();

    if rule.path_segment.is_empty() {
        errors.push(ValidationError::EmptyPathSegment);
    }

    let target = match Url::parse(&rule.target) {
        Ok(url) => {
            if !matches!(url.scheme(), "http" | "https") {
                errors.push(ValidationError::UnsupportedScheme(rule.target.clone()));
            }
            if url.host_str().map_or(true, str::is_empty) {
                errors.push(ValidationError::MissingHostname(rule.target.clone()));
            }
            Some(url)
        }
        Err(e) => {
            errors.push(ValidationError::InvalidTarget {
                target: rule.target.clone(),
                reason: e.to_string(),
            });
            None
        }
    };

    match target {
        Some(url) if errors.is_empty() => Ok(url),
        _ => Err(errors),
    }
}
