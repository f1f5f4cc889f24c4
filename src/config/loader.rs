//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// File names probed in the config directory; the first one that exists wins.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["config.yaml", "config.yml", "config.json"];

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML parse error in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("JSON parse error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Find the config file in `dir`, probing [`CONFIG_FILE_NAMES`] in order.
pub fn discover(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Load configuration from a YAML or JSON file, chosen by extension.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    } else if content.trim().is_empty() {
        // An empty YAML document deserializes to unit, not a mapping.
        Ok(GatewayConfig::default())
    } else {
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Discover and load the config in `dir`.
///
/// Never fails: a missing file, unreadable file or parse error is logged and
/// yields the default configuration, which has no routes.
pub fn load_or_default(dir: &Path) -> GatewayConfig {
    let Some(path) = discover(dir) else {
        tracing::warn!(dir = %dir.display(), "No config file found, no proxy routes configured");
        return GatewayConfig::default();
    };

    match load_config(&path) {
        Ok(config) => {
            tracing::info!(
                path = %path.display(),
                routes = config.proxies.len(),
                "Configuration loaded"
            );
            config
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load config, no proxy routes configured");
            GatewayConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{RouteRule, DEFAULT_UPSTREAM_TIMEOUT_MS};

    const YAML: &str = "\
proxies:
  - pathSegment: openai
    target: https://api.openai.com
  - pathSegment: anthropic
    target: https://api.anthropic.com
    orHostname: claude.local
";

    #[test]
    fn yaml_wins_over_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.json"), r#"{"proxies": []}"#).unwrap();
        fs::write(dir.path().join("config.yaml"), YAML).unwrap();

        assert_eq!(discover(dir.path()), Some(dir.path().join("config.yaml")));
        let config = load_or_default(dir.path());
        assert_eq!(config.proxies.len(), 2);
        assert_eq!(
            config.proxies[1],
            RouteRule::new("anthropic", "https://api.anthropic.com").with_hostname("claude.local")
        );
    }

    #[test]
    fn yml_before_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.json"), r#"{"proxies": []}"#).unwrap();
        fs::write(dir.path().join("config.yml"), YAML).unwrap();

        assert_eq!(discover(dir.path()), Some(dir.path().join("config.yml")));
    }

    #[test]
    fn json_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("config.json"),
            r#"{"proxies": [{"pathSegment": "models", "target": "http://127.0.0.1:9000"}], "upstreamTimeoutMs": 500}"#,
        )
        .unwrap();

        let config = load_or_default(dir.path());
        assert_eq!(config.proxies, vec![RouteRule::new("models", "http://127.0.0.1:9000")]);
        assert_eq!(config.upstream_timeout_ms, 500);
    }

    #[test]
    fn missing_file_yields_no_routes() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(discover(dir.path()), None);
        assert_eq!(load_or_default(dir.path()), GatewayConfig::default());
    }

    #[test]
    fn malformed_file_yields_no_routes() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.yaml"), "proxies: [ { pathSegment: ").unwrap();

        assert!(matches!(
            load_config(&dir.path().join("config.yaml")),
            Err(ConfigError::Yaml { .. })
        ));
        let config = load_or_default(dir.path());
        assert!(config.proxies.is_empty());
        assert_eq!(config.upstream_timeout_ms, DEFAULT_UPSTREAM_TIMEOUT_MS);
    }

    #[test]
    fn empty_yaml_is_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.yaml"), "\n").unwrap();
        assert_eq!(load_or_default(dir.path()), GatewayConfig::default());
    }
}
