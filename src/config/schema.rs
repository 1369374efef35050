//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files, and
//! every section has defaults so an empty config file (or no file at all)
//! yields a working proxy pointed at the production upstreams.

use serde::{Deserialize, Serialize};

/// Root configuration for the tracker proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind port).
    pub listener: ListenerConfig,

    /// Phabricator upstream settings.
    pub phabricator: PhabricatorConfig,

    /// Gerrit upstream settings.
    pub gerrit: GerritConfig,

    /// Logging settings.
    pub log: LogConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Listening port. Overridable via the `PORT` environment variable.
    pub port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

impl ListenerConfig {
    /// Bind address for the TCP listener.
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

/// Phabricator upstream configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PhabricatorConfig {
    /// Conduit search endpoint the proxy POSTs to.
    pub search_url: String,

    /// Conduit API token, loaded once at startup and never exposed to
    /// clients. Overridable via the `PHAB_API_KEY` environment variable.
    /// When unset the token field is omitted from upstream calls and the
    /// upstream rejects them; there is no local validation.
    pub api_token: Option<String>,
}

impl Default for PhabricatorConfig {
    fn default() -> Self {
        Self {
            search_url: "https://phabricator.wikimedia.org/api/maniphest.search".to_string(),
            api_token: None,
        }
    }
}

/// Gerrit upstream configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GerritConfig {
    /// Base URL for change resources. Change ids are appended directly,
    /// change queries as `?q=<encoded>`.
    pub base_url: String,
}

impl Default for GerritConfig {
    fn default() -> Self {
        Self {
            base_url: "https://gerrit.wikimedia.org/r/changes/".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default `EnvFilter` directive; `RUST_LOG` takes precedence.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "tracker_proxy=debug,tower_http=debug".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProxyConfig::default();
        assert_eq!(config.listener.port, 3000);
        assert_eq!(config.listener.bind_address(), "0.0.0.0:3000");
        assert!(config.phabricator.api_token.is_none());
        assert!(config.phabricator.search_url.ends_with("maniphest.search"));
        assert!(config.gerrit.base_url.ends_with("/changes/"));
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: ProxyConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.port, 3000);
    }

    #[test]
    fn test_partial_toml() {
        let config: ProxyConfig = toml::from_str(
            r#"
            [listener]
            port = 8080

            [gerrit]
            base_url = "http://localhost:9000/changes/"
            "#,
        )
        .unwrap();
        assert_eq!(config.listener.port, 8080);
        assert_eq!(config.gerrit.base_url, "http://localhost:9000/changes/");
        // Untouched sections keep their defaults.
        assert!(config.phabricator.search_url.contains("phabricator"));
    }
}
