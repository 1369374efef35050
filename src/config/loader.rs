//! Configuration loading from disk and environment.

use std::path::Path;

use thiserror::Error;

use crate::config::schema::ProxyConfig;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML.
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// An environment override carries an unusable value.
    #[error("Invalid value for {var}: {value}")]
    Env { var: &'static str, value: String },
}

/// Load configuration: optional TOML file, then environment overrides.
///
/// `PORT` and `PHAB_API_KEY` take precedence over the file so the proxy can
/// be configured entirely from the process environment, file-free.
pub fn load_config(path: Option<&Path>) -> Result<ProxyConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => ProxyConfig::default(),
    };

    apply_env_overrides(&mut config, |var| std::env::var(var).ok())?;

    Ok(config)
}

/// Apply environment overrides from a lookup function.
///
/// Taking the lookup as a parameter keeps this testable without mutating
/// process-wide environment state.
fn apply_env_overrides<F>(config: &mut ProxyConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
{
    if let Some(port) = lookup("PORT") {
        config.listener.port = port.parse().map_err(|_| ConfigError::Env {
            var: "PORT",
            value: port.clone(),
        })?;
    }

    if let Some(token) = lookup("PHAB_API_KEY") {
        config.phabricator.api_token = Some(token);
    }

    Ok(())
}
