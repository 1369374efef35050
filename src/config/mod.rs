//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (PORT, PHAB_API_KEY)
//!     → ProxyConfig (immutable)
//!     → shared via AppState with all handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the upstream token is read exactly
//!   once at startup, never per request
//! - All fields have defaults to allow minimal (or absent) config files
//! - Environment variables win over file values

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError};
pub use schema::{GerritConfig, ListenerConfig, LogConfig, PhabricatorConfig, ProxyConfig};
