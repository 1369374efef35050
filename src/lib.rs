//! Tracker Proxy Library
//!
//! A small same-origin-bypassing reverse proxy in front of two issue
//! tracking upstreams: Phabricator task search and Gerrit change retrieval.

pub mod config;
pub mod http;
pub mod observability;
pub mod upstream;

pub use config::ProxyConfig;
pub use http::HttpServer;
