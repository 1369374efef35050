//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via tracing; request ID flows through all events
//! - Log level configurable via `RUST_LOG` with a config fallback

pub mod logging;

pub use logging::init_logging;
