//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, path dispatch)
//!     → request.rs (request ID for tracing)
//!     → [upstream call: phabricator or gerrit]
//!     → response.rs (header filtering, streamed relay)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::HttpServer;
