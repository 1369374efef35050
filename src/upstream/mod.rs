//! Upstream call helpers.
//!
//! # Data Flow
//! ```text
//! handler extracts query params
//!     → phabricator.rs (form-encoded POST to the conduit search endpoint)
//!     → gerrit.rs (GET for a single change, by id or change query)
//!     → reqwest::Response handed back unconsumed
//!     → http/response.rs relays it as a live byte stream
//! ```
//!
//! # Design Decisions
//! - Request construction (form pairs, URLs) is split into pure functions so
//!   it can be unit tested without a network
//! - Responses are returned unread; the relay layer owns streaming
//! - No outbound timeout is configured: a hung upstream holds the client
//!   connection open (known limitation carried over from the original)

pub mod gerrit;
pub mod phabricator;

use thiserror::Error;

pub use gerrit::ChangeSelector;

/// Errors that can occur while contacting an upstream service.
///
/// Only transport-level failures surface here; non-2xx upstream statuses are
/// relayed to the client verbatim, untranslated.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection, DNS, or protocol failure before a response arrived.
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}
