//! HTTP server setup and request handlers.
//!
//! # Responsibilities
//! - Create the Axum Router with the two forwarding handlers
//! - Wire up middleware (tracing, request ID, CORS header)
//! - Dispatch by path: `/phabricator`, `/gerrit`, 404 fallback
//! - Relay upstream responses as live byte streams

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, HeaderValue, Response, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::config::{GerritConfig, PhabricatorConfig, ProxyConfig};
use crate::http::request::MakeRequestUuid;
use crate::http::response::relay;
use crate::upstream::{gerrit, phabricator, ChangeSelector};

/// Application state injected into handlers.
///
/// Holds the shared upstream client and the immutable upstream
/// configuration loaded once at startup.
#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
    pub phabricator: PhabricatorConfig,
    pub gerrit: GerritConfig,
}

/// HTTP server for the tracker proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Self {
        let state = AppState {
            client: reqwest::Client::new(),
            phabricator: config.phabricator.clone(),
            gerrit: config.gerrit.clone(),
        };

        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/phabricator", get(phabricator_handler))
            .route("/gerrit", get(gerrit_handler))
            .fallback(not_found)
            .with_state(state)
            // Every response carries the permissive CORS header, including
            // errors and the 404 fallback.
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            ))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a clone of the router, for driving the server in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

#[derive(Debug, Deserialize)]
struct PhabricatorParams {
    ids: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GerritParams {
    id: Option<String>,
    #[serde(rename = "changeId")]
    change_id: Option<String>,
}

/// Forward an issue search to the Phabricator conduit API.
async fn phabricator_handler(
    State(state): State<AppState>,
    Query(params): Query<PhabricatorParams>,
) -> Response<Body> {
    // A missing or empty parameter answers 500 with a fixed body; the
    // status code matches the original service's contract.
    let ids = match parse_ids(params.ids.as_deref()) {
        Some(ids) => ids,
        None => {
            tracing::warn!("Rejecting /phabricator request without ids");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Error parsing ids").into_response();
        }
    };

    tracing::debug!(count = ids.len(), "Forwarding task search");

    match phabricator::search_tasks(&state.client, &state.phabricator, &ids).await {
        Ok(upstream) => relay(upstream, &[]),
        Err(e) => {
            tracing::error!(error = %e, "Phabricator upstream error");
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}

/// Fetch a single change from Gerrit and relay it inline.
async fn gerrit_handler(
    State(state): State<AppState>,
    Query(params): Query<GerritParams>,
) -> Response<Body> {
    let selector = match ChangeSelector::from_params(params.id.as_deref(), params.change_id.as_deref())
    {
        Some(selector) => selector,
        None => {
            tracing::warn!("Rejecting /gerrit request without id or changeId");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Error parsing id or changeId")
                .into_response();
        }
    };

    tracing::debug!(selector = ?selector, "Forwarding change fetch");

    match gerrit::fetch_change(&state.client, &state.gerrit, &selector).await {
        // Gerrit marks change payloads as downloads; drop the header so
        // they render inline.
        Ok(upstream) => relay(upstream, &[header::CONTENT_DISPOSITION]),
        Err(e) => {
            tracing::error!(error = %e, "Gerrit upstream error");
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}

/// Fallback for unknown paths.
async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Split the pipe-delimited `ids` parameter, treating absent or empty
/// input as unusable.
fn parse_ids(raw: Option<&str>) -> Option<Vec<String>> {
    match raw {
        Some(raw) if !raw.is_empty() => Some(raw.split('|').map(str::to_string).collect()),
        _ => None,
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ids_ordered() {
        assert_eq!(
            parse_ids(Some("A|B|C")),
            Some(vec!["A".to_string(), "B".to_string(), "C".to_string()])
        );
    }

    #[test]
    fn test_parse_ids_absent_or_empty() {
        assert_eq!(parse_ids(None), None);
        assert_eq!(parse_ids(Some("")), None);
    }

    #[test]
    fn test_parse_ids_keeps_empty_segments() {
        // "1|" is usable input; the trailing empty segment is forwarded
        // as-is and left for the upstream to reject.
        assert_eq!(
            parse_ids(Some("1|")),
            Some(vec!["1".to_string(), String::new()])
        );
    }

    #[test]
    fn test_parse_ids_single() {
        assert_eq!(parse_ids(Some("42")), Some(vec!["42".to_string()]));
    }
}
