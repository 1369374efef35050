//! Response relay and transformation.
//!
//! # Responsibilities
//! - Turn an upstream `reqwest::Response` into a client response
//! - Stream the body without buffering it in memory
//! - Strip hop-by-hop headers plus any per-route strip list
//!
//! # Design Decisions
//! - The body is wired through `Body::from_stream`; per-request memory is
//!   bounded regardless of upstream payload size
//! - Dropping the client connection drops the stream, which aborts the
//!   in-flight upstream read (disconnect-to-abort propagation)
//! - Upstream status codes are relayed verbatim, untranslated

use axum::body::Body;
use axum::http::{HeaderMap, HeaderName, Response};

/// Relay an upstream response to the client as a live byte stream.
///
/// Headers named in `strip` are removed in addition to the standard
/// hop-by-hop set.
pub fn relay(upstream: reqwest::Response, strip: &[HeaderName]) -> Response<Body> {
    let status = upstream.status();
    let headers = filter_headers(upstream.headers(), strip);

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

/// Copy a header map, dropping hop-by-hop headers and the strip list.
pub fn filter_headers(headers: &HeaderMap, strip: &[HeaderName]) -> HeaderMap {
    let mut filtered = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if is_hop_by_hop(name) || strip.contains(name) {
            continue;
        }
        // append, not insert: multi-valued headers (set-cookie) must
        // survive the copy intact
        filtered.append(name.clone(), value.clone());
    }
    filtered
}

/// Hop-by-hop headers per RFC 9110 §7.6.1; these describe the upstream
/// connection, not the payload, and must not be relayed.
fn is_hop_by_hop(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn test_hop_by_hop_stripped() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, "application/json".parse().unwrap());
        headers.insert(header::CONNECTION, "keep-alive".parse().unwrap());
        headers.insert(header::TRANSFER_ENCODING, "chunked".parse().unwrap());

        let filtered = filter_headers(&headers, &[]);
        assert_eq!(filtered.len(), 1);
        assert!(filtered.contains_key(header::CONTENT_TYPE));
    }

    #[test]
    fn test_strip_list_applied() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, "text/plain".parse().unwrap());
        headers.insert(
            header::CONTENT_DISPOSITION,
            "attachment; filename=patch".parse().unwrap(),
        );

        let filtered = filter_headers(&headers, &[header::CONTENT_DISPOSITION]);
        assert!(!filtered.contains_key(header::CONTENT_DISPOSITION));
        assert!(filtered.contains_key(header::CONTENT_TYPE));
    }

    #[test]
    fn test_multi_value_headers_survive() {
        let mut headers = HeaderMap::new();
        headers.append(header::SET_COOKIE, "a=1".parse().unwrap());
        headers.append(header::SET_COOKIE, "b=2".parse().unwrap());

        let filtered = filter_headers(&headers, &[]);
        assert_eq!(filtered.get_all(header::SET_COOKIE).iter().count(), 2);
    }

    #[test]
    fn test_payload_headers_preserved() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_LENGTH, "42".parse().unwrap());
        headers.insert(header::ETAG, "\"abc\"".parse().unwrap());

        let filtered = filter_headers(&headers, &[]);
        assert_eq!(filtered.len(), 2);
    }
}
