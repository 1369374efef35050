//! Gerrit patch-retrieval upstream call.
//!
//! Fetches a single change from the code-review server, addressed either by
//! a direct change id or by a change query. Gerrit marks these payloads as
//! downloads; the relay layer strips `content-disposition` so they render
//! inline instead.

use reqwest::Client;

use crate::config::GerritConfig;
use crate::upstream::UpstreamError;

/// How a change is addressed on the upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeSelector {
    /// Direct resource path: appended to the base URL as-is.
    Id(String),
    /// Change query: percent-encoded into `?q=<query>`.
    Query(String),
}

impl ChangeSelector {
    /// Pick a selector from the `id` / `changeId` query parameters.
    ///
    /// A non-empty `id` takes precedence over `changeId`; empty strings
    /// count as absent. Returns `None` when neither is usable.
    pub fn from_params(id: Option<&str>, change_id: Option<&str>) -> Option<Self> {
        match id {
            Some(id) if !id.is_empty() => Some(Self::Id(id.to_string())),
            _ => match change_id {
                Some(q) if !q.is_empty() => Some(Self::Query(q.to_string())),
                _ => None,
            },
        }
    }
}

/// GET a change resource from the upstream.
///
/// The response is returned unconsumed; header stripping and streaming
/// happen at the relay layer.
pub async fn fetch_change(
    client: &Client,
    config: &GerritConfig,
    selector: &ChangeSelector,
) -> Result<reqwest::Response, UpstreamError> {
    let url = change_url(&config.base_url, selector);
    let response = client.get(url).send().await?;
    Ok(response)
}

/// Construct the upstream URL for a change.
pub fn change_url(base_url: &str, selector: &ChangeSelector) -> String {
    match selector {
        ChangeSelector::Id(id) => format!("{}{}", base_url, id),
        ChangeSelector::Query(q) => format!("{}?q={}", base_url, urlencoding::encode(q)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://gerrit.wikimedia.org/r/changes/";

    #[test]
    fn test_id_appended_raw() {
        let url = change_url(BASE, &ChangeSelector::Id("123".to_string()));
        assert_eq!(url, "https://gerrit.wikimedia.org/r/changes/123");
    }

    #[test]
    fn test_query_percent_encoded() {
        let url = change_url(BASE, &ChangeSelector::Query("foo bar".to_string()));
        assert_eq!(url, "https://gerrit.wikimedia.org/r/changes/?q=foo%20bar");
    }

    #[test]
    fn test_query_encodes_reserved_chars() {
        let url = change_url(BASE, &ChangeSelector::Query("a/b&c".to_string()));
        assert_eq!(url, "https://gerrit.wikimedia.org/r/changes/?q=a%2Fb%26c");
    }

    #[test]
    fn test_id_takes_precedence() {
        let selector = ChangeSelector::from_params(Some("123"), Some("Iabc"));
        assert_eq!(selector, Some(ChangeSelector::Id("123".to_string())));
    }

    #[test]
    fn test_change_id_used_when_id_empty() {
        let selector = ChangeSelector::from_params(Some(""), Some("Iabc"));
        assert_eq!(selector, Some(ChangeSelector::Query("Iabc".to_string())));
    }

    #[test]
    fn test_neither_param_is_none() {
        assert_eq!(ChangeSelector::from_params(None, None), None);
        assert_eq!(ChangeSelector::from_params(Some(""), Some("")), None);
    }
}
