//! Phabricator issue-search upstream call.
//!
//! Submits a `maniphest.search` request for a list of task ids to the
//! conduit API, authenticated with the server-held token. The response is
//! returned unconsumed so the caller can relay it as a stream.

use reqwest::Client;

use crate::config::PhabricatorConfig;
use crate::upstream::UpstreamError;

/// POST a search for the given task ids to the conduit endpoint.
///
/// Ids are forwarded in order as the `constraints.ids` filter. The token is
/// a process-wide secret injected at startup; it goes to the upstream on
/// every call and never to the client.
pub async fn search_tasks(
    client: &Client,
    config: &PhabricatorConfig,
    ids: &[String],
) -> Result<reqwest::Response, UpstreamError> {
    let form = search_form(config.api_token.as_deref(), ids);
    let response = client.post(&config.search_url).form(&form).send().await?;
    Ok(response)
}

/// Build the form-encoded pairs for a conduit search request.
///
/// Conduit accepts qs-style bracket keys for nested parameters, so a search
/// for tasks A, B becomes:
///
/// ```text
/// api.token=<token>&constraints[ids][0]=A&constraints[ids][1]=B
/// ```
///
/// When no token is configured the pair is omitted entirely and the
/// upstream rejects the call.
pub fn search_form(token: Option<&str>, ids: &[String]) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(ids.len() + 1);
    if let Some(token) = token {
        pairs.push(("api.token".to_string(), token.to_string()));
    }
    for (i, id) in ids.iter().enumerate() {
        pairs.push((format!("constraints[ids][{}]", i), id.clone()));
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_form_preserves_id_order() {
        let form = search_form(Some("secret"), &ids(&["12", "7", "99"]));
        assert_eq!(
            form,
            vec![
                ("api.token".to_string(), "secret".to_string()),
                ("constraints[ids][0]".to_string(), "12".to_string()),
                ("constraints[ids][1]".to_string(), "7".to_string()),
                ("constraints[ids][2]".to_string(), "99".to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_token_omitted() {
        let form = search_form(None, &ids(&["1"]));
        assert_eq!(
            form,
            vec![("constraints[ids][0]".to_string(), "1".to_string())]
        );
    }

    #[test]
    fn test_single_id() {
        let form = search_form(Some("t"), &ids(&["42"]));
        assert_eq!(form.len(), 2);
        assert_eq!(form[1].0, "constraints[ids][0]");
    }
}
