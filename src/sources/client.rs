use crate::config::{Config, DEFAULT_REDIRECT_LIMIT};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Failure fetching or decoding one JSON collection.
///
/// Either class is recovered at the per-source granularity: the failing
/// source contributes an empty record set and the other sources are
/// unaffected.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
    #[error("invalid JSON payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// HTTP fetcher for the site's JSON collections.
#[derive(Debug, Clone)]
pub struct SourceClient {
    client: reqwest::Client,
    base_url: String,
}

impl SourceClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_REDIRECT_LIMIT))
            .timeout(Duration::from_millis(config.http.timeout_ms))
            .build()?;
        Ok(Self {
            client,
            base_url: config.sources.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch one collection and decode it as a JSON array of `T`.
    ///
    /// Static hosts sometimes serve these files with a UTF-8 BOM or a
    /// leading HTML comment banner; both are stripped before parsing.
    pub async fn fetch_entries<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Vec<T>, SourceError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!("Fetching {url}");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status));
        }

        let body = response.text().await?;
        let entries = serde_json::from_str(strip_preamble(&body))?;
        Ok(entries)
    }
}

/// Strip a UTF-8 byte-order mark and any leading HTML comments.
fn strip_preamble(body: &str) -> &str {
    let mut rest = body.strip_prefix('\u{feff}').unwrap_or(body).trim_start();
    while let Some(after_open) = rest.strip_prefix("<!--") {
        match after_open.find("-->") {
            Some(end) => rest = after_open[end + 3..].trim_start(),
            // Unterminated comment; let the JSON parser report it.
            None => break,
        }
    }
    rest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bom() {
        assert_eq!(strip_preamble("\u{feff}[1,2]"), "[1,2]");
    }

    #[test]
    fn strips_leading_html_comments() {
        let body = "<!-- generated --> <!-- do not edit -->\n[{\"a\":1}]";
        assert_eq!(strip_preamble(body), "[{\"a\":1}]");
    }

    #[test]
    fn strips_bom_then_comment() {
        assert_eq!(strip_preamble("\u{feff} <!-- x --> []"), "[]");
    }

    #[test]
    fn plain_body_is_untouched() {
        assert_eq!(strip_preamble("[]"), "[]");
    }

    #[test]
    fn unterminated_comment_left_for_parser() {
        assert_eq!(strip_preamble("<!-- oops ["), "<!-- oops [");
    }
}
