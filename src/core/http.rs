//! Shared HTTP helpers for the sheet, values API and bundle fetches.

use crate::utils::error::{PortfolioError, Result};
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub fn build_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder().user_agent(concat!("portfolio-sheets/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Passes successful responses through; anything else becomes
/// [`PortfolioError::StatusError`].
pub fn check_response(resp: reqwest::Response) -> Result<reqwest::Response> {
    if !resp.status().is_success() {
        return Err(PortfolioError::StatusError {
            url: redact(resp.url()),
            status: resp.status().as_u16(),
        });
    }
    Ok(resp)
}

/// GETs `url` and returns its body, failing on a non-success status or a
/// blank body.
pub async fn fetch_text(client: &Client, url: &Url) -> Result<String> {
    tracing::debug!("GET {}", redact(url));
    let resp = check_response(client.get(url.clone()).send().await?)?;
    let body = resp.text().await?;
    tracing::debug!("Received {} bytes from {}", body.len(), redact(url));

    if body.trim().is_empty() {
        return Err(PortfolioError::EmptyBody { url: redact(url) });
    }
    Ok(body)
}

/// URL string safe for logs: the `key` query parameter is masked.
pub fn redact(url: &Url) -> String {
    if !url.query_pairs().any(|(k, _)| k == "key") {
        return url.to_string();
    }

    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" { "***".into() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}

/// Appends path segments to `base`, tolerating a trailing slash on it.
pub fn join_segments(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| PortfolioError::ConfigError {
            message: format!("{} cannot be used as a base URL", base),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_masks_key() {
        let url = Url::parse("https://sheets.example.com/v4/values/A1?key=secret").unwrap();
        let redacted = redact(&url);
        assert!(!redacted.contains("secret"));
        assert!(redacted.contains("key=***") || redacted.contains("key=%2A%2A%2A"));
    }

    #[test]
    fn test_redact_leaves_other_urls() {
        let url = Url::parse("https://docs.example.com/d/x/gviz/tq?tqx=out:csv&sheet=Skills").unwrap();
        assert_eq!(redact(&url), url.to_string());
    }

    #[test]
    fn test_join_segments_handles_trailing_slash() {
        let a = join_segments("https://example.com/spreadsheets/d", &["abc", "export"]).unwrap();
        let b = join_segments("https://example.com/spreadsheets/d/", &["abc", "export"]).unwrap();
        assert_eq!(a.as_str(), "https://example.com/spreadsheets/d/abc/export");
        assert_eq!(a, b);

        let root = join_segments("http://127.0.0.1:9000", &["abc"]).unwrap();
        assert_eq!(root.as_str(), "http://127.0.0.1:9000/abc");
    }

    #[test]
    fn test_join_segments_rejects_non_base() {
        assert!(join_segments("mailto:me@example.com", &["x"]).is_err());
    }
}
