use rand::seq::SliceRandom;
use reqwest::{header, Client, ClientBuilder, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::config::Config;
use crate::models::PageContent;

/// Terminal fetch outcomes. None of these is retried; each is reported to
/// the caller as absence of data, distinct from a successful fetch whose
/// page simply contains nothing extractable.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid product URL: {0}")]
    InvalidUrl(String),
    #[error("request timed out after {0} seconds")]
    Timeout(u64),
    #[error("HTTP error {0}")]
    Status(StatusCode),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Syntactic URL validation: http/https scheme plus a host (domain,
/// localhost, IPv4, or bracketed IPv6), optional port and path.
pub fn validate_url(raw: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(raw.trim()).map_err(|_| FetchError::InvalidUrl(raw.to_string()))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(FetchError::InvalidUrl(raw.to_string()));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(FetchError::InvalidUrl(raw.to_string()));
    }

    Ok(parsed)
}

pub fn create_client(config: &Config) -> anyhow::Result<Client> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.request_timeout_seconds))
        .pool_max_idle_per_host(6)
        .build()?;

    Ok(client)
}

/// Issue a single GET with a randomized User-Agent. One request, no retries;
/// the client-level timeout bounds the whole call.
pub async fn fetch_page(
    client: &Client,
    config: &Config,
    url: &str,
) -> Result<PageContent, FetchError> {
    let parsed = validate_url(url)?;

    let mut request = client.get(parsed.as_str());
    if let Some(ua) = config.user_agents.choose(&mut rand::thread_rng()) {
        debug!("Using User-Agent: {}", ua);
        request = request.header(header::USER_AGENT, ua.as_str());
    }

    let response = request
        .send()
        .await
        .map_err(|e| classify(e, config.request_timeout_seconds))?;

    let status = response.status();
    if !status.is_success() {
        warn!("HTTP error {} for {}", status, url);
        return Err(FetchError::Status(status));
    }

    let html = response
        .text()
        .await
        .map_err(|e| classify(e, config.request_timeout_seconds))?;

    Ok(PageContent {
        url: parsed.to_string(),
        html,
    })
}

fn classify(error: reqwest::Error, timeout_seconds: u64) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout(timeout_seconds)
    } else {
        FetchError::Transport(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https_urls() {
        assert!(validate_url("http://example.com").is_ok());
        assert!(validate_url("https://shop.example.com/products/item?x=1").is_ok());
        assert!(validate_url("http://localhost:8080/page").is_ok());
        assert!(validate_url("http://127.0.0.1/page").is_ok());
        assert!(validate_url("http://[::1]:3000/page").is_ok());
    }

    #[test]
    fn rejects_non_http_schemes_and_garbage() {
        assert!(matches!(
            validate_url("ftp://example.com"),
            Err(FetchError::InvalidUrl(_))
        ));
        assert!(matches!(
            validate_url("not a url"),
            Err(FetchError::InvalidUrl(_))
        ));
        assert!(matches!(
            validate_url("example.com/no-scheme"),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        assert!(validate_url("  https://example.com  ").is_ok());
    }
}
