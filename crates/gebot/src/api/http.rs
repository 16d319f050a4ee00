//! HTTP transport shared by all upstream clients

use crate::config::BotConfig;
use crate::error::{BotError, Result};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// Fetches a URL and returns the response body as text.
///
/// Every upstream client goes through this seam so that tests can stub
/// responses without a network.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpFetch: Send + Sync {
    /// GET `url`; non-success statuses become [`BotError::Status`]
    async fn get_text(&self, url: &Url) -> Result<String>;
}

/// reqwest-backed fetcher with a bounded per-request timeout
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    /// Create a fetcher honouring the configured timeout and user agent
    pub fn new(config: &BotConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetcher {
    async fn get_text(&self, url: &Url) -> Result<String> {
        tracing::debug!(%url, "GET");

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            if e.is_timeout() {
                BotError::FetchFailed(format!("request to {url} timed out"))
            } else {
                BotError::NetworkError(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(BotError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        tracing::debug!(%url, bytes = body.len(), "Received response");
        Ok(body)
    }
}

/// Build `base` with the given query parameters appended
pub fn with_query(base: &str, params: &[(&str, &str)]) -> Result<Url> {
    if params.is_empty() {
        return Ok(Url::parse(base)?);
    }
    Ok(Url::parse_with_params(base, params)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_query_encodes_parameters() {
        let url = with_query(
            "https://api.example.org/latest",
            &[("name", "Rune axe"), ("lang", "en")],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.org/latest?name=Rune+axe&lang=en"
        );
    }

    #[test]
    fn test_with_query_keeps_existing_parameters() {
        let url = with_query("https://example.org/top100?list=1", &[]).unwrap();
        assert_eq!(url.as_str(), "https://example.org/top100?list=1");
    }

    #[test]
    fn test_fetcher_creation() {
        assert!(ReqwestFetcher::new(&BotConfig::default()).is_ok());
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_fetch_real_page() {
        let fetcher = ReqwestFetcher::new(&BotConfig::default()).unwrap();
        let url = Url::parse("https://runescape.wiki/w/Rune_axe").unwrap();
        let body = fetcher.get_text(&url).await.unwrap();
        assert!(body.contains("Rune axe"));
    }
}
