//! Top-100 traded items leaderboard scraper

use crate::api::http::{HttpFetch, with_query};
use crate::config::BotConfig;
use crate::error::{BotError, Result};
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;

const ROW_SELECTOR: &str = "tr";
const ITEM_LINK_SELECTOR: &str = "td a.table-item-link";
const ITEM_NAME_SELECTOR: &str = "span";

pub struct LeaderboardClient {
    http: Arc<dyn HttpFetch>,
    url: String,
}

impl LeaderboardClient {
    pub fn new(http: Arc<dyn HttpFetch>, config: &BotConfig) -> Self {
        Self {
            http,
            url: config.leaderboard_url.clone(),
        }
    }

    /// Item names in leaderboard order.
    ///
    /// Any failure is logged and yields an empty list.
    pub async fn fetch_top_items(&self) -> Vec<String> {
        tracing::info!(url = %self.url, "Fetching top items");
        match self.try_fetch_top_items().await {
            Ok(items) => {
                tracing::info!(count = items.len(), "Found leaderboard items");
                items
            }
            Err(e) => {
                tracing::error!(url = %self.url, error = %e, "Failed to fetch top items");
                Vec::new()
            }
        }
    }

    /// Item names in leaderboard order, failures returned to the caller
    pub async fn try_fetch_top_items(&self) -> Result<Vec<String>> {
        let url = with_query(&self.url, &[])?;
        let body = self.http.get_text(&url).await?;
        parse_top_items(&body)
    }
}

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| BotError::ParseFailed(format!("invalid selector {css}: {e}")))
}

/// Whitespace-normalised text content of an element
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extract item names from the leaderboard table; rows without an item
/// link are skipped.
pub fn parse_top_items(html: &str) -> Result<Vec<String>> {
    let rows = selector(ROW_SELECTOR)?;
    let link = selector(ITEM_LINK_SELECTOR)?;
    let name = selector(ITEM_NAME_SELECTOR)?;

    let document = Html::parse_document(html);
    let items = document
        .select(&rows)
        .filter_map(|row| {
            let anchor = row.select(&link).next()?;
            let text = anchor
                .select(&name)
                .map(element_text)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            (!text.is_empty()).then_some(text)
        })
        .collect::<Vec<_>>();

    for item in &items {
        tracing::debug!(item = %item, "Found item");
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::http::MockHttpFetch;

    const PAGE: &str = r#"
        <html><body><table>
          <tr><th>Item</th><th>Price</th></tr>
          <tr>
            <td><a class="table-item-link" href="/rune_axe"><img src="x.png"><span>Rune axe</span></a></td>
            <td>7,000</td>
          </tr>
          <tr><td><a href="/ad">Sponsored</a></td></tr>
          <tr>
            <td><a class="table-item-link" href="/yew"><span>
              Yew   logs
            </span></a></td>
          </tr>
          <tr><td><a class="table-item-link" href="/empty"></a></td></tr>
        </table></body></html>
    "#;

    #[test]
    fn test_parse_top_items() {
        let items = parse_top_items(PAGE).unwrap();
        assert_eq!(items, vec!["Rune axe".to_string(), "Yew logs".to_string()]);
    }

    #[test]
    fn test_parse_without_table() {
        assert!(parse_top_items("<p>maintenance</p>").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_yields_empty_list() {
        let mut mock = MockHttpFetch::new();
        mock.expect_get_text()
            .returning(|_| Err(crate::error::BotError::FetchFailed("offline".to_string())));

        let client = LeaderboardClient::new(Arc::new(mock), &BotConfig::default());
        assert!(client.fetch_top_items().await.is_empty());
    }

    #[tokio::test]
    async fn test_try_fetch_reports_failure() {
        let mut mock = MockHttpFetch::new();
        mock.expect_get_text()
            .returning(|_| Err(crate::error::BotError::FetchFailed("offline".to_string())));

        let client = LeaderboardClient::new(Arc::new(mock), &BotConfig::default());
        assert!(client.try_fetch_top_items().await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_top_items() {
        let mut mock = MockHttpFetch::new();
        mock.expect_get_text()
            .withf(|url| url.query() == Some("list=1"))
            .returning(|_| Ok(PAGE.to_string()));

        let client = LeaderboardClient::new(Arc::new(mock), &BotConfig::default());
        assert_eq!(client.fetch_top_items().await.len(), 2);
    }
}
