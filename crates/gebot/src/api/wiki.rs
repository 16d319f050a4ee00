//! Wiki page lookups

use crate::api::http::HttpFetch;
use crate::api::leaderboard::{element_text, selector};
use crate::config::BotConfig;
use crate::error::Result;
use scraper::Html;
use std::sync::Arc;
use url::Url;

/// Outcome of inspecting a single wiki page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiPage {
    pub url: Url,
    /// False when the page is the "missing page" placeholder or unreachable
    pub exists: bool,
    pub title: Option<String>,
}

pub struct WikiClient {
    http: Arc<dyn HttpFetch>,
    base_url: String,
    missing_marker: String,
    title_selector: String,
}

impl WikiClient {
    pub fn new(http: Arc<dyn HttpFetch>, config: &BotConfig) -> Self {
        Self {
            http,
            base_url: config.wiki_url.clone(),
            missing_marker: config.wiki_missing_marker.clone(),
            title_selector: config.wiki_title_selector.clone(),
        }
    }

    /// Article URL for `object`, spaces replaced by underscores
    pub fn article_url(&self, object: &str) -> Result<Url> {
        let slug = object
            .trim()
            .replace(' ', "_")
            .replace('?', "%3F")
            .replace('#', "%23");
        Ok(Url::parse(&format!("{}{}", self.base_url, slug))?)
    }

    /// True when `url` loads and its body text does not contain
    /// `must_not_contain`
    pub async fn validate_url(&self, url: &Url, must_not_contain: &str) -> bool {
        tracing::info!(%url, "Validating URL");
        let Some(html) = self.fetch_page(url).await else {
            return false;
        };
        let valid = inspect(&html, Some(must_not_contain), None).exists;
        if !valid {
            tracing::warn!(%url, marker = must_not_contain, "Page contains marker text");
        }
        valid
    }

    /// Text of the first element matching `css`, if the page loads
    pub async fn extract_title(&self, url: &Url, css: &str) -> Option<String> {
        let html = self.fetch_page(url).await?;
        let title = inspect(&html, None, Some(css)).title;
        match &title {
            Some(title) => tracing::info!(%url, title = %title, "Found page title"),
            None => tracing::warn!(%url, "Page title not found"),
        }
        title
    }

    /// [`validate_url`](Self::validate_url) and
    /// [`extract_title`](Self::extract_title) for the article of `object`,
    /// sharing one fetch
    pub async fn lookup(&self, object: &str) -> Result<WikiPage> {
        let url = self.article_url(object)?;
        tracing::info!(object, %url, "Running wiki lookup");

        let page = match self.fetch_page(&url).await {
            Some(html) => inspect(
                &html,
                Some(&self.missing_marker),
                Some(&self.title_selector),
            ),
            None => PageInspection::default(),
        };

        Ok(WikiPage {
            url,
            exists: page.exists,
            title: page.title,
        })
    }

    async fn fetch_page(&self, url: &Url) -> Option<String> {
        match self.http.get_text(url).await {
            Ok(html) => Some(html),
            Err(e) => {
                tracing::error!(%url, error = %e, "Failed to access URL");
                None
            }
        }
    }
}

#[derive(Debug, Default)]
struct PageInspection {
    exists: bool,
    title: Option<String>,
}

/// Parse `html` once; a page containing `missing_marker` does not exist and
/// has no title
fn inspect(html: &str, missing_marker: Option<&str>, title_css: Option<&str>) -> PageInspection {
    let document = Html::parse_document(html);

    let exists = missing_marker.is_none_or(|marker| !body_text(&document).contains(marker));
    let title = match title_css {
        Some(css) if exists => first_match_text(&document, css),
        _ => None,
    };

    PageInspection { exists, title }
}

/// Rendered text of `<body>`, whitespace collapsed
fn body_text(document: &Html) -> String {
    let Ok(body) = selector("body") else {
        return String::new();
    };
    document
        .select(&body)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

fn first_match_text(document: &Html, css: &str) -> Option<String> {
    let wanted = match selector(css) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Bad title selector");
            return None;
        }
    };
    document
        .select(&wanted)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())
}
