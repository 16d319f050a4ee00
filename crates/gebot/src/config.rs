//! Configuration for the bot and its upstream clients

use crate::error::{BotError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Latest-price endpoint of the price history API
pub const DEFAULT_LATEST_URL: &str = "https://api.weirdgloop.org/exchange/history/rs/latest";
/// 90-day trailing price history endpoint
pub const DEFAULT_HISTORY_URL: &str = "https://api.weirdgloop.org/exchange/history/rs/last90d";
/// Top 100 most traded items
pub const DEFAULT_LEADERBOARD_URL: &str = "https://secure.runescape.com/m=itemdb_rs/top100?list=1";
/// Plain-text hiscores endpoint
pub const DEFAULT_HISCORES_URL: &str = "https://secure.runescape.com/m=hiscore/index_lite.ws";
/// Human-facing hiscore comparison page
pub const DEFAULT_HISCORE_COMPARE_URL: &str = "https://secure.runescape.com/m=hiscore/compare";
/// Wiki article base
pub const DEFAULT_WIKI_URL: &str = "https://runescape.wiki/w/";

/// Configuration for bot operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Latest price endpoint
    pub latest_price_url: String,

    /// Trailing-window history endpoint
    pub history_url: String,

    /// Leaderboard HTML page
    pub leaderboard_url: String,

    /// Hiscores text endpoint
    pub hiscores_url: String,

    /// Hiscore comparison page linked by `/me`
    pub hiscore_compare_url: String,

    /// Wiki article base URL
    pub wiki_url: String,

    /// Language parameter sent to the price API
    pub language: String,

    /// Request timeout duration
    pub request_timeout: Duration,

    /// User agent sent upstream
    pub user_agent: String,

    /// Window for the simple moving average
    pub sma_period: usize,

    /// Volatility below which a buy is considered
    pub buy_threshold: f64,

    /// Text shown by the wiki on pages that do not exist
    pub wiki_missing_marker: String,

    /// Selector for the wiki page title
    pub wiki_title_selector: String,

    /// Leaderboard candidates analysed concurrently by `/flip`
    pub flip_concurrency: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            latest_price_url: DEFAULT_LATEST_URL.to_string(),
            history_url: DEFAULT_HISTORY_URL.to_string(),
            leaderboard_url: DEFAULT_LEADERBOARD_URL.to_string(),
            hiscores_url: DEFAULT_HISCORES_URL.to_string(),
            hiscore_compare_url: DEFAULT_HISCORE_COMPARE_URL.to_string(),
            wiki_url: DEFAULT_WIKI_URL.to_string(),
            language: "en".to_string(),
            request_timeout: Duration::from_secs(15),
            user_agent: concat!("gebot/", env!("CARGO_PKG_VERSION")).to_string(),
            sma_period: 30,
            buy_threshold: 0.05,
            wiki_missing_marker: "Nothing interesting happens.".to_string(),
            wiki_title_selector: "span.mw-page-title-main".to_string(),
            flip_concurrency: 4,
        }
    }
}

impl BotConfig {
    /// Create a new configuration builder
    pub fn builder() -> BotConfigBuilder {
        BotConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let endpoints = [
            ("latest_price_url", &self.latest_price_url),
            ("history_url", &self.history_url),
            ("leaderboard_url", &self.leaderboard_url),
            ("hiscores_url", &self.hiscores_url),
            ("hiscore_compare_url", &self.hiscore_compare_url),
            ("wiki_url", &self.wiki_url),
        ];
        for (name, value) in endpoints {
            url::Url::parse(value)
                .map_err(|e| BotError::ConfigError(format!("{name} is not a valid URL: {e}")))?;
        }

        if self.sma_period == 0 {
            return Err(BotError::ConfigError(
                "sma_period must be greater than 0".to_string(),
            ));
        }

        if !(self.buy_threshold.is_finite() && self.buy_threshold > 0.0) {
            return Err(BotError::ConfigError(
                "buy_threshold must be a positive number".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(BotError::ConfigError(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if self.flip_concurrency == 0 {
            return Err(BotError::ConfigError(
                "flip_concurrency must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for BotConfig
#[derive(Debug, Default)]
pub struct BotConfigBuilder {
    latest_price_url: Option<String>,
    history_url: Option<String>,
    leaderboard_url: Option<String>,
    hiscores_url: Option<String>,
    hiscore_compare_url: Option<String>,
    wiki_url: Option<String>,
    language: Option<String>,
    request_timeout: Option<Duration>,
    user_agent: Option<String>,
    sma_period: Option<usize>,
    buy_threshold: Option<f64>,
    flip_concurrency: Option<usize>,
}

impl BotConfigBuilder {
    /// Set the latest price endpoint
    pub fn latest_price_url(mut self, url: impl Into<String>) -> Self {
        self.latest_price_url = Some(url.into());
        self
    }

    /// Set the history endpoint
    pub fn history_url(mut self, url: impl Into<String>) -> Self {
        self.history_url = Some(url.into());
        self
    }

    /// Set the leaderboard page
    pub fn leaderboard_url(mut self, url: impl Into<String>) -> Self {
        self.leaderboard_url = Some(url.into());
        self
    }

    /// Set the hiscores endpoint
    pub fn hiscores_url(mut self, url: impl Into<String>) -> Self {
        self.hiscores_url = Some(url.into());
        self
    }

    /// Set the hiscore compare page
    pub fn hiscore_compare_url(mut self, url: impl Into<String>) -> Self {
        self.hiscore_compare_url = Some(url.into());
        self
    }

    /// Set the wiki base URL
    pub fn wiki_url(mut self, url: impl Into<String>) -> Self {
        self.wiki_url = Some(url.into());
        self
    }

    /// Set the price API language
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set the SMA window
    pub fn sma_period(mut self, period: usize) -> Self {
        self.sma_period = Some(period);
        self
    }

    /// Set the volatility threshold for buy signals
    pub fn buy_threshold(mut self, threshold: f64) -> Self {
        self.buy_threshold = Some(threshold);
        self
    }

    /// Set how many flip candidates are analysed at once
    pub fn flip_concurrency(mut self, concurrency: usize) -> Self {
        self.flip_concurrency = Some(concurrency);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<BotConfig> {
        let defaults = BotConfig::default();

        let config = BotConfig {
            latest_price_url: self.latest_price_url.unwrap_or(defaults.latest_price_url),
            history_url: self.history_url.unwrap_or(defaults.history_url),
            leaderboard_url: self.leaderboard_url.unwrap_or(defaults.leaderboard_url),
            hiscores_url: self.hiscores_url.unwrap_or(defaults.hiscores_url),
            hiscore_compare_url: self
                .hiscore_compare_url
                .unwrap_or(defaults.hiscore_compare_url),
            wiki_url: self.wiki_url.unwrap_or(defaults.wiki_url),
            language: self.language.unwrap_or(defaults.language),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            sma_period: self.sma_period.unwrap_or(defaults.sma_period),
            buy_threshold: self.buy_threshold.unwrap_or(defaults.buy_threshold),
            wiki_missing_marker: defaults.wiki_missing_marker,
            wiki_title_selector: defaults.wiki_title_selector,
            flip_concurrency: self.flip_concurrency.unwrap_or(defaults.flip_concurrency),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Where the bot token is looked up, in priority order after an explicit
/// argument: a local file, then an environment variable.
#[derive(Debug, Clone)]
pub struct TokenSource {
    pub file: PathBuf,
    pub env_var: String,
}

impl Default for TokenSource {
    fn default() -> Self {
        Self {
            file: PathBuf::from("token.txt"),
            env_var: "DISCORD_BOT_TOKEN".to_string(),
        }
    }
}

impl TokenSource {
    pub fn new(file: impl Into<PathBuf>, env_var: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            env_var: env_var.into(),
        }
    }

    /// Resolve the token from the process environment
    pub fn resolve(&self, explicit: Option<&str>) -> Result<String> {
        self.resolve_with(explicit, |key| std::env::var(key).ok())
    }

    /// Resolve the token using `lookup` for environment access
    pub fn resolve_with<F>(&self, explicit: Option<&str>, lookup: F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
            tracing::debug!("Using bot token from command line");
            return Ok(token.to_string());
        }

        if let Some(token) = read_token_file(&self.file)? {
            tracing::debug!(path = %self.file.display(), "Using bot token from file");
            return Ok(token);
        }

        lookup(&self.env_var)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                BotError::ConfigError(format!(
                    "bot token is missing: pass --token, create {} or set {}",
                    self.file.display(),
                    self.env_var
                ))
            })
    }
}

fn read_token_file(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    let token = content.trim();
    Ok((!token.is_empty()).then(|| token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    fn token_file(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("token.txt");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = BotConfig::default();
        assert_eq!(config.sma_period, 30);
        assert!((config.buy_threshold - 0.05).abs() < f64::EPSILON);
        assert_eq!(config.language, "en");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = BotConfig::builder()
            .sma_period(14)
            .request_timeout(Duration::from_secs(5))
            .latest_price_url("http://localhost:8080/latest")
            .build()
            .unwrap();

        assert_eq!(config.sma_period, 14);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.latest_price_url, "http://localhost:8080/latest");
        assert_eq!(config.history_url, DEFAULT_HISTORY_URL);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(BotConfig::builder().sma_period(0).build().is_err());
        assert!(BotConfig::builder().buy_threshold(-1.0).build().is_err());
        assert!(BotConfig::builder().flip_concurrency(0).build().is_err());
        assert!(BotConfig::builder().wiki_url("not a url").build().is_err());
        assert!(
            BotConfig::builder()
                .request_timeout(Duration::ZERO)
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_token_prefers_explicit_argument() {
        let dir = tempdir().unwrap();
        let path = token_file(&dir, "from-file");
        let source = TokenSource::new(&path, "GEBOT_TEST_TOKEN");
        let token = source
            .resolve_with(Some("from-arg"), |_| Some("from-env".to_string()))
            .unwrap();
        assert_eq!(token, "from-arg");
    }

    #[test]
    fn test_token_falls_back_to_file_then_env() {
        let dir = tempdir().unwrap();
        let path = token_file(&dir, "  from-file\n");
        let source = TokenSource::new(&path, "GEBOT_TEST_TOKEN");
        let token = source
            .resolve_with(Some("   "), |_| Some("from-env".to_string()))
            .unwrap();
        assert_eq!(token, "from-file");
        fs::remove_file(&path).unwrap();

        let token = source
            .resolve_with(None, |key| {
                (key == "GEBOT_TEST_TOKEN").then(|| "from-env".to_string())
            })
            .unwrap();
        assert_eq!(token, "from-env");
    }

    #[test]
    fn test_token_empty_file_is_skipped() {
        let dir = tempdir().unwrap();
        let path = token_file(&dir, "\n");
        let source = TokenSource::new(&path, "GEBOT_TEST_TOKEN");
        let token = source
            .resolve_with(None, |_| Some("from-env".to_string()))
            .unwrap();
        assert_eq!(token, "from-env");
    }

    #[test]
    fn test_token_missing_everywhere() {
        let dir = tempdir().unwrap();
        let source = TokenSource::new(dir.path().join("token.txt"), "GEBOT_TEST_TOKEN");
        let err = source.resolve_with(None, |_| None).unwrap_err();
        assert!(matches!(err, BotError::ConfigError(_)));
    }
}
