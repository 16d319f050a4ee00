//! Grand Exchange price history API client
//!
//! The upstream keys every response object by the exact item name, while
//! users type names in arbitrary case. Each response gets a [`KeyIndex`]
//! that folds keys once so lookups stay case-insensitive.

use crate::api::http::{HttpFetch, with_query};
use crate::config::BotConfig;
use crate::error::{BotError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Latest traded price for one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Item name as spelled by the upstream
    pub name: String,
    /// Upstream item identifier
    pub item_id: String,
    pub timestamp: String,
    pub price: i64,
    pub volume: i64,
}

#[derive(Debug, Deserialize)]
struct LatestEntry {
    id: Value,
    timestamp: Value,
    price: i64,
    #[serde(default)]
    volume: Option<i64>,
}

/// Case-folding index over the keys of one JSON object
#[derive(Debug)]
pub struct KeyIndex<'a> {
    folded: HashMap<String, &'a str>,
}

impl<'a> KeyIndex<'a> {
    /// Index every key of `object`; the first spelling wins on collisions
    pub fn build(object: &'a Map<String, Value>) -> Self {
        let mut folded = HashMap::with_capacity(object.len());
        for key in object.keys() {
            folded.entry(key.to_lowercase()).or_insert(key.as_str());
        }
        Self { folded }
    }

    /// Original key matching `name` ignoring case
    pub fn lookup(&self, name: &str) -> Option<&'a str> {
        self.folded.get(&name.trim().to_lowercase()).copied()
    }
}

/// Client for the latest-price and trailing-history endpoints
#[derive(Clone)]
pub struct GrandExchangeClient {
    http: Arc<dyn HttpFetch>,
    latest_url: String,
    history_url: String,
    language: String,
}

impl GrandExchangeClient {
    pub fn new(http: Arc<dyn HttpFetch>, config: &BotConfig) -> Self {
        Self {
            http,
            latest_url: config.latest_price_url.clone(),
            history_url: config.history_url.clone(),
            language: config.language.clone(),
        }
    }

    /// Latest price for `item_name`.
    ///
    /// Returns [`BotError::NotFound`] when the response has no matching key,
    /// which callers can tell apart from transport failures.
    pub async fn get_latest_price(&self, item_name: &str) -> Result<PriceRecord> {
        tracing::info!(item = item_name, "Fetching latest price");
        let url = with_query(
            &self.latest_url,
            &[("name", item_name), ("lang", self.language.as_str())],
        )?;
        let body = self.http.get_text(&url).await?;

        parse_latest(&body, item_name)?.ok_or_else(|| {
            tracing::warn!(item = item_name, "No matching key in latest price response");
            BotError::NotFound(item_name.to_string())
        })
    }

    /// Prices over the trailing window, oldest first.
    ///
    /// An unmatched item yields an empty sequence rather than an error.
    pub async fn get_historical_prices(&self, item_name: &str) -> Result<Vec<i64>> {
        tracing::info!(item = item_name, "Fetching historical prices");
        let url = with_query(
            &self.history_url,
            &[("name", item_name), ("lang", self.language.as_str())],
        )?;
        let body = self.http.get_text(&url).await?;

        let prices = parse_history(&body, item_name)?;
        tracing::debug!(item = item_name, points = prices.len(), "Parsed price history");
        Ok(prices)
    }
}

fn parse_object(body: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(body)? {
        Value::Object(map) => Ok(map),
        other => Err(BotError::ParseFailed(format!(
            "expected a JSON object, got {}",
            json_type(&other)
        ))),
    }
}

/// Decode the latest-price entry for `item_name`, if present
pub fn parse_latest(body: &str, item_name: &str) -> Result<Option<PriceRecord>> {
    let object = parse_object(body)?;
    let index = KeyIndex::build(&object);

    let Some(key) = index.lookup(item_name) else {
        return Ok(None);
    };

    // Error payloads carry scalar fields such as `success` and `error`
    if !object[key].is_object() {
        tracing::warn!(key, kind = json_type(&object[key]), "Ignoring non-item entry");
        return Ok(None);
    }

    let entry: LatestEntry = serde_json::from_value(object[key].clone())
        .map_err(|e| BotError::ParseFailed(format!("latest price for {key}: {e}")))?;

    Ok(Some(PriceRecord {
        name: key.to_string(),
        item_id: scalar_to_string(&entry.id),
        timestamp: scalar_to_string(&entry.timestamp),
        price: entry.price,
        volume: entry.volume.unwrap_or(0),
    }))
}

/// Extract the price series for `item_name`; empty when unmatched
pub fn parse_history(body: &str, item_name: &str) -> Result<Vec<i64>> {
    let object = parse_object(body)?;
    let index = KeyIndex::build(&object);

    let Some(key) = index.lookup(item_name) else {
        return Ok(Vec::new());
    };

    let points = object[key].as_array().ok_or_else(|| {
        BotError::ParseFailed(format!("history for {key} is not an array"))
    })?;

    let prices = points
        .iter()
        .filter_map(|point| {
            let price = point.get("price")?;
            price
                .as_i64()
                .or_else(|| price.as_f64().map(|p| p.round() as i64))
        })
        .collect::<Vec<_>>();

    if prices.len() < points.len() {
        tracing::warn!(
            item = key,
            skipped = points.len() - prices.len(),
            "Skipped history points without a price"
        );
    }

    Ok(prices)
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
