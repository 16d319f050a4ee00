//! Flip engine - combines market data with the price indicators

use crate::api::{GrandExchangeClient, LeaderboardClient};
use crate::config::BotConfig;
use crate::error::{BotError, Result};
use futures::stream::{self, StreamExt};

use super::result::{AnalysisResult, FlipPick, TradeAnalysis};

/// Runs the buy strategy for single items and leaderboard scans
pub struct FlipEngine {
    market: GrandExchangeClient,
    leaderboard: LeaderboardClient,
    sma_period: usize,
    buy_threshold: f64,
    concurrency: usize,
}

impl FlipEngine {
    pub fn new(market: GrandExchangeClient, leaderboard: LeaderboardClient, config: &BotConfig) -> Self {
        Self {
            market,
            leaderboard,
            sma_period: config.sma_period,
            buy_threshold: config.buy_threshold,
            concurrency: config.flip_concurrency.max(1),
        }
    }

    pub fn sma_period(&self) -> usize {
        self.sma_period
    }

    /// Analyse `item_name` against its trailing price history
    pub async fn analyze_item(&self, item_name: &str) -> Result<TradeAnalysis> {
        tracing::info!(item = item_name, "Executing buy strategy");

        let (latest, history) = tokio::join!(
            self.market.get_latest_price(item_name),
            self.market.get_historical_prices(item_name)
        );
        let latest = latest?;
        let history = history?;

        if history.is_empty() {
            return Err(BotError::InsufficientData(format!(
                "no price history for {item_name}"
            )));
        }

        let result =
            AnalysisResult::compute(&history, latest.price, self.sma_period, self.buy_threshold)?;
        tracing::info!(
            item = item_name,
            sma = result.sma,
            volatility = result.volatility,
            margin = result.margin,
            buy = result.should_buy,
            "Calculated indicators"
        );

        Ok(TradeAnalysis::new(
            latest.name.clone(),
            latest,
            result,
            self.sma_period,
            history.len(),
        ))
    }

    /// Scan the leaderboard and pick the best flip.
    ///
    /// A leaderboard that cannot be fetched is an error. Candidates that fail
    /// to fetch or lack history are skipped; `Ok(None)` means nothing could
    /// be analysed.
    pub async fn find_best_flip(&self) -> Result<Option<FlipPick>> {
        let items = self.leaderboard.try_fetch_top_items().await?;
        tracing::info!(count = items.len(), "Found leaderboard items");
        if items.is_empty() {
            tracing::warn!("No items found in leaderboard");
            return Ok(None);
        }

        let candidates: Vec<TradeAnalysis> = stream::iter(items)
            .map(|item| async move {
                match self.analyze_item(&item).await {
                    Ok(analysis) => Some(analysis),
                    Err(e) => {
                        tracing::warn!(item = %item, error = %e, "Skipping flip candidate");
                        None
                    }
                }
            })
            .buffered(self.concurrency)
            .filter_map(|candidate| async move { candidate })
            .collect()
            .await;

        let pick = FlipPick::choose(candidates);
        match &pick {
            Some(FlipPick::BestBuy(a)) => {
                tracing::info!(item = %a.item, margin = a.result.margin, "Best buy candidate");
            }
            Some(FlipPick::BestOverall(a)) => {
                tracing::info!(item = %a.item, margin = a.result.margin, "Best overall candidate");
            }
            None => tracing::warn!("No suitable item found for flipping"),
        }
        Ok(pick)
    }
}
