//! Analysis result types

use crate::api::PriceRecord;
use crate::engine::indicators;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Indicator values for one item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub sma: f64,
    pub volatility: f64,
    pub margin: f64,
    pub should_buy: bool,
}

impl AnalysisResult {
    /// Run every indicator over `prices` against `latest_price`
    pub fn compute(prices: &[i64], latest_price: i64, period: usize, threshold: f64) -> Result<Self> {
        let latest = latest_price as f64;
        let sma = indicators::simple_moving_average(prices, period)?;
        let volatility = indicators::volatility(prices)?;
        let margin = indicators::margin(sma, latest);
        let should_buy = indicators::should_buy(latest, sma, margin, volatility, threshold);

        Ok(Self {
            sma,
            volatility,
            margin,
            should_buy,
        })
    }
}

/// Full buy-strategy analysis of a single item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeAnalysis {
    pub item: String,
    pub latest: PriceRecord,
    pub result: AnalysisResult,
    pub sma_period: usize,
    pub data_points: usize,
    pub timestamp: DateTime<Utc>,
}

impl TradeAnalysis {
    pub fn new(
        item: impl Into<String>,
        latest: PriceRecord,
        result: AnalysisResult,
        sma_period: usize,
        data_points: usize,
    ) -> Self {
        Self {
            item: item.into(),
            latest,
            result,
            sma_period,
            data_points,
            timestamp: Utc::now(),
        }
    }

    /// Human readable recommendation
    pub fn suggestion(&self) -> String {
        if self.result.should_buy {
            format!(
                "Consider buying {}. Price is below the {}-day SMA and volatility is low.",
                self.item, self.sma_period
            )
        } else {
            format!("Not a good time to buy {}.", self.item)
        }
    }
}

/// Candidate chosen by a leaderboard scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FlipPick {
    /// Passed every buy condition, largest margin among those that did
    BestBuy(TradeAnalysis),
    /// Nothing passed; largest margin overall
    BestOverall(TradeAnalysis),
}

impl FlipPick {
    pub fn analysis(&self) -> &TradeAnalysis {
        match self {
            Self::BestBuy(a) | Self::BestOverall(a) => a,
        }
    }

    /// Pick from analysed candidates; `None` when there are none
    pub fn choose(candidates: Vec<TradeAnalysis>) -> Option<Self> {
        let by_margin =
            |a: &TradeAnalysis, b: &TradeAnalysis| a.result.margin.total_cmp(&b.result.margin);

        let best_buy = candidates
            .iter()
            .filter(|c| c.result.should_buy)
            .max_by(|a, b| by_margin(*a, *b))
            .cloned();
        if let Some(best) = best_buy {
            return Some(Self::BestBuy(best));
        }

        candidates.into_iter().max_by(by_margin).map(Self::BestOverall)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(price: i64) -> PriceRecord {
        PriceRecord {
            name: "Rune axe".to_string(),
            item_id: "1359".to_string(),
            timestamp: "2024-06-01".to_string(),
            price,
            volume: 10,
        }
    }

    fn analysis(item: &str, margin: f64, should_buy: bool) -> TradeAnalysis {
        TradeAnalysis::new(
            item,
            record(100),
            AnalysisResult {
                sma: 100.0 + margin,
                volatility: 0.01,
                margin,
                should_buy,
            },
            30,
            90,
        )
    }

    #[test]
    fn test_compute_buy_signal() {
        // steady series averaging 100, latest dips to 98
        let prices = vec![100, 101, 99, 100, 100];
        let result = AnalysisResult::compute(&prices, 98, 30, 0.05).unwrap();
        assert!((result.sma - 100.0).abs() < 1e-9);
        assert!((result.margin - 2.0).abs() < 1e-9);
        assert!(result.volatility < 0.05);
        assert!(result.should_buy);
    }

    #[test]
    fn test_compute_empty_history_fails() {
        assert!(AnalysisResult::compute(&[], 98, 30, 0.05).is_err());
    }

    #[test]
    fn test_suggestion_text() {
        let buy = analysis("Rune axe", 5.0, true);
        assert_eq!(
            buy.suggestion(),
            "Consider buying Rune axe. Price is below the 30-day SMA and volatility is low."
        );
        let hold = analysis("Rune axe", -5.0, false);
        assert_eq!(hold.suggestion(), "Not a good time to buy Rune axe.");
    }

    #[test]
    fn test_choose_prefers_buy_candidates() {
        let pick = FlipPick::choose(vec![
            analysis("A", 50.0, false),
            analysis("B", 5.0, true),
            analysis("C", 8.0, true),
        ])
        .unwrap();
        assert!(matches!(&pick, FlipPick::BestBuy(a) if a.item == "C"));
    }

    #[test]
    fn test_choose_falls_back_to_largest_margin() {
        let pick = FlipPick::choose(vec![
            analysis("A", -3.0, false),
            analysis("B", 12.0, false),
        ])
        .unwrap();
        assert!(matches!(&pick, FlipPick::BestOverall(a) if a.item == "B"));
        assert!(FlipPick::choose(Vec::new()).is_none());
    }
}
