//! Price indicators used by the flip analysis
//!
//! Pure functions over integer price series. An empty series has no mean,
//! so anything that needs one reports [`BotError::InsufficientData`].

use crate::error::{BotError, Result};
use statrs::statistics::Statistics;
use ta::{Next, indicators::SimpleMovingAverage};

/// Volatility below which a buy may be recommended
pub const DEFAULT_BUY_THRESHOLD: f64 = 0.05;

fn as_floats(prices: &[i64]) -> Result<Vec<f64>> {
    if prices.is_empty() {
        return Err(BotError::InsufficientData(
            "price history is empty".to_string(),
        ));
    }
    Ok(prices.iter().map(|&p| p as f64).collect())
}

/// Mean of the last `period` prices, or of all prices when fewer exist
pub fn simple_moving_average(prices: &[i64], period: usize) -> Result<f64> {
    if period == 0 {
        return Err(BotError::InsufficientData(
            "moving average period must be positive".to_string(),
        ));
    }
    let values = as_floats(prices)?;
    let window = period.min(values.len());

    let mut indicator = SimpleMovingAverage::new(window)
        .map_err(|e| BotError::InsufficientData(e.to_string()))?;
    let sma = values
        .iter()
        .fold(0.0, |_, &price| indicator.next(price));

    tracing::debug!(period, points = window, sma, "Calculated SMA");
    Ok(sma)
}

/// Coefficient of variation: population standard deviation over the mean.
///
/// Returns 0 when the mean is exactly 0.
#[allow(clippy::float_cmp)]
pub fn volatility(prices: &[i64]) -> Result<f64> {
    let values = as_floats(prices)?;
    let avg = values.iter().mean();
    if avg == 0.0 {
        return Ok(0.0);
    }

    let volatility = values.iter().population_std_dev() / avg;
    tracing::debug!(volatility, "Calculated volatility");
    Ok(volatility)
}

/// Distance of the latest price below the trend
pub fn margin(sma: f64, latest_price: f64) -> f64 {
    sma - latest_price
}

/// Buy only when price is under the trend, the margin is positive and the
/// series is calm.
pub fn should_buy(
    latest_price: f64,
    sma: f64,
    margin: f64,
    volatility: f64,
    threshold: f64,
) -> bool {
    latest_price < sma && margin > 0.0 && volatility < threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_sma_uses_last_period_elements() {
        let prices = [10, 20, 30, 40, 50];
        assert!(close(simple_moving_average(&prices, 2).unwrap(), 45.0));
        assert!(close(simple_moving_average(&prices, 5).unwrap(), 30.0));
    }

    #[test]
    fn test_sma_window_rolls_over_long_series() {
        let prices: Vec<i64> = (1..=40).collect();
        // last 30 values are 11..=40
        assert!(close(simple_moving_average(&prices, 30).unwrap(), 25.5));
    }

    #[test]
    fn test_sma_short_series_uses_all_elements() {
        let prices = [10, 20, 30];
        assert!(close(simple_moving_average(&prices, 30).unwrap(), 20.0));
    }

    #[test]
    fn test_sma_rejects_empty_and_zero_period() {
        assert!(matches!(
            simple_moving_average(&[], 30),
            Err(BotError::InsufficientData(_))
        ));
        assert!(matches!(
            simple_moving_average(&[1, 2], 0),
            Err(BotError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_volatility_of_flat_series_is_zero() {
        assert!(close(volatility(&[250, 250, 250]).unwrap(), 0.0));
    }

    #[test]
    fn test_volatility_zero_mean_guard() {
        assert!(close(volatility(&[-5, 5]).unwrap(), 0.0));
        assert!(close(volatility(&[0, 0]).unwrap(), 0.0));
    }

    #[test]
    fn test_volatility_coefficient_of_variation() {
        // mean 100, population std dev 10
        assert!(close(volatility(&[90, 110]).unwrap(), 0.1));
    }

    #[test]
    fn test_volatility_rejects_empty() {
        assert!(volatility(&[]).is_err());
    }

    #[test]
    fn test_margin_is_exact_difference() {
        assert!(close(margin(100.0, 90.0), 10.0));
        assert!(close(margin(90.5, 100.25), -9.75));
    }

    #[test]
    fn test_should_buy_requires_all_conditions() {
        let threshold = DEFAULT_BUY_THRESHOLD;
        assert!(should_buy(90.0, 100.0, 10.0, 0.03, threshold));
        // too volatile
        assert!(!should_buy(90.0, 100.0, 10.0, 0.10, threshold));
        // price above trend
        assert!(!should_buy(110.0, 100.0, 10.0, 0.03, threshold));
        // non-positive margin
        assert!(!should_buy(90.0, 100.0, 0.0, 0.03, threshold));
        // volatility exactly at threshold
        assert!(!should_buy(90.0, 100.0, 10.0, threshold, threshold));
    }
}
