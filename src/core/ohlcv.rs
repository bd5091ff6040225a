use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// One OHLCV sample. The index inside its record sequence is its time step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcvRecord {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// Fill classification of a candle body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandleDirection {
    Bullish,
    Bearish,
}

impl OhlcvRecord {
    /// Builds a validated record.
    ///
    /// Invariants:
    /// - all prices are finite
    /// - `high >= max(open, close)` and `min(open, close) >= low`
    /// - `low >= 0` and `volume >= 0`
    pub fn new(open: f64, high: f64, low: f64, close: f64, volume: i64) -> ChartResult<Self> {
        if !open.is_finite() || !high.is_finite() || !low.is_finite() || !close.is_finite() {
            return Err(ChartError::InvalidData(
                "ohlcv prices must be finite".to_owned(),
            ));
        }
        if high < open.max(close) {
            return Err(ChartError::InvalidData(format!(
                "high {high} is below max(open, close) {}",
                open.max(close)
            )));
        }
        if low > open.min(close) {
            return Err(ChartError::InvalidData(format!(
                "low {low} is above min(open, close) {}",
                open.min(close)
            )));
        }
        if low < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "low {low} must be >= 0"
            )));
        }
        if volume < 0 {
            return Err(ChartError::InvalidData(format!(
                "volume {volume} must be >= 0"
            )));
        }

        Ok(Self {
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// `true` only when close is strictly above open. A flat candle is bearish.
    #[must_use]
    pub fn is_bullish(self) -> bool {
        self.close > self.open
    }

    #[must_use]
    pub fn direction(self) -> CandleDirection {
        if self.is_bullish() {
            CandleDirection::Bullish
        } else {
            CandleDirection::Bearish
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CandleDirection, OhlcvRecord};

    #[test]
    fn flat_candle_is_bearish() {
        let record = OhlcvRecord::new(100.0, 110.0, 90.0, 100.0, 10).expect("valid record");
        assert!(!record.is_bullish());
        assert_eq!(record.direction(), CandleDirection::Bearish);
    }

    #[test]
    fn rising_candle_is_bullish() {
        let record = OhlcvRecord::new(100.0, 110.0, 90.0, 105.0, 1000).expect("valid record");
        assert_eq!(record.direction(), CandleDirection::Bullish);
    }

    #[test]
    fn rejects_high_below_body() {
        assert!(OhlcvRecord::new(100.0, 104.0, 90.0, 105.0, 1).is_err());
    }

    #[test]
    fn rejects_low_above_body() {
        assert!(OhlcvRecord::new(100.0, 110.0, 101.0, 105.0, 1).is_err());
    }

    #[test]
    fn rejects_negative_low_and_volume() {
        assert!(OhlcvRecord::new(1.0, 2.0, -0.5, 1.5, 1).is_err());
        assert!(OhlcvRecord::new(1.0, 2.0, 0.5, 1.5, -1).is_err());
    }

    #[test]
    fn rejects_non_finite_prices() {
        assert!(OhlcvRecord::new(f64::NAN, 2.0, 0.5, 1.5, 1).is_err());
        assert!(OhlcvRecord::new(1.0, f64::INFINITY, 0.5, 1.5, 1).is_err());
    }
}
