use serde::{Deserialize, Serialize};

use crate::core::OhlcvRecord;
use crate::error::{ChartError, ChartResult};

/// Smallest accepted `max_price - min_price`.
///
/// Narrower domains make `price_to_pixel` overflow to infinity for ordinary
/// prices, which no drawing surface can clip.
pub const MIN_PRICE_SPAN: f64 = 1e-9;

/// Fixed vertical price domain mapped onto the chart height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceScale {
    pub min_price: f64,
    pub max_price: f64,
}

impl Default for PriceScale {
    /// Domain tuned for XAUUSD in early 2023.
    fn default() -> Self {
        Self {
            min_price: 1700.0,
            max_price: 2100.0,
        }
    }
}

impl PriceScale {
    pub fn new(min_price: f64, max_price: f64) -> ChartResult<Self> {
        let scale = Self {
            min_price,
            max_price,
        };
        scale.validate()?;
        Ok(scale)
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.min_price.is_finite() || !self.max_price.is_finite() {
            return Err(ChartError::InvalidData(
                "price scale bounds must be finite".to_owned(),
            ));
        }
        if self.min_price >= self.max_price {
            return Err(ChartError::InvalidData(format!(
                "price scale min {} must be < max {}",
                self.min_price, self.max_price
            )));
        }
        let span = self.span();
        if !span.is_finite() || span < MIN_PRICE_SPAN {
            return Err(ChartError::InvalidData(format!(
                "price scale span {span} must be finite and >= {MIN_PRICE_SPAN}"
            )));
        }
        Ok(())
    }

    /// Smallest domain covering every low and high in `records`.
    ///
    /// Returns `None` for an empty slice. A flat (or narrower than
    /// [`MIN_PRICE_SPAN`]) series is widened by one price unit on each side.
    #[must_use]
    pub fn fit_records(records: &[OhlcvRecord]) -> Option<Self> {
        let (min_price, max_price) = records.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(min, max), record| (min.min(record.low), max.max(record.high)),
        );
        if !min_price.is_finite() || !max_price.is_finite() {
            return None;
        }
        if max_price - min_price < MIN_PRICE_SPAN {
            return Some(Self {
                min_price: min_price - 1.0,
                max_price: max_price + 1.0,
            });
        }
        Some(Self {
            min_price,
            max_price,
        })
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max_price - self.min_price
    }

    /// Maps a price to a y coordinate where `min_price` sits at `chart_height`
    /// and `max_price` at `0`.
    ///
    /// Prices outside the domain are not clamped: they land above `0` or below
    /// `chart_height` and get clipped by the drawing surface. The result stays
    /// finite as long as `|price - min_price| / span` fits in an `f64`, which
    /// [`MIN_PRICE_SPAN`] guarantees for any realistic price.
    #[must_use]
    pub fn price_to_pixel(self, price: f64, chart_height: f64) -> f64 {
        chart_height * (1.0 - (price - self.min_price) / self.span())
    }

    #[must_use]
    pub fn pixel_to_price(self, pixel: f64, chart_height: f64) -> f64 {
        self.min_price + (1.0 - pixel / chart_height) * self.span()
    }
}
