use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{CandleDirection, OhlcvRecord, PriceScale, ViewportState, VisibleWindow};
use crate::error::{ChartError, ChartResult};

/// Nominal (zoom = 1) candle sizing plus the vertical mapping inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleLayout {
    pub candle_width_px: f64,
    pub candle_spacing_px: f64,
    pub chart_height_px: f64,
    pub price_scale: PriceScale,
}

impl CandleLayout {
    pub fn validate(self) -> ChartResult<()> {
        if !self.candle_width_px.is_finite() || self.candle_width_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "candle width must be finite and > 0".to_owned(),
            ));
        }
        if !self.candle_spacing_px.is_finite() || self.candle_spacing_px < 0.0 {
            return Err(ChartError::InvalidData(
                "candle spacing must be finite and >= 0".to_owned(),
            ));
        }
        if !self.chart_height_px.is_finite() || self.chart_height_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "chart height must be finite and > 0".to_owned(),
            ));
        }
        self.price_scale.validate()
    }

    /// Body width after zoom.
    #[must_use]
    pub fn scaled_candle_width(self, zoom_factor: f64) -> f64 {
        self.candle_width_px * zoom_factor
    }

    /// Horizontal distance between two consecutive candle origins after zoom.
    #[must_use]
    pub fn candle_pitch(self, zoom_factor: f64) -> f64 {
        (self.candle_width_px + self.candle_spacing_px) * zoom_factor
    }

    /// Left edge of the candle at `index` relative to the window start.
    #[must_use]
    pub fn index_to_pixel_x(self, index: f64, start_index: usize, zoom_factor: f64) -> f64 {
        (index - start_index as f64) * self.candle_pitch(zoom_factor)
    }

    #[must_use]
    pub fn price_to_pixel_y(self, price: f64) -> f64 {
        self.price_scale
            .price_to_pixel(price, self.chart_height_px)
    }
}

/// Pixel geometry of one visible candle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleGeometry {
    pub index: usize,
    pub x: f64,
    pub body_width: f64,
    pub open_y: f64,
    pub close_y: f64,
    pub body_top: f64,
    pub body_bottom: f64,
    pub wick_x: f64,
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub direction: CandleDirection,
}

impl CandleGeometry {
    #[must_use]
    pub fn body_height(&self) -> f64 {
        self.body_bottom - self.body_top
    }
}

/// Projects every record inside `window` into pixel geometry.
///
/// Pure and side-effect free so it can back both rendering and tests.
pub fn project_visible_candles(
    records: &[OhlcvRecord],
    window: VisibleWindow,
    viewport: ViewportState,
    layout: CandleLayout,
) -> ChartResult<Vec<CandleGeometry>> {
    layout.validate()?;
    if window.is_empty() {
        return Ok(Vec::new());
    }

    let visible = records.get(window.indices()).ok_or_else(|| {
        ChartError::InvalidData(format!(
            "visible window {}..{} exceeds {} records",
            window.start_index,
            window.end_index,
            records.len()
        ))
    })?;
    let zoom = viewport.zoom_factor();

    #[cfg(feature = "parallel-projection")]
    {
        Ok(visible
            .par_iter()
            .enumerate()
            .map(|(offset, record)| {
                project_single_candle(*record, window.start_index + offset, window, zoom, layout)
            })
            .collect())
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        Ok(visible
            .iter()
            .enumerate()
            .map(|(offset, record)| {
                project_single_candle(*record, window.start_index + offset, window, zoom, layout)
            })
            .collect())
    }
}

fn project_single_candle(
    record: OhlcvRecord,
    index: usize,
    window: VisibleWindow,
    zoom: f64,
    layout: CandleLayout,
) -> CandleGeometry {
    let body_width = layout.scaled_candle_width(zoom);
    let x = layout.index_to_pixel_x(index as f64, window.start_index, zoom);
    let open_y = layout.price_to_pixel_y(record.open);
    let close_y = layout.price_to_pixel_y(record.close);

    CandleGeometry {
        index,
        x,
        body_width,
        open_y,
        close_y,
        body_top: open_y.min(close_y),
        body_bottom: open_y.max(close_y),
        wick_x: x + body_width / 2.0,
        wick_top: layout.price_to_pixel_y(record.high),
        wick_bottom: layout.price_to_pixel_y(record.low),
        direction: record.direction(),
    }
}
