use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{CandleLayout, PriceScale, Viewport};
use crate::error::{ChartError, ChartResult};

use super::RenderStyle;

/// Chart geometry, price domain and style.
///
/// Serializable so hosts can keep chart setup in a JSON file. Missing fields
/// fall back to the defaults below.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Nominal drawing width; zoom is measured against it.
    pub chart_width_px: f64,
    /// Height of the price area. The axis gutter is drawn below it.
    pub chart_height_px: f64,
    pub candle_width_px: f64,
    pub candle_spacing_px: f64,
    pub price_scale: PriceScale,
    /// Fit `price_scale` to the loaded records instead of using it as given.
    pub auto_fit_price_scale: bool,
    /// Number of intervals between axis ticks; `tick_count + 1` marks are drawn.
    pub tick_count: usize,
    pub axis_gutter_px: f64,
    pub tick_half_length_px: f64,
    pub label_offset_x_px: f64,
    pub label_offset_y_px: f64,
    pub style: RenderStyle,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            chart_width_px: 1000.0,
            chart_height_px: 300.0,
            candle_width_px: 5.0,
            candle_spacing_px: 2.0,
            price_scale: PriceScale::default(),
            auto_fit_price_scale: false,
            tick_count: 10,
            axis_gutter_px: 30.0,
            tick_half_length_px: 5.0,
            label_offset_x_px: -10.0,
            label_offset_y_px: 20.0,
            style: RenderStyle::default(),
        }
    }
}

impl ChartConfig {
    #[must_use]
    pub fn with_price_scale(mut self, price_scale: PriceScale) -> Self {
        self.price_scale = price_scale;
        self
    }

    #[must_use]
    pub fn with_chart_size(mut self, width_px: f64, height_px: f64) -> Self {
        self.chart_width_px = width_px;
        self.chart_height_px = height_px;
        self
    }

    #[must_use]
    pub fn with_render_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_auto_fit_price_scale(mut self, enabled: bool) -> Self {
        self.auto_fit_price_scale = enabled;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (name, value) in [
            ("chart width", self.chart_width_px),
            ("chart height", self.chart_height_px),
        ] {
            if !value.is_finite() || value <= 0.0 || value > f64::from(u32::MAX) {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and in (0, u32::MAX]"
                )));
            }
        }
        for (name, value) in [
            ("axis gutter", self.axis_gutter_px),
            ("tick half length", self.tick_half_length_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !self.label_offset_x_px.is_finite() || !self.label_offset_y_px.is_finite() {
            return Err(ChartError::InvalidData(
                "label offsets must be finite".to_owned(),
            ));
        }
        if self.tick_count == 0 {
            return Err(ChartError::InvalidData(
                "tick count must be > 0".to_owned(),
            ));
        }
        self.candle_layout().validate()?;
        self.style.validate()
    }

    #[must_use]
    pub fn candle_layout(&self) -> CandleLayout {
        CandleLayout {
            candle_width_px: self.candle_width_px,
            candle_spacing_px: self.candle_spacing_px,
            chart_height_px: self.chart_height_px,
            price_scale: self.price_scale,
        }
    }

    /// Pixel size of the drawing surface: the chart area plus the axis gutter.
    #[must_use]
    pub fn surface_viewport(&self) -> Viewport {
        Viewport::new(
            to_surface_px(self.chart_width_px),
            to_surface_px(self.chart_height_px + self.axis_gutter_px),
        )
    }

    pub fn from_json_str(raw: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|err| ChartError::InvalidData(format!("invalid chart config json: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> ChartResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ChartError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| ChartError::InvalidData(format!("failed to serialize config: {err}")))
    }
}

fn to_surface_px(value: f64) -> u32 {
    // Callers validate finiteness and range first.
    value.ceil().clamp(1.0, f64::from(u32::MAX)) as u32
}
