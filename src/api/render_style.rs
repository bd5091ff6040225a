use serde::{Deserialize, Serialize};

use crate::core::CandleDirection;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Colors and stroke sizes used by the candle and axis frame builders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub background_color: Color,
    pub bullish_color: Color,
    pub bearish_color: Color,
    pub wick_color: Color,
    pub wick_width_px: f64,
    /// Height of flat (open == close) bodies; other bodies keep their exact extent.
    pub flat_body_height_px: f64,
    pub axis_color: Color,
    pub axis_line_width_px: f64,
    pub label_color: Color,
    pub label_font_size_px: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background_color: Color::WHITE,
            bullish_color: Color::GREEN,
            bearish_color: Color::RED,
            wick_color: Color::BLACK,
            wick_width_px: 1.0,
            flat_body_height_px: 1.0,
            axis_color: Color::BLACK,
            axis_line_width_px: 1.0,
            label_color: Color::BLACK,
            label_font_size_px: 10.0,
        }
    }
}

impl RenderStyle {
    #[must_use]
    pub fn body_color(self, direction: CandleDirection) -> Color {
        match direction {
            CandleDirection::Bullish => self.bullish_color,
            CandleDirection::Bearish => self.bearish_color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        for color in [
            self.background_color,
            self.bullish_color,
            self.bearish_color,
            self.wick_color,
            self.axis_color,
            self.label_color,
        ] {
            color.validate()?;
        }
        for (name, value) in [
            ("wick width", self.wick_width_px),
            ("axis line width", self.axis_line_width_px),
            ("label font size", self.label_font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if !self.flat_body_height_px.is_finite() || self.flat_body_height_px < 0.0 {
            return Err(ChartError::InvalidData(
                "flat body height must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}
