use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Zoom and scroll position used for one redraw.
///
/// The value is immutable; viewport notifications produce a new state that
/// replaces the previous one before the next render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    zoom_factor: f64,
    scroll_position: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom_factor: 1.0,
            scroll_position: 0.0,
        }
    }
}

impl ViewportState {
    /// Creates a state from an explicit zoom factor and scroll fraction.
    ///
    /// `zoom_factor` must be finite and `>= 0`; zero is accepted and yields an
    /// empty visible window. `scroll_position` is clamped into `[0, 1]`.
    pub fn new(zoom_factor: f64, scroll_position: f64) -> ChartResult<Self> {
        if !zoom_factor.is_finite() || zoom_factor < 0.0 {
            return Err(ChartError::InvalidData(
                "zoom factor must be finite and >= 0".to_owned(),
            ));
        }
        if !scroll_position.is_finite() {
            return Err(ChartError::InvalidData(
                "scroll position must be finite".to_owned(),
            ));
        }

        Ok(Self {
            zoom_factor,
            scroll_position: scroll_position.clamp(0.0, 1.0),
        })
    }

    /// Derives the state from a viewport-bounds or scroll notification.
    ///
    /// `zoom = viewport_width_px / nominal_chart_width_px`, and the scroll
    /// fraction is the horizontal scroll control value taken as-is.
    pub fn from_viewport_change(
        viewport_width_px: f64,
        nominal_chart_width_px: f64,
        horizontal_scroll_value: f64,
    ) -> ChartResult<Self> {
        if !nominal_chart_width_px.is_finite() || nominal_chart_width_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "nominal chart width must be finite and > 0".to_owned(),
            ));
        }
        if !viewport_width_px.is_finite() || viewport_width_px < 0.0 {
            return Err(ChartError::InvalidData(
                "viewport width must be finite and >= 0".to_owned(),
            ));
        }

        Self::new(
            viewport_width_px / nominal_chart_width_px,
            horizontal_scroll_value,
        )
    }

    #[must_use]
    pub fn zoom_factor(self) -> f64 {
        self.zoom_factor
    }

    #[must_use]
    pub fn scroll_position(self) -> f64 {
        self.scroll_position
    }

    /// Same zoom, new scroll fraction. Rejects non-finite input like [`Self::new`].
    pub fn with_scroll_position(self, scroll_position: f64) -> ChartResult<Self> {
        Self::new(self.zoom_factor, scroll_position)
    }
}
