use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::core::ViewportState;

/// Half-open `[start_index, end_index)` slice of the record sequence drawn
/// for one viewport state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleWindow {
    pub start_index: usize,
    pub end_index: usize,
}

impl VisibleWindow {
    pub const EMPTY: Self = Self {
        start_index: 0,
        end_index: 0,
    };

    /// Derives the window for a sequence of `len` records.
    ///
    /// `start = floor(scroll * (len - 1))`, `end = floor((scroll + zoom) * (len - 1))`.
    /// `end` is clamped to `len`. A zero-length sequence or a non-positive zoom
    /// produces an empty window.
    #[must_use]
    pub fn compute(len: usize, viewport: ViewportState) -> Self {
        let zoom = viewport.zoom_factor();
        if len == 0 || !zoom.is_finite() || zoom <= 0.0 {
            return Self::EMPTY;
        }

        let last = (len - 1) as f64;
        let scroll = viewport.scroll_position();
        let start_index = floor_to_index(scroll * last);
        let end_index = floor_to_index((scroll + zoom) * last).min(len);
        if end_index <= start_index {
            return Self {
                start_index,
                end_index: start_index,
            };
        }

        Self {
            start_index,
            end_index,
        }
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.end_index <= self.start_index
    }

    #[must_use]
    pub fn indices(self) -> Range<usize> {
        self.start_index..self.end_index.max(self.start_index)
    }
}

fn floor_to_index(value: f64) -> usize {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    // `as` saturates at usize::MAX for huge values.
    value.floor() as usize
}
