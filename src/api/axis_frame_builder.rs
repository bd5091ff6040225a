use crate::core::{ViewportState, VisibleWindow};
use crate::render::{LinePrimitive, RenderFrame, TextPrimitive};

use super::ChartConfig;

/// Appends the index axis: a baseline at the bottom of the chart area spanning
/// the zoomed chart width, plus evenly spaced ticks labelled with record indices.
///
/// Ticks sit at the left edge of the candle slot for the labelled index, so
/// `tick_count` intervals cover the visible window exactly. An empty window
/// draws the baseline only.
pub(super) fn append_axis_primitives(
    frame: &mut RenderFrame,
    window: VisibleWindow,
    viewport: ViewportState,
    config: &ChartConfig,
) {
    let style = config.style;
    let zoom = viewport.zoom_factor();
    let baseline_y = config.chart_height_px;
    frame.push_line(LinePrimitive::new(
        0.0,
        baseline_y,
        config.chart_width_px * zoom.max(0.0),
        baseline_y,
        style.axis_line_width_px,
        style.axis_color,
    ));

    for tick in axis_ticks(window, config.tick_count) {
        let x = config
            .candle_layout()
            .index_to_pixel_x(tick.index, window.start_index, zoom);
        frame.push_line(LinePrimitive::new(
            x,
            baseline_y - config.tick_half_length_px,
            x,
            baseline_y + config.tick_half_length_px,
            style.axis_line_width_px,
            style.axis_color,
        ));
        frame.push_text(TextPrimitive::new(
            tick.label,
            x + config.label_offset_x_px,
            baseline_y + config.label_offset_y_px,
            style.label_font_size_px,
            style.label_color,
        ));
    }
}

/// One axis tick: fractional record index and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub index: f64,
    pub label: String,
}

/// Evenly spaced ticks over `window`, `tick_count + 1` of them including both ends.
///
/// Returns nothing for an empty window, which keeps the spacing division safe.
#[must_use]
pub fn axis_ticks(window: VisibleWindow, tick_count: usize) -> Vec<AxisTick> {
    if window.is_empty() || tick_count == 0 {
        return Vec::new();
    }

    let spacing = window.len() as f64 / tick_count as f64;
    (0..=tick_count)
        .map(|step| {
            let index = window.start_index as f64 + step as f64 * spacing;
            AxisTick {
                index,
                label: format_index_label(index),
            }
        })
        .collect()
}

/// Labels truncate toward zero, so fractional ticks show the index they fall in.
fn format_index_label(index: f64) -> String {
    format!("{}", index.trunc() as i64)
}
