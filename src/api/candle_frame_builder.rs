use crate::core::{CandleGeometry, OhlcvRecord, ViewportState, VisibleWindow, project_visible_candles};
use crate::error::ChartResult;
use crate::render::{ClearPrimitive, LinePrimitive, RectPrimitive, RenderFrame};

use super::{ChartConfig, RenderStyle, axis_frame_builder::append_axis_primitives};

/// Builds the complete draw-call list for one redraw.
///
/// The frame always starts with a clear of the whole surface, then one body
/// rect and one wick line per visible record in index order, then the axis.
/// An empty record slice or an empty visible window yields only the clear and
/// the axis baseline.
pub fn build_chart_frame(
    records: &[OhlcvRecord],
    viewport: ViewportState,
    config: &ChartConfig,
) -> ChartResult<RenderFrame> {
    config.validate()?;

    let surface = config.surface_viewport();
    let mut frame = RenderFrame::new(surface);
    frame.push_clear(ClearPrimitive::new(
        0.0,
        0.0,
        f64::from(surface.width),
        f64::from(surface.height),
        config.style.background_color,
    ));

    let window = if records.is_empty() {
        VisibleWindow::EMPTY
    } else {
        VisibleWindow::compute(records.len(), viewport)
    };

    if !window.is_empty() {
        let candles = project_visible_candles(records, window, viewport, config.candle_layout())?;
        for candle in &candles {
            append_candle_primitives(&mut frame, candle, config.style);
        }
    }

    append_axis_primitives(&mut frame, window, viewport, config);
    Ok(frame)
}

fn append_candle_primitives(frame: &mut RenderFrame, candle: &CandleGeometry, style: RenderStyle) {
    let (body_top, body_height) = resolve_body_extent(candle, style.flat_body_height_px);
    frame.push_rect(RectPrimitive::new(
        candle.x,
        body_top,
        candle.body_width,
        body_height,
        style.body_color(candle.direction),
    ));
    frame.push_line(LinePrimitive::new(
        candle.wick_x,
        candle.wick_top,
        candle.wick_x,
        candle.wick_bottom,
        style.wick_width_px,
        style.wick_color,
    ));
}

/// Bodies span exactly `[min(open_y, close_y), max(open_y, close_y)]`. Only a
/// zero-height (open == close) body is drawn as a `flat_height` bar centered
/// on its price.
fn resolve_body_extent(candle: &CandleGeometry, flat_height: f64) -> (f64, f64) {
    let height = candle.body_height();
    if height > 0.0 {
        return (candle.body_top, height);
    }
    (candle.body_top - flat_height / 2.0, flat_height)
}
