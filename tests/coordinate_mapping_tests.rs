use approx::assert_relative_eq;
use candle_chart::ChartConfig;
use candle_chart::core::{
    CandleDirection, OhlcvRecord, PriceScale, ViewportState, VisibleWindow, project_visible_candles,
};

fn record(open: f64, high: f64, low: f64, close: f64) -> OhlcvRecord {
    OhlcvRecord::new(open, high, low, close, 1_000).expect("valid record")
}

#[test]
fn window_for_hundred_records_at_tenth_zoom() {
    let viewport = ViewportState::new(0.1, 0.0).expect("viewport");
    let window = VisibleWindow::compute(100, viewport);
    assert_eq!(window.start_index, 0);
    assert_eq!(window.end_index, 9);
}

#[test]
fn scrolling_shifts_the_window() {
    let viewport = ViewportState::new(0.25, 0.5).expect("viewport");
    let window = VisibleWindow::compute(101, viewport);
    assert_eq!(window.start_index, 50);
    assert_eq!(window.end_index, 75);
}

#[test]
fn price_domain_bounds_map_to_chart_edges() {
    let layout = ChartConfig::default().candle_layout();
    assert_relative_eq!(layout.price_to_pixel_y(1700.0), 300.0);
    assert_relative_eq!(layout.price_to_pixel_y(2100.0), 0.0);
    assert_relative_eq!(layout.price_to_pixel_y(1800.0), 225.0);
}

#[test]
fn prices_outside_the_domain_are_not_clamped() {
    let config = ChartConfig::default();
    let layout = config.candle_layout();
    let records = vec![record(100.0, 110.0, 90.0, 105.0); 2];
    let viewport = ViewportState::new(1.0, 0.0).expect("viewport");
    let window = VisibleWindow::compute(records.len(), viewport);
    let candles = project_visible_candles(&records, window, viewport, layout).expect("project");

    assert_eq!(candles.len(), 1);
    let candle = candles[0];
    for y in [candle.open_y, candle.close_y, candle.wick_top, candle.wick_bottom] {
        assert!(y > config.chart_height_px, "y={y} should fall below the chart");
    }
    assert_relative_eq!(candle.open_y, 300.0 * (1.0 - (100.0 - 1700.0) / 400.0));
}

#[test]
fn candle_x_uses_zoomed_width_plus_spacing() {
    let config = ChartConfig::default();
    let records = vec![record(1800.0, 1810.0, 1790.0, 1805.0); 50];
    let viewport = ViewportState::new(0.5, 0.2).expect("viewport");
    let window = VisibleWindow::compute(records.len(), viewport);
    assert_eq!(window.start_index, 9);

    let candles =
        project_visible_candles(&records, window, viewport, config.candle_layout()).expect("project");
    for candle in &candles {
        let expected_x = (candle.index - window.start_index) as f64 * (5.0 * 0.5 + 2.0 * 0.5);
        assert_relative_eq!(candle.x, expected_x);
        assert_relative_eq!(candle.body_width, 2.5);
        assert_relative_eq!(candle.wick_x, candle.x + 1.25);
    }
}

#[test]
fn direction_boundary_is_bearish_on_equal_open_close() {
    let layout = ChartConfig::default()
        .with_price_scale(PriceScale::new(0.0, 200.0).expect("scale"))
        .candle_layout();
    let records = vec![
        record(100.0, 110.0, 90.0, 100.0001),
        record(100.0, 110.0, 90.0, 100.0),
        record(100.0, 110.0, 90.0, 95.0),
        record(100.0, 110.0, 90.0, 105.0),
    ];
    let viewport = ViewportState::default();
    let window = VisibleWindow::compute(records.len(), viewport);
    let directions: Vec<CandleDirection> = project_visible_candles(&records, window, viewport, layout)
        .expect("project")
        .into_iter()
        .map(|candle| candle.direction)
        .collect();
    assert_eq!(
        directions,
        [
            CandleDirection::Bullish,
            CandleDirection::Bearish,
            CandleDirection::Bearish,
        ]
    );
}

#[test]
fn zoom_beyond_one_never_indexes_past_the_sequence() {
    let records = vec![record(1800.0, 1810.0, 1790.0, 1805.0); 10];
    let viewport = ViewportState::new(3.0, 0.8).expect("viewport");
    let window = VisibleWindow::compute(records.len(), viewport);
    assert_eq!(window.end_index, 10);
    let candles = project_visible_candles(
        &records,
        window,
        viewport,
        ChartConfig::default().candle_layout(),
    )
    .expect("project");
    assert_eq!(candles.len(), 10 - window.start_index);
}
