use candle_chart::api::{CandlestickChart, ChartConfig, build_chart_frame};
use candle_chart::core::{OhlcvRecord, PriceScale, ViewportState};
use candle_chart::render::{
    Color, DrawCall, DrawCommand, NullRenderer, RecordingSurface, Renderer,
};

fn sample_records(count: usize) -> Vec<OhlcvRecord> {
    (0..count)
        .map(|i| {
            let open = 1800.0 + (i % 7) as f64 * 10.0;
            let close = if i % 2 == 0 { open + 4.0 } else { open - 4.0 };
            OhlcvRecord::new(open, open.max(close) + 3.0, open.min(close) - 3.0, close, 500)
                .expect("valid record")
        })
        .collect()
}

#[test]
fn empty_sequence_renders_clear_and_baseline_only() {
    let frame =
        build_chart_frame(&[], ViewportState::default(), &ChartConfig::default()).expect("frame");
    frame.validate().expect("valid frame");

    assert_eq!(frame.commands.len(), 2);
    assert!(matches!(frame.commands[0], DrawCommand::Clear(_)));
    assert_eq!(frame.rects().count(), 0);
    assert_eq!(frame.texts().count(), 0);
    let baseline = frame.lines().next().expect("baseline");
    assert_eq!((baseline.x1, baseline.x2), (0.0, 1000.0));
    assert_eq!((baseline.y1, baseline.y2), (300.0, 300.0));
}

#[test]
fn single_record_window_draws_baseline_without_ticks() {
    let frame = build_chart_frame(
        &sample_records(1),
        ViewportState::default(),
        &ChartConfig::default(),
    )
    .expect("frame");
    assert_eq!(frame.rects().count(), 0);
    assert_eq!(frame.lines().count(), 1);
    assert_eq!(frame.texts().count(), 0);
}

#[test]
fn zero_zoom_renders_no_candles() {
    let viewport = ViewportState::new(0.0, 0.4).expect("viewport");
    let frame =
        build_chart_frame(&sample_records(40), viewport, &ChartConfig::default()).expect("frame");
    assert_eq!(frame.rects().count(), 0);
    assert_eq!(frame.texts().count(), 0);
}

#[test]
fn one_body_and_wick_per_visible_record_plus_axis() {
    let records = sample_records(100);
    let viewport = ViewportState::new(0.1, 0.0).expect("viewport");
    let frame = build_chart_frame(&records, viewport, &ChartConfig::default()).expect("frame");

    // Window is [0, 9): nine candles, one baseline, eleven ticks and labels.
    assert_eq!(frame.rects().count(), 9);
    assert_eq!(frame.lines().count(), 9 + 1 + 11);
    assert_eq!(frame.texts().count(), 11);
}

#[test]
fn body_colors_follow_candle_direction() {
    let records = vec![
        OhlcvRecord::new(1800.0, 1820.0, 1790.0, 1810.0, 1).expect("bullish"),
        OhlcvRecord::new(1810.0, 1820.0, 1790.0, 1810.0, 1).expect("flat"),
        OhlcvRecord::new(1810.0, 1820.0, 1790.0, 1800.0, 1).expect("bearish"),
        OhlcvRecord::new(1800.0, 1820.0, 1790.0, 1810.0, 1).expect("unused"),
    ];
    let frame =
        build_chart_frame(&records, ViewportState::default(), &ChartConfig::default())
            .expect("frame");
    let colors: Vec<Color> = frame.rects().map(|rect| rect.fill_color).collect();
    assert_eq!(colors, [Color::GREEN, Color::RED, Color::RED]);
}

#[test]
fn body_spans_open_close_and_wick_is_centered() {
    let config =
        ChartConfig::default().with_price_scale(PriceScale::new(0.0, 300.0).expect("scale"));
    let records = vec![
        OhlcvRecord::new(100.0, 150.0, 50.0, 200.0, 1).expect("record"),
        OhlcvRecord::new(100.0, 150.0, 50.0, 120.0, 1).expect("record"),
    ];
    let frame = build_chart_frame(&records, ViewportState::default(), &config).expect("frame");

    let body = frame.rects().next().expect("body");
    assert_eq!(body.x, 0.0);
    assert_eq!(body.width, 5.0);
    assert!((body.y - 100.0).abs() <= 1e-9);
    assert!((body.height - 100.0).abs() <= 1e-9);

    let wick = frame.lines().next().expect("wick");
    assert_eq!((wick.x1, wick.x2), (2.5, 2.5));
    assert!((wick.y1 - 150.0).abs() <= 1e-9);
    assert!((wick.y2 - 250.0).abs() <= 1e-9);
}

#[test]
fn axis_labels_are_record_indices() {
    let records = sample_records(201);
    let viewport = ViewportState::new(0.25, 0.5).expect("viewport");
    let frame = build_chart_frame(&records, viewport, &ChartConfig::default()).expect("frame");

    let labels: Vec<&str> = frame.texts().map(|text| text.text.as_str()).collect();
    assert_eq!(labels.len(), 11);
    assert_eq!(labels[0], "100");
    assert_eq!(labels[1], "105");
    assert_eq!(labels[10], "150");
    let label = frame.texts().next().expect("label");
    assert_eq!((label.x, label.y), (-10.0, 320.0));
}

#[test]
fn recording_surface_receives_calls_in_frame_order() {
    let mut chart = CandlestickChart::new(
        RecordingSurface::default(),
        ChartConfig::default(),
        sample_records(30),
    )
    .expect("chart");
    chart.on_viewport_changed(500.0, 0.0).expect("render");

    let surface = chart.renderer();
    assert_eq!(surface.render_count(), 1);
    let calls = surface.calls();
    assert!(matches!(calls[0], DrawCall::Clear(_)));
    assert!(matches!(calls[1], DrawCall::FillRect(_)));
    assert!(matches!(calls[2], DrawCall::StrokeLine(_)));
    assert!(matches!(calls.last(), Some(DrawCall::DrawText(_))));
    // floor(0.5 * 29) = 14 candles.
    assert_eq!(surface.fill_rect_count(), 14);
    assert_eq!(surface.text_count(), 11);
}

#[test]
fn null_renderer_validates_and_counts() {
    let mut renderer = NullRenderer::default();
    let frame = build_chart_frame(
        &sample_records(12),
        ViewportState::default(),
        &ChartConfig::default(),
    )
    .expect("frame");
    renderer.render(&frame).expect("render");

    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_rect_count, 11);
    assert_eq!(renderer.last_line_count, 11 + 1 + 11);
    assert_eq!(renderer.last_text_count, 11);
}

#[test]
fn sub_pixel_body_keeps_exact_open_close_extent() {
    let records = vec![
        OhlcvRecord::new(1800.0, 1801.0, 1799.0, 1800.5, 1).expect("record"),
        OhlcvRecord::new(1800.0, 1801.0, 1799.0, 1800.5, 1).expect("record"),
    ];
    let frame =
        build_chart_frame(&records, ViewportState::default(), &ChartConfig::default())
            .expect("frame");

    // 0.5 price units on a 400-unit domain over 300px.
    let body = frame.rects().next().expect("body");
    assert!((body.height - 0.375).abs() <= 1e-9);
    assert!((body.y - 224.625).abs() <= 1e-9);
}

#[test]
fn flat_body_is_drawn_as_hairline() {
    let records = vec![
        OhlcvRecord::new(1800.0, 1801.0, 1799.0, 1800.0, 1).expect("record"),
        OhlcvRecord::new(1800.0, 1801.0, 1799.0, 1800.0, 1).expect("record"),
    ];
    let frame =
        build_chart_frame(&records, ViewportState::default(), &ChartConfig::default())
            .expect("frame");

    let body = frame.rects().next().expect("body");
    assert_eq!(body.height, 1.0);
    assert!((body.y - 224.5).abs() <= 1e-9);
}
