use std::path::Path;

use tracing::{debug, trace};

use crate::core::{OhlcvRecord, PriceScale, ViewportState, VisibleWindow};
use crate::data::{LoadReport, LoaderConfig, RejectedLine, load_records_from_path};
use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

use super::{ChartConfig, build_chart_frame};

/// Chart controller consumed by host applications.
///
/// Owns the loaded record sequence for its whole lifetime (read-only after
/// construction), the current viewport state and the renderer. Every
/// viewport notification replaces the state and redraws synchronously.
pub struct CandlestickChart<R: Renderer> {
    renderer: R,
    config: ChartConfig,
    records: Vec<OhlcvRecord>,
    rejected: Vec<RejectedLine>,
    viewport: ViewportState,
}

impl<R: Renderer> CandlestickChart<R> {
    pub fn new(renderer: R, config: ChartConfig, records: Vec<OhlcvRecord>) -> ChartResult<Self> {
        Self::from_load_report(
            renderer,
            config,
            LoadReport {
                records,
                rejected: Vec::new(),
            },
        )
    }

    /// Builds a chart from a finished load, keeping its rejected lines for the host.
    pub fn from_load_report(
        renderer: R,
        mut config: ChartConfig,
        report: LoadReport,
    ) -> ChartResult<Self> {
        if config.auto_fit_price_scale {
            if let Some(fitted) = PriceScale::fit_records(&report.records) {
                debug!(
                    min_price = fitted.min_price,
                    max_price = fitted.max_price,
                    "fitted price scale to records"
                );
                config.price_scale = fitted;
            }
        }
        config.validate()?;

        Ok(Self {
            renderer,
            config,
            records: report.records,
            rejected: report.rejected,
            viewport: ViewportState::default(),
        })
    }

    /// Loads the data file eagerly, then builds the chart.
    ///
    /// An unreadable file fails the whole call; nothing can be shown.
    pub fn open(
        renderer: R,
        config: ChartConfig,
        path: impl AsRef<Path>,
        loader: &LoaderConfig,
    ) -> ChartResult<Self> {
        let report = load_records_from_path(path, loader)?;
        Self::from_load_report(renderer, config, report)
    }

    #[must_use]
    pub fn records(&self) -> &[OhlcvRecord] {
        &self.records
    }

    /// Lines skipped while loading the records.
    #[must_use]
    pub fn rejected_lines(&self) -> &[RejectedLine] {
        &self.rejected
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport_state(&self) -> ViewportState {
        self.viewport
    }

    #[must_use]
    pub fn visible_window(&self) -> VisibleWindow {
        VisibleWindow::compute(self.records.len(), self.viewport)
    }

    /// Replaces the viewport state without redrawing.
    pub fn set_viewport_state(&mut self, viewport: ViewportState) {
        trace!(
            zoom_factor = viewport.zoom_factor(),
            scroll_position = viewport.scroll_position(),
            "viewport state updated"
        );
        self.viewport = viewport;
    }

    /// Derives and stores the viewport state for a viewport notification
    /// without drawing. Hosts that redraw from their own paint callback use
    /// this and then schedule a repaint.
    pub fn apply_viewport_change(
        &mut self,
        viewport_width_px: f64,
        horizontal_scroll_value: f64,
    ) -> ChartResult<ViewportState> {
        let state = ViewportState::from_viewport_change(
            viewport_width_px,
            self.config.chart_width_px,
            horizontal_scroll_value,
        )?;
        self.set_viewport_state(state);
        Ok(state)
    }

    /// Handles a viewport-bounds or scroll notification and redraws.
    ///
    /// `viewport_width_px` is the observed visible width and
    /// `horizontal_scroll_value` the scroll control's value in `[0, 1]`.
    pub fn on_viewport_changed(
        &mut self,
        viewport_width_px: f64,
        horizontal_scroll_value: f64,
    ) -> ChartResult<()> {
        self.apply_viewport_change(viewport_width_px, horizontal_scroll_value)?;
        self.render()
    }

    /// Handles a scroll-only notification, keeping the current zoom.
    ///
    /// A non-finite scroll value fails without touching the state or redrawing.
    pub fn on_scroll_changed(&mut self, horizontal_scroll_value: f64) -> ChartResult<()> {
        let state = self.viewport.with_scroll_position(horizontal_scroll_value)?;
        self.set_viewport_state(state);
        self.render()
    }

    pub fn set_price_scale(&mut self, price_scale: PriceScale) -> ChartResult<()> {
        price_scale.validate()?;
        self.config.price_scale = price_scale;
        Ok(())
    }

    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        build_chart_frame(&self.records, self.viewport, &self.config)
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        let window = self.visible_window();
        debug!(
            start_index = window.start_index,
            end_index = window.end_index,
            commands = frame.commands.len(),
            "render chart frame"
        );
        self.renderer.render(&frame)
    }

    /// Renders the frame into an external cairo context, e.g. from a GTK draw callback.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
