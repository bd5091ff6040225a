use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use tracing::warn;

use crate::api::CandlestickChart;
use crate::render::CairoRenderer;

pub type SharedChart = Rc<RefCell<CandlestickChart<CairoRenderer>>>;

/// Embeds a chart in a horizontally scrollable GTK4 widget.
///
/// The drawing area keeps the nominal surface size. Every change of the
/// horizontal adjustment (scrolling, or the visible page resizing with the
/// window) is turned into a viewport notification followed by a repaint.
pub struct GtkChartAdapter {
    chart: SharedChart,
    scrolled_window: gtk::ScrolledWindow,
    drawing_area: gtk::DrawingArea,
}

impl GtkChartAdapter {
    #[must_use]
    pub fn new(chart: CandlestickChart<CairoRenderer>) -> Self {
        let surface = chart.config().surface_viewport();
        let drawing_area = gtk::DrawingArea::builder()
            .content_width(i32::try_from(surface.width).unwrap_or(i32::MAX))
            .content_height(i32::try_from(surface.height).unwrap_or(i32::MAX))
            .build();
        let scrolled_window = gtk::ScrolledWindow::builder()
            .hscrollbar_policy(gtk::PolicyType::Always)
            .vscrollbar_policy(gtk::PolicyType::Never)
            .child(&drawing_area)
            .build();
        let chart = Rc::new(RefCell::new(chart));

        {
            let chart = Rc::clone(&chart);
            drawing_area.set_draw_func(move |_, context, _, _| {
                if let Err(err) = chart.borrow_mut().render_on_cairo_context(context) {
                    warn!(error = %err, "chart draw callback failed");
                }
            });
        }

        let hadjustment = scrolled_window.hadjustment();
        {
            let chart = Rc::clone(&chart);
            let drawing_area = drawing_area.clone();
            hadjustment.connect_value_changed(move |adjustment| {
                notify_viewport_change(&chart, &drawing_area, adjustment);
            });
        }
        {
            let chart = Rc::clone(&chart);
            let drawing_area = drawing_area.clone();
            hadjustment.connect_changed(move |adjustment| {
                notify_viewport_change(&chart, &drawing_area, adjustment);
            });
        }

        Self {
            chart,
            scrolled_window,
            drawing_area,
        }
    }

    /// Top-level widget to place into a window.
    #[must_use]
    pub fn widget(&self) -> &gtk::ScrolledWindow {
        &self.scrolled_window
    }

    #[must_use]
    pub fn drawing_area(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }

    #[must_use]
    pub fn chart(&self) -> SharedChart {
        Rc::clone(&self.chart)
    }
}

fn notify_viewport_change(
    chart: &SharedChart,
    drawing_area: &gtk::DrawingArea,
    adjustment: &gtk::Adjustment,
) {
    let viewport_width = adjustment.page_size();
    let scroll_fraction = horizontal_scroll_fraction(adjustment);
    match chart
        .borrow_mut()
        .apply_viewport_change(viewport_width, scroll_fraction)
    {
        Ok(_) => drawing_area.queue_draw(),
        Err(err) => warn!(error = %err, "ignoring invalid viewport change"),
    }
}

/// Maps the adjustment value onto `[0, 1]` over its scrollable range.
fn horizontal_scroll_fraction(adjustment: &gtk::Adjustment) -> f64 {
    let range = adjustment.upper() - adjustment.page_size() - adjustment.lower();
    if range <= 0.0 {
        return 0.0;
    }
    ((adjustment.value() - adjustment.lower()) / range).clamp(0.0, 1.0)
}
