use std::path::PathBuf;
use std::process::ExitCode;

use candle_chart::data::{DEFAULT_DATA_FILE, LoadPolicy, LoaderConfig};
use candle_chart::platform_gtk::GtkChartAdapter;
use candle_chart::render::CairoRenderer;
use candle_chart::{CandlestickChart, ChartConfig, ChartResult};
use clap::Parser;
use gtk4 as gtk;
use gtk4::prelude::*;

/// Desktop candlestick viewer: scroll horizontally, resize the window to zoom.
#[derive(Debug, Parser)]
#[command(name = "candle_chart_viewer", version, about)]
struct Args {
    /// Headerless `date,time,open,high,low,close,volume` file.
    #[arg(default_value = DEFAULT_DATA_FILE)]
    data: PathBuf,

    /// Chart configuration JSON; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Abort on the first malformed line instead of skipping it.
    #[arg(long)]
    strict: bool,

    /// Fit the price scale to the loaded records.
    #[arg(long)]
    fit_prices: bool,
}

const WINDOW_WIDTH: i32 = 800;
const WINDOW_HEIGHT: i32 = 400;

fn main() -> ExitCode {
    let _ = candle_chart::telemetry::init_default_tracing();
    let args = Args::parse();

    // Loading is eager and blocks startup: without data there is no chart to show.
    let chart = match load_chart(&args) {
        Ok(chart) => chart,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    for rejected in chart.rejected_lines() {
        eprintln!("skipped line {}: {}", rejected.line, rejected.reason);
    }

    let app = gtk::Application::builder()
        .application_id("rs.candle_chart.viewer")
        .build();
    let chart = std::cell::RefCell::new(Some(chart));
    app.connect_activate(move |app| {
        let Some(chart) = chart.borrow_mut().take() else {
            return;
        };
        let adapter = GtkChartAdapter::new(chart);

        let window = gtk::ApplicationWindow::builder()
            .application(app)
            .title("Candlestick Chart")
            .default_width(WINDOW_WIDTH)
            .default_height(WINDOW_HEIGHT)
            .build();
        window.set_child(Some(adapter.widget()));
        window.present();
    });

    // Arguments were consumed by clap; keep GTK from parsing them again.
    let status = app.run_with_args::<&str>(&[]);
    if status == gtk::glib::ExitCode::SUCCESS {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn load_chart(args: &Args) -> ChartResult<CandlestickChart<CairoRenderer>> {
    let mut config = match &args.config {
        Some(path) => ChartConfig::from_json_file(path)?,
        None => ChartConfig::default(),
    };
    if args.fit_prices {
        config = config.with_auto_fit_price_scale(true);
    }
    let loader = LoaderConfig::default().with_policy(if args.strict {
        LoadPolicy::Strict
    } else {
        LoadPolicy::Lenient
    });

    let surface = config.surface_viewport();
    let renderer = CairoRenderer::new(
        i32::try_from(surface.width).unwrap_or(i32::MAX),
        i32::try_from(surface.height).unwrap_or(i32::MAX),
    )?;
    CandlestickChart::open(renderer, config, &args.data, &loader)
}
