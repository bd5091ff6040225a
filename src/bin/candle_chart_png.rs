use std::path::PathBuf;
use std::process::ExitCode;

use candle_chart::core::ViewportState;
use candle_chart::data::{DEFAULT_DATA_FILE, LoadPolicy, LoaderConfig};
use candle_chart::render::CairoRenderer;
use candle_chart::{CandlestickChart, ChartConfig, ChartResult};
use clap::Parser;

/// Render a candlestick chart from a headerless OHLCV CSV file into a PNG.
#[derive(Debug, Parser)]
#[command(name = "candle_chart_png", version, about)]
struct Args {
    /// Headerless `date,time,open,high,low,close,volume` file.
    #[arg(default_value = DEFAULT_DATA_FILE)]
    data: PathBuf,

    /// Output PNG path.
    #[arg(short, long, default_value = "candles.png")]
    output: PathBuf,

    /// Chart configuration JSON; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Zoom factor (visible width / nominal chart width).
    #[arg(short, long, default_value_t = 1.0)]
    zoom: f64,

    /// Horizontal scroll fraction in [0, 1].
    #[arg(short, long, default_value_t = 0.0)]
    scroll: f64,

    /// Abort on the first malformed line instead of skipping it.
    #[arg(long)]
    strict: bool,

    /// Fit the price scale to the loaded records.
    #[arg(long)]
    fit_prices: bool,
}

fn main() -> ExitCode {
    let _ = candle_chart::telemetry::init_default_tracing();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> ChartResult<()> {
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
    let mut chart = CandlestickChart::open(renderer, config, &args.data, &loader)?;
    for rejected in chart.rejected_lines() {
        eprintln!("skipped line {}: {}", rejected.line, rejected.reason);
    }

    chart.set_viewport_state(ViewportState::new(args.zoom, args.scroll)?);
    chart.render()?;

    let window = chart.visible_window();
    let renderer = chart.into_renderer();
    renderer.write_png(&args.output)?;
    println!(
        "wrote {} ({} candles, indices {}..{})",
        args.output.display(),
        window.len(),
        window.start_index,
        window.end_index
    );
    Ok(())
}
