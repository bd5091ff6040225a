mod axis_frame_builder;
mod candle_frame_builder;
mod chart;
mod chart_config;
mod render_style;

pub use axis_frame_builder::{AxisTick, axis_ticks};
pub use candle_frame_builder::build_chart_frame;
pub use chart::CandlestickChart;
pub use chart_config::ChartConfig;
pub use render_style::RenderStyle;
