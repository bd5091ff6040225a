//! candle-chart: scrollable, zoomable candlestick chart rendering.
//!
//! The crate splits into pure layers (record model, viewport state, coordinate
//! mapping, frame building) and side-effecting backends that replay the
//! resulting draw-call list onto a surface.

pub mod api;
pub mod core;
pub mod data;
pub mod error;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{CandlestickChart, ChartConfig};
pub use error::{ChartError, ChartResult};
