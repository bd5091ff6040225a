pub mod candle_layout;
pub mod ohlcv;
pub mod price_scale;
pub mod types;
pub mod viewport_state;
pub mod visible_window;

pub use candle_layout::{CandleGeometry, CandleLayout, project_visible_candles};
pub use ohlcv::{CandleDirection, OhlcvRecord};
pub use price_scale::{MIN_PRICE_SPAN, PriceScale};
pub use types::Viewport;
pub use viewport_state::ViewportState;
pub use visible_window::VisibleWindow;
