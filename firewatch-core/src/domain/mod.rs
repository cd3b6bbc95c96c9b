//! Domain types: OHLCV bars and chart time frames.

pub mod bar;
pub mod timeframe;

pub use bar::Bar;
pub use timeframe::TimeFrame;
