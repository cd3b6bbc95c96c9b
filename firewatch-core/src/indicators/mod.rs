//! Indicator engine: pure transforms over a bar series.
//!
//! Indicators are pure functions: bar history in, numeric series out, no
//! I/O. Output series are the same length as the input; values that are
//! not yet computable are `f64::NAN`.
//!
//! Two warmup policies coexist deliberately:
//! - SMA, EMA, RSI, and Bollinger are NAN until a full window exists
//!   (and a period of 0 means "disabled": an all-NAN series).
//! - The ADX family smooths with a shrinking window (`min_periods = 1`
//!   semantics): early bars use however many points are available.

pub mod adx;
pub mod bollinger;
pub mod ema;
pub mod rsi;
pub mod sma;

pub use adx::{Adx, DirectionalIndex};
pub use bollinger::{Bollinger, BollingerBand};
pub use ema::Ema;
pub use rsi::Rsi;
pub use sma::Sma;

use crate::domain::Bar;

/// Trait for single-series indicators.
///
/// Indicators take a full bar series and produce a numeric output series of
/// the same length. The first `lookback()` values should be `f64::NAN`.
/// No value at bar t may depend on price data from bar t+1 or later.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_20", "rsi_14").
    fn name(&self) -> &str;

    /// Number of bars needed before the indicator produces valid output.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    fn compute(&self, bars: &[Bar]) -> Vec<f64>;
}

/// Rolling mean over a trailing window with `min_periods = 1` semantics:
/// the mean of the finite values in the window, NAN only when the window
/// holds no finite value at all. Used by the ADX family.
pub(crate) fn rolling_mean_min1(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if period == 0 {
        return result;
    }
    for i in 0..n {
        let start = (i + 1).saturating_sub(period);
        let mut sum = 0.0;
        let mut count = 0usize;
        for &v in &values[start..=i] {
            if v.is_finite() {
                sum += v;
                count += 1;
            }
        }
        if count > 0 {
            result[i] = sum / count as f64;
        }
    }
    result
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    use chrono::{Duration, TimeZone, Utc};
    let base = Utc.with_ymd_and_hms(2024, 1, 2, 14, 30, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                timestamp: base + Duration::minutes(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
