//! ADX — Average Directional Index with +DI/-DI.
//!
//! Steps:
//! 1. True Range: tr[0] = high-low, tr[i] = max(h-l, |h-prev_c|, |l-prev_c|)
//! 2. Directional movement: +dm = max(high - prev_high, 0),
//!    -dm = max(prev_low - low, 0); index 0 has no previous bar
//! 3. ATR and smoothed DM: rolling mean over `period` with min_periods=1
//!    semantics (early bars use however many points exist)
//! 4. +di = 100 * smoothed(+dm) / atr, -di = 100 * smoothed(-dm) / atr
//! 5. dx = 100 * |+di - -di| / (+di + -di)
//! 6. adx = rolling mean of dx over `period`, min_periods=1
//!
//! Degenerate divisions (flat windows, the seed bar) produce non-finite
//! intermediates; the final pass coerces every non-finite output to 0, so
//! adx/+di/-di are always finite and non-negative. A reading of 0 therefore
//! means "no measurable trend", not an error.

use crate::domain::Bar;
use crate::indicators::{rolling_mean_min1, Indicator};

/// Full directional output: the chart's secondary panel plots all three.
#[derive(Debug, Clone)]
pub struct DirectionalIndex {
    pub adx: Vec<f64>,
    pub plus_di: Vec<f64>,
    pub minus_di: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct Adx {
    period: usize,
    name: String,
}

impl Adx {
    pub const DEFAULT_PERIOD: usize = 14;

    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ADX period must be >= 1");
        Self {
            period,
            name: format!("adx_{period}"),
        }
    }

    /// Compute adx, +di, and -di for the entire bar series.
    pub fn compute_directional(&self, bars: &[Bar]) -> DirectionalIndex {
        let n = bars.len();
        if n == 0 {
            return DirectionalIndex {
                adx: Vec::new(),
                plus_di: Vec::new(),
                minus_di: Vec::new(),
            };
        }

        let mut tr = vec![f64::NAN; n];
        let mut plus_dm = vec![f64::NAN; n];
        let mut minus_dm = vec![f64::NAN; n];

        tr[0] = bars[0].high - bars[0].low;
        for i in 1..n {
            tr[i] = max_finite(&[
                bars[i].high - bars[i].low,
                (bars[i].high - bars[i - 1].close).abs(),
                (bars[i].low - bars[i - 1].close).abs(),
            ]);
            plus_dm[i] = (bars[i].high - bars[i - 1].high).max(0.0);
            minus_dm[i] = (bars[i - 1].low - bars[i].low).max(0.0);
        }

        let atr = rolling_mean_min1(&tr, self.period);
        let smooth_plus = rolling_mean_min1(&plus_dm, self.period);
        let smooth_minus = rolling_mean_min1(&minus_dm, self.period);

        let mut plus_di = vec![f64::NAN; n];
        let mut minus_di = vec![f64::NAN; n];
        let mut dx = vec![f64::NAN; n];
        for i in 0..n {
            plus_di[i] = 100.0 * smooth_plus[i] / atr[i];
            minus_di[i] = 100.0 * smooth_minus[i] / atr[i];
            dx[i] = 100.0 * (plus_di[i] - minus_di[i]).abs() / (plus_di[i] + minus_di[i]);
        }

        let mut adx = rolling_mean_min1(&dx, self.period);

        // Degenerate ratios (0/0, x/0) resolve to "no trend".
        for series in [&mut adx, &mut plus_di, &mut minus_di] {
            for v in series.iter_mut() {
                if !v.is_finite() {
                    *v = 0.0;
                }
            }
        }

        DirectionalIndex {
            adx,
            plus_di,
            minus_di,
        }
    }
}

impl Indicator for Adx {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        // min_periods=1 smoothing: every index is defined
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        self.compute_directional(bars).adx
    }
}

/// Max of the finite candidates; NAN when none are finite.
fn max_finite(candidates: &[f64]) -> f64 {
    candidates
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(f64::NAN, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;
    use chrono::{Duration, TimeZone, Utc};

    fn make_ohlc_bars(data: &[(f64, f64, f64, f64)]) -> Vec<Bar> {
        let base = Utc.with_ymd_and_hms(2024, 1, 2, 14, 30, 0).unwrap();
        data.iter()
            .enumerate()
            .map(|(i, &(open, high, low, close))| Bar {
                timestamp: base + Duration::minutes(i as i64),
                open,
                high,
                low,
                close,
                volume: 1000,
            })
            .collect()
    }

    #[test]
    fn adx_known_values() {
        // bars: (h,l,c) = (12,10,11), (13,11,12), (15,12,14), period 2
        // tr = [2, 2, 3]; +dm = [-, 1, 2]; -dm = [-, 0, 0]
        // atr = [2, 2, 2.5]; s+dm = [-, 1, 1.5]; s-dm = [-, 0, 0]
        // +di = [-, 50, 60]; -di = [-, 0, 0]; dx = [-, 100, 100]
        // adx = [-, 100, 100]; seed-bar NaNs resolve to 0
        let bars = make_ohlc_bars(&[
            (11.0, 12.0, 10.0, 11.0),
            (12.0, 13.0, 11.0, 12.0),
            (13.0, 15.0, 12.0, 14.0),
        ]);
        let out = Adx::new(2).compute_directional(&bars);

        assert_approx(out.plus_di[0], 0.0, 1e-9);
        assert_approx(out.minus_di[0], 0.0, 1e-9);
        assert_approx(out.adx[0], 0.0, 1e-9);

        assert_approx(out.plus_di[1], 50.0, 1e-9);
        assert_approx(out.plus_di[2], 60.0, 1e-9);
        assert_approx(out.minus_di[1], 0.0, 1e-9);
        assert_approx(out.adx[1], 100.0, 1e-9);
        assert_approx(out.adx[2], 100.0, 1e-9);
    }

    #[test]
    fn adx_always_finite_and_non_negative() {
        let bars = make_ohlc_bars(&[
            (100.0, 105.0, 95.0, 102.0),
            (102.0, 108.0, 100.0, 106.0),
            (106.0, 107.0, 98.0, 99.0),
            (99.0, 103.0, 97.0, 101.0),
            (101.0, 106.0, 100.0, 105.0),
            (105.0, 110.0, 103.0, 108.0),
            (108.0, 112.0, 106.0, 110.0),
        ]);
        let out = Adx::new(3).compute_directional(&bars);
        for series in [&out.adx, &out.plus_di, &out.minus_di] {
            for (i, &v) in series.iter().enumerate() {
                assert!(v.is_finite(), "non-finite at bar {i}: {v}");
                assert!(v >= 0.0, "negative at bar {i}: {v}");
            }
        }
    }

    #[test]
    fn adx_flat_market_is_zero() {
        // High == low == close everywhere: TR is 0, every ratio is 0/0
        let bars = make_ohlc_bars(&[(100.0, 100.0, 100.0, 100.0); 6]);
        let out = Adx::new(3).compute_directional(&bars);
        for series in [&out.adx, &out.plus_di, &out.minus_di] {
            assert!(series.iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn adx_strong_trend_elevated() {
        let mut data = Vec::new();
        for i in 0..20 {
            let base = 100.0 + i as f64 * 5.0;
            data.push((base - 1.0, base + 3.0, base - 3.0, base + 2.0));
        }
        let bars = make_ohlc_bars(&data);
        let out = Adx::new(5).compute_directional(&bars);
        let last = *out.adx.last().unwrap();
        assert!(last > 10.0, "ADX should be elevated in strong trend, got {last}");
        let last_plus = *out.plus_di.last().unwrap();
        let last_minus = *out.minus_di.last().unwrap();
        assert!(last_plus > last_minus, "uptrend should have +DI > -DI");
    }

    #[test]
    fn adx_single_bar() {
        let bars = make_ohlc_bars(&[(100.0, 105.0, 95.0, 102.0)]);
        let out = Adx::new(14).compute_directional(&bars);
        assert_eq!(out.adx, vec![0.0]);
        assert_eq!(out.plus_di, vec![0.0]);
        assert_eq!(out.minus_di, vec![0.0]);
    }

    #[test]
    fn adx_empty_series() {
        let out = Adx::new(14).compute_directional(&[]);
        assert!(out.adx.is_empty());
    }
}
