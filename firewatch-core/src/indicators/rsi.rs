//! Relative Strength Index (RSI).
//!
//! Average gain and average loss are simple rolling means over `period`
//! one-step deltas (no Wilder smoothing). RSI = 100 - 100 / (1 + RS) with
//! RS = avg_gain / avg_loss. When avg_loss is 0 the ratio is unbounded and
//! the output clamps to 100 (the mathematical limit of a monotone uptrend;
//! the flat case clamps the same way). Lookback: period.

use crate::domain::Bar;
use crate::indicators::Indicator;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub const DEFAULT_PERIOD: usize = 14;

    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PERIOD)
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        if n < self.period + 1 {
            return result;
        }

        // One-step deltas; index 0 has no previous close.
        let mut gains = vec![f64::NAN; n];
        let mut losses = vec![f64::NAN; n];
        for i in 1..n {
            let delta = bars[i].close - bars[i - 1].close;
            if delta.is_nan() {
                continue;
            }
            gains[i] = delta.max(0.0);
            losses[i] = (-delta).max(0.0);
        }

        // Full-window rolling means; the window must hold `period` deltas,
        // so the first defined output is at index `period`.
        for i in self.period..n {
            let start = i + 1 - self.period;
            let mut gain_sum = 0.0;
            let mut loss_sum = 0.0;
            let mut has_nan = false;
            for j in start..=i {
                if gains[j].is_nan() {
                    has_nan = true;
                    break;
                }
                gain_sum += gains[j];
                loss_sum += losses[j];
            }
            if has_nan {
                continue;
            }
            let avg_gain = gain_sum / self.period as f64;
            let avg_loss = loss_sum / self.period as f64;

            result[i] = if avg_loss == 0.0 {
                100.0
            } else {
                100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
            };
        }

        result
    }
}
