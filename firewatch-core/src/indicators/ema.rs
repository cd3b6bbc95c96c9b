//! Exponential Moving Average (EMA).
//!
//! Recursive: ema[t] = alpha * close[t] + (1 - alpha) * ema[t-1]
//! with alpha = 2 / (span + 1), seeded at ema[0] = close[0].
//! Every index is defined (no warmup NANs); a span of 0 disables the
//! overlay and yields an all-NAN series.

use crate::domain::Bar;
use crate::indicators::Indicator;

#[derive(Debug, Clone)]
pub struct Ema {
    span: usize,
    name: String,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        Self {
            span,
            name: format!("ema_{span}"),
        }
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        if self.span == 0 || n == 0 {
            return result;
        }

        let alpha = 2.0 / (self.span as f64 + 1.0);

        if bars[0].close.is_nan() {
            return result;
        }
        let mut prev = bars[0].close;
        result[0] = prev;

        for i in 1..n {
            if bars[i].close.is_nan() {
                // Once tainted, the recursion cannot recover
                return result;
            }
            let ema = alpha * bars[i].close + (1.0 - alpha) * prev;
            result[i] = ema;
            prev = ema;
        }

        result
    }
}
