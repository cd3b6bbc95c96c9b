//! Bollinger Bands — rolling mean +/- standard deviation multiplier.
//!
//! Three bands (separate Indicator instances):
//! - Middle: SMA(close, window)
//! - Upper: middle + k * stddev(close, window)
//! - Lower: middle - k * stddev(close, window)
//!
//! Uses sample stddev (divide by N-1). Lookback: window - 1.

use crate::domain::Bar;
use crate::indicators::Indicator;

/// Which band of the Bollinger Bands to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BollingerBand {
    Upper,
    Middle,
    Lower,
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    window: usize,
    multiplier: f64,
    band: BollingerBand,
    name: String,
}

impl Bollinger {
    pub const DEFAULT_WINDOW: usize = 20;
    pub const DEFAULT_MULTIPLIER: f64 = 2.0;

    pub fn upper(window: usize, multiplier: f64) -> Self {
        Self::band(BollingerBand::Upper, window, multiplier)
    }

    pub fn middle(window: usize, multiplier: f64) -> Self {
        Self::band(BollingerBand::Middle, window, multiplier)
    }

    pub fn lower(window: usize, multiplier: f64) -> Self {
        Self::band(BollingerBand::Lower, window, multiplier)
    }

    fn band(band: BollingerBand, window: usize, multiplier: f64) -> Self {
        assert!(window >= 1, "Bollinger window must be >= 1");
        let tag = match band {
            BollingerBand::Upper => "upper",
            BollingerBand::Middle => "middle",
            BollingerBand::Lower => "lower",
        };
        Self {
            window,
            multiplier,
            band,
            name: format!("bollinger_{tag}_{window}_{multiplier}"),
        }
    }
}

impl Indicator for Bollinger {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.window.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        if n < self.window {
            return result;
        }

        for i in (self.window - 1)..n {
            let start = i + 1 - self.window;
            let window = &bars[start..=i];

            let mut sum = 0.0;
            let mut has_nan = false;
            for bar in window {
                if bar.close.is_nan() {
                    has_nan = true;
                    break;
                }
                sum += bar.close;
            }
            if has_nan {
                continue;
            }

            let mean = sum / self.window as f64;

            match self.band {
                BollingerBand::Middle => {
                    result[i] = mean;
                }
                BollingerBand::Upper | BollingerBand::Lower => {
                    // Sample stddev (N-1 denominator); a window of 1 has no
                    // spread estimate and stays NAN, matching the source data
                    // library's ddof default.
                    let sum_sq: f64 = window
                        .iter()
                        .map(|bar| {
                            let diff = bar.close - mean;
                            diff * diff
                        })
                        .sum();
                    let stddev = (sum_sq / (self.window as f64 - 1.0)).sqrt();

                    result[i] = match self.band {
                        BollingerBand::Upper => mean + self.multiplier * stddev,
                        BollingerBand::Lower => mean - self.multiplier * stddev,
                        BollingerBand::Middle => unreachable!(),
                    };
                }
            }
        }

        result
    }
}
