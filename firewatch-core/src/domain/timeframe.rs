//! Chart time frames and their provider (range, interval) pairs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The eight chart ranges the detail view offers.
///
/// Each maps to a fixed Yahoo (range, interval) pair: short ranges use
/// intraday intervals, long ranges coarsen to weekly/monthly bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFrame {
    OneDay,
    OneMonth,
    ThreeMonths,
    SixMonths,
    YearToDate,
    TrailingYear,
    FiveYears,
    Max,
}

impl TimeFrame {
    /// Provider `range` query value.
    pub fn range(self) -> &'static str {
        match self {
            TimeFrame::OneDay => "1d",
            TimeFrame::OneMonth => "1mo",
            TimeFrame::ThreeMonths => "3mo",
            TimeFrame::SixMonths => "6mo",
            TimeFrame::YearToDate => "ytd",
            TimeFrame::TrailingYear => "1y",
            TimeFrame::FiveYears => "5y",
            TimeFrame::Max => "max",
        }
    }

    /// Provider `interval` query value paired with this range.
    pub fn interval(self) -> &'static str {
        match self {
            TimeFrame::OneDay => "1m",
            TimeFrame::OneMonth => "30m",
            TimeFrame::ThreeMonths => "1h",
            TimeFrame::SixMonths => "1d",
            TimeFrame::YearToDate => "1d",
            TimeFrame::TrailingYear => "1d",
            TimeFrame::FiveYears => "1wk",
            TimeFrame::Max => "1mo",
        }
    }

    /// All frames, in menu order.
    pub fn all() -> [TimeFrame; 8] {
        [
            TimeFrame::OneDay,
            TimeFrame::OneMonth,
            TimeFrame::ThreeMonths,
            TimeFrame::SixMonths,
            TimeFrame::YearToDate,
            TimeFrame::TrailingYear,
            TimeFrame::FiveYears,
            TimeFrame::Max,
        ]
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TimeFrame::OneDay => "1d",
            TimeFrame::OneMonth => "1mo",
            TimeFrame::ThreeMonths => "3mo",
            TimeFrame::SixMonths => "6mo",
            TimeFrame::YearToDate => "ytd",
            TimeFrame::TrailingYear => "ttm",
            TimeFrame::FiveYears => "5y",
            TimeFrame::Max => "max",
        };
        f.write_str(label)
    }
}

impl FromStr for TimeFrame {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1d" => Ok(TimeFrame::OneDay),
            "1mo" => Ok(TimeFrame::OneMonth),
            "3mo" => Ok(TimeFrame::ThreeMonths),
            "6mo" => Ok(TimeFrame::SixMonths),
            "ytd" => Ok(TimeFrame::YearToDate),
            "ttm" | "1y" => Ok(TimeFrame::TrailingYear),
            "5y" => Ok(TimeFrame::FiveYears),
            "max" => Ok(TimeFrame::Max),
            other => Err(format!(
                "unknown time frame '{other}'. Valid: 1d, 1mo, 3mo, 6mo, ytd, ttm, 5y, max"
            )),
        }
    }
}
