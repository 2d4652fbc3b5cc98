//! Query builder for the `/v8/finance/chart/{symbol}` endpoint.

use std::fmt;
use std::str::FromStr;

use url::Url;

use super::Query;

/// Lookback window accepted by the chart endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Range {
    OneMonth,
    ThreeMonths,
    SixMonths,
    /// One calendar year. This is the default.
    #[default]
    OneYear,
    TwoYears,
    FiveYears,
    Max,
}

impl Range {
    /// Smallest range that still reaches `days` calendar days back.
    pub fn covering_days(days: i64) -> Self {
        match days {
            ..=31 => Range::OneMonth,
            32..=92 => Range::ThreeMonths,
            93..=183 => Range::SixMonths,
            184..=366 => Range::OneYear,
            367..=731 => Range::TwoYears,
            732..=1827 => Range::FiveYears,
            _ => Range::Max,
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Range::OneMonth => "1mo",
            Range::ThreeMonths => "3mo",
            Range::SixMonths => "6mo",
            Range::OneYear => "1y",
            Range::TwoYears => "2y",
            Range::FiveYears => "5y",
            Range::Max => "max",
        };
        f.write_str(s)
    }
}

impl FromStr for Range {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1mo" => Ok(Range::OneMonth),
            "3mo" => Ok(Range::ThreeMonths),
            "6mo" => Ok(Range::SixMonths),
            "1y" => Ok(Range::OneYear),
            "2y" => Ok(Range::TwoYears),
            "5y" => Ok(Range::FiveYears),
            "max" => Ok(Range::Max),
            other => Err(format!("unknown chart range '{}'", other)),
        }
    }
}

/// Bar size. Only daily and weekly bars are used by the scanner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interval {
    #[default]
    OneDay,
    OneWeek,
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interval::OneDay => f.write_str("1d"),
            Interval::OneWeek => f.write_str("1wk"),
        }
    }
}

/// Parameters for a chart request.
#[derive(Clone, Debug)]
pub struct ChartQuery {
    pub range: Range,
    pub interval: Interval,
    pub include_adjusted_close: bool,
}

impl Default for ChartQuery {
    fn default() -> Self {
        Self {
            range: Range::OneYear,
            interval: Interval::OneDay,
            include_adjusted_close: true,
        }
    }
}

impl ChartQuery {
    pub fn with_range(mut self, range: Range) -> Self {
        self.range = range;
        self
    }

    pub fn with_interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_adjusted_close(mut self, include: bool) -> Self {
        self.include_adjusted_close = include;
        self
    }
}

impl Query for ChartQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("range", &self.range.to_string())
            .append_pair("interval", &self.interval.to_string())
            .append_pair(
                "includeAdjustedClose",
                if self.include_adjusted_close { "true" } else { "false" },
            );
        url
    }
}
