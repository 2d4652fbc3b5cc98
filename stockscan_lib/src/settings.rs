//! Scan settings with environment fallbacks.

use std::time::Duration;

pub const DEFAULT_MIN_HISTORY: usize = 200;
pub const DEFAULT_LOOKBACK_DAYS: i64 = 365;
pub const DEFAULT_WIN_RATE: u32 = 70;

/// Knobs for one scan run. Command-line flags override these after
/// [`ScanSettings::from_env`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScanSettings {
    /// Tickers with fewer trading days than this are skipped.
    pub min_history: usize,
    /// Calendar days of history requested from the provider.
    pub lookback_days: i64,
    /// Constant score written into every record's `winRate`.
    pub win_rate: u32,
    /// Scale OHLC by the adjusted close before computing indicators.
    pub auto_adjust: bool,
    /// Pause between consecutive tickers.
    pub delay: Duration,
    /// Mirror for the chart provider; `None` means the production endpoint.
    pub chart_base_url: Option<String>,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            min_history: DEFAULT_MIN_HISTORY,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            win_rate: DEFAULT_WIN_RATE,
            auto_adjust: true,
            delay: Duration::ZERO,
            chart_base_url: None,
        }
    }
}

impl ScanSettings {
    /// Defaults overridden by `STOCKSCAN_MIN_HISTORY`, `STOCKSCAN_LOOKBACK_DAYS`,
    /// `STOCKSCAN_WIN_RATE`, `STOCKSCAN_DELAY_MS` and `STOCKSCAN_CHART_BASE_URL`.
    /// Unparseable or blank values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());
        let defaults = Self::default();
        Self {
            min_history: parsed("STOCKSCAN_MIN_HISTORY")
                .map(|v| v as usize)
                .unwrap_or(defaults.min_history),
            lookback_days: parsed("STOCKSCAN_LOOKBACK_DAYS")
                .and_then(|v| i64::try_from(v).ok())
                .unwrap_or(defaults.lookback_days),
            win_rate: parsed("STOCKSCAN_WIN_RATE")
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(defaults.win_rate),
            auto_adjust: defaults.auto_adjust,
            delay: parsed("STOCKSCAN_DELAY_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.delay),
            chart_base_url: lookup("STOCKSCAN_CHART_BASE_URL")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        }
    }

    /// The effective row threshold. Two rows are always needed for a day-over-day change.
    pub fn required_rows(&self) -> usize {
        self.min_history.max(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_documented_values() {
        let s = ScanSettings::default();
        assert_eq!(s.min_history, 200);
        assert_eq!(s.lookback_days, 365);
        assert_eq!(s.win_rate, 70);
        assert!(s.auto_adjust);
        assert_eq!(s.delay, Duration::ZERO);
    }

    #[test]
    fn env_overrides_apply() {
        let s = ScanSettings::from_lookup(lookup_from(&[
            ("STOCKSCAN_MIN_HISTORY", "60"),
            ("STOCKSCAN_LOOKBACK_DAYS", "730"),
            ("STOCKSCAN_WIN_RATE", "75"),
            ("STOCKSCAN_DELAY_MS", "250"),
            ("STOCKSCAN_CHART_BASE_URL", " http://127.0.0.1:8080 "),
        ]));
        assert_eq!(s.min_history, 60);
        assert_eq!(s.lookback_days, 730);
        assert_eq!(s.win_rate, 75);
        assert_eq!(s.delay, Duration::from_millis(250));
        assert_eq!(s.chart_base_url.as_deref(), Some("http://127.0.0.1:8080"));
    }

    #[test]
    fn garbage_env_values_fall_back() {
        let s = ScanSettings::from_lookup(lookup_from(&[
            ("STOCKSCAN_MIN_HISTORY", "lots"),
            ("STOCKSCAN_WIN_RATE", "-5"),
            ("STOCKSCAN_CHART_BASE_URL", "   "),
        ]));
        assert_eq!(s, ScanSettings::default());
    }

    #[test]
    fn required_rows_never_below_two() {
        let s = ScanSettings {
            min_history: 0,
            ..ScanSettings::default()
        };
        assert_eq!(s.required_rows(), 2);
        assert_eq!(ScanSettings::default().required_rows(), 200);
    }
}
