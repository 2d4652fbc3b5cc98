//! Yahoo Finance history via the `yahoo_finance_api` crate.
//!
//! Fetches daily quotes between `today - lookback_days` and today and maps
//! them into [`PriceHistory`].

use chrono::{Duration, NaiveDate, Utc};
use time::OffsetDateTime;

use super::{HistorySource, SourceError};
use crate::history::{Bar, PriceHistory};

/// Convert chrono::NaiveDate to time::OffsetDateTime at UTC midnight.
pub fn date_to_offset_datetime(date: NaiveDate) -> Result<OffsetDateTime, SourceError> {
    let datetime = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| SourceError::InvalidDate(date.to_string()))?;

    OffsetDateTime::from_unix_timestamp(datetime.and_utc().timestamp())
        .map_err(|_| SourceError::InvalidDate(date.to_string()))
}

/// Convert a Unix timestamp to the calendar date at the given UTC offset.
pub fn timestamp_to_date(timestamp: i64, gmtoffset: i64) -> Option<NaiveDate> {
    chrono::DateTime::from_timestamp(timestamp.checked_add(gmtoffset)?, 0).map(|dt| dt.date_naive())
}

/// The `[start, end)` window covering the last `lookback_days` up to and including `today`.
pub fn lookback_window(today: NaiveDate, lookback_days: i64) -> (NaiveDate, NaiveDate) {
    let end = today + Duration::days(1);
    (end - Duration::days(lookback_days.max(1)), end)
}

/// Yahoo Finance client backed by `yahoo_finance_api::YahooConnector`.
pub struct YahooClient {
    connector: yahoo_finance_api::YahooConnector,
    lookback_days: i64,
}

impl YahooClient {
    /// Create a new YahooClient fetching `lookback_days` calendar days of history.
    pub fn new(lookback_days: i64) -> Result<Self, SourceError> {
        Ok(Self {
            connector: yahoo_finance_api::YahooConnector::new()?,
            lookback_days,
        })
    }
}

impl HistorySource for YahooClient {
    async fn daily_history(&self, symbol: &str) -> Result<PriceHistory, SourceError> {
        let (start, end) = lookback_window(Utc::now().date_naive(), self.lookback_days);
        tracing::debug!("Fetching {} from {} to {}", symbol, start, end);

        let response = self
            .connector
            .get_quote_history(
                symbol,
                date_to_offset_datetime(start)?,
                date_to_offset_datetime(end)?,
            )
            .await?;
        history_from_quotes(symbol, response.quotes()?)
    }
}

/// Map `yahoo_finance_api` quotes into bars. Quote timestamps are UTC, so the
/// date is taken at offset zero.
pub fn history_from_quotes(
    symbol: &str,
    quotes: Vec<yahoo_finance_api::Quote>,
) -> Result<PriceHistory, SourceError> {
    let mut bars = Vec::with_capacity(quotes.len());
    for quote in quotes {
        let date = i64::try_from(quote.timestamp)
            .ok()
            .and_then(|ts| timestamp_to_date(ts, 0))
            .ok_or_else(|| SourceError::Malformed {
                symbol: symbol.to_string(),
                reason: "quote timestamp out of range".to_string(),
            })?;
        bars.push(Bar {
            date,
            open: quote.open,
            high: quote.high,
            low: quote.low,
            close: quote.close,
            adj_close: Some(quote.adjclose),
            volume: quote.volume,
        });
    }

    if bars.is_empty() {
        return Err(SourceError::Empty(symbol.to_string()));
    }
    Ok(PriceHistory::new(symbol, bars))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use yahoo_finance_api::Quote;

    fn quote(timestamp: i64, close: f64, adjclose: f64, volume: u64) -> Quote {
        Quote {
            timestamp: timestamp.try_into().unwrap(),
            open: close - 1.0,
            high: close + 2.0,
            low: close - 3.0,
            volume,
            close,
            adjclose,
        }
    }

    #[test]
    fn test_quotes_map_to_bars() {
        let history = history_from_quotes(
            "2330.TW",
            vec![quote(1717117200, 832.0, 822.1, 41_210_000)],
        )
        .unwrap();
        assert_eq!(history.symbol, "2330.TW");
        let bar = &history.bars()[0];
        assert_eq!(bar.date, NaiveDate::from_ymd_opt(2024, 5, 31).unwrap());
        assert_eq!(bar.open, 831.0);
        assert_eq!(bar.high, 834.0);
        assert_eq!(bar.low, 829.0);
        assert_eq!(bar.close, 832.0);
        assert_eq!(bar.adj_close, Some(822.1));
        assert_eq!(bar.volume, 41_210_000);
    }

    #[test]
    fn test_quotes_are_sorted_and_deduplicated() {
        // 2024-05-31 23:00 UTC stays on the 31st at offset zero.
        let history = history_from_quotes(
            "2330.TW",
            vec![
                quote(1717376400, 850.0, 850.0, 2),
                quote(1717117200, 832.0, 832.0, 1),
                quote(1717196400, 835.0, 835.0, 3),
            ],
        )
        .unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.closes(), vec![835.0, 850.0]);
        assert_eq!(history.volumes(), vec![3.0, 2.0]);
    }

    #[test]
    fn test_no_quotes_is_empty() {
        let err = history_from_quotes("2330.TW", Vec::new()).unwrap_err();
        assert!(matches!(err, SourceError::Empty(symbol) if symbol == "2330.TW"));
    }

    #[test]
    fn test_date_to_offset_datetime_basic() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let result = date_to_offset_datetime(date).unwrap();

        assert_eq!(result.year(), 2024);
        assert_eq!(result.month() as u32, 1);
        assert_eq!(result.day(), 15);
        assert_eq!(result.hour(), 0);
        assert_eq!(result.offset().whole_hours(), 0);
    }

    #[test]
    fn test_date_to_offset_datetime_epoch() {
        let date = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(date_to_offset_datetime(date).unwrap().unix_timestamp(), 0);
    }

    #[test]
    fn test_timestamp_to_date_uses_exchange_offset() {
        // 2024-05-31 01:00 UTC is 09:00 in Taipei on the same day.
        let ts = 1717117200;
        assert_eq!(
            timestamp_to_date(ts, 28800),
            NaiveDate::from_ymd_opt(2024, 5, 31)
        );
        // 2024-05-31 23:00 UTC rolls over to June 1st in Taipei.
        let late = 1717196400;
        assert_eq!(timestamp_to_date(late, 0).unwrap().day(), 31);
        assert_eq!(timestamp_to_date(late, 28800).unwrap().day(), 1);
    }

    #[test]
    fn test_lookback_window_covers_today() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let (start, end) = lookback_window(today, 365);
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 3, 11).unwrap());
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
    }

    #[test]
    fn test_lookback_window_clamps_non_positive() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let (start, end) = lookback_window(today, 0);
        assert_eq!(start, today);
        assert_eq!(end, today + Duration::days(1));
    }

    #[test]
    fn test_source_error_display() {
        let err = SourceError::InvalidDate("2024-13-01".to_string());
        assert!(err.to_string().contains("Invalid date"));

        let err = SourceError::Empty("2330.TW".to_string());
        assert!(err.to_string().contains("2330.TW"));

        let err = SourceError::Malformed {
            symbol: "2330.TW".to_string(),
            reason: "length mismatch".to_string(),
        };
        assert!(err.to_string().contains("length mismatch"));
    }
}
