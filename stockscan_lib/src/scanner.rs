//! Sequential fetch-and-compute loop with per-ticker error isolation.

use tokio::time::sleep;

use crate::error::ScanError;
use crate::record::{build_record, StockRecord};
use crate::settings::ScanSettings;
use crate::source::HistorySource;
use crate::watchlist::WatchEntry;

/// A ticker that produced no record, with the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct Skipped {
    pub symbol: String,
    pub reason: String,
}

/// Outcome of a scan. `records` keeps watchlist order.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub records: Vec<StockRecord>,
    pub skipped: Vec<Skipped>,
}

pub struct Scanner<S> {
    source: S,
    settings: ScanSettings,
}

impl<S: HistorySource> Scanner<S> {
    pub fn new(source: S, settings: ScanSettings) -> Self {
        Self { source, settings }
    }

    /// Fetch and compute one ticker.
    pub async fn scan_one(&self, entry: &WatchEntry) -> Result<StockRecord, ScanError> {
        let mut history = self.source.daily_history(&entry.symbol).await?;
        if self.settings.auto_adjust {
            history = history.auto_adjusted();
        }
        build_record(entry, &history, &self.settings)
    }

    /// Scan every entry in order, one request at a time. A failing ticker is
    /// logged and reported in `skipped`; it never stops the run.
    pub async fn scan(&self, entries: &[WatchEntry]) -> ScanReport {
        let mut report = ScanReport::default();

        for (i, entry) in entries.iter().enumerate() {
            if i > 0 && !self.settings.delay.is_zero() {
                sleep(self.settings.delay).await;
            }

            match self.scan_one(entry).await {
                Ok(record) => {
                    tracing::info!("Processed {} | price {}", entry.symbol, record.price);
                    report.records.push(record);
                }
                Err(err @ ScanError::InsufficientHistory { .. }) => {
                    tracing::warn!("Skipping {}: {}", entry.symbol, err);
                    report.skipped.push(Skipped {
                        symbol: entry.symbol.clone(),
                        reason: err.to_string(),
                    });
                }
                Err(err) => {
                    tracing::warn!("Error on {}: {}", entry.symbol, err);
                    report.skipped.push(Skipped {
                        symbol: entry.symbol.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        report
    }
}
