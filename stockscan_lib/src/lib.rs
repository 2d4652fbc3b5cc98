//! Library layer for stockscan: price-history sources, indicator math,
//! record building, watchlist loading, and the sequential scanner.
//!
//! Wraps the `yahoochart_api` crate and `yahoo_finance_api` behind a single
//! [`HistorySource`] trait so the scanner can run against either provider
//! (or a stub in tests).

pub mod error;
pub mod history;
pub mod indicators;
pub mod output;
pub mod record;
pub mod scanner;
pub mod settings;
pub mod source;
pub mod watchlist;

pub use error::ScanError;
pub use history::{Bar, PriceHistory};
pub use output::{read_records, validate_records, write_records};
pub use record::{build_record, LastTransaction, StockRecord};
pub use scanner::{ScanReport, Scanner, Skipped};
pub use settings::ScanSettings;
pub use source::{ChartClient, HistorySource, Provider, SourceError, YahooClient};
pub use watchlist::{WatchEntry, WatchlistError};
