//! Error types for history sources.

use thiserror::Error;

/// Errors from fetching or decoding a price history.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("No price rows returned for {0}")]
    Empty(String),
    #[error("Malformed series for {symbol}: {reason}")]
    Malformed { symbol: String, reason: String },
    #[error(transparent)]
    Yahoo(#[from] yahoo_finance_api::YahooError),
    #[error(transparent)]
    Chart(#[from] yahoochart_api::Error),
}
