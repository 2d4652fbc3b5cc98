//! Error types for the library layer.

use std::fmt;

use crate::source::SourceError;
use crate::watchlist::WatchlistError;

/// Errors produced while scanning a ticker or writing the result file.
///
/// Per-ticker variants (`Source`, `InsufficientHistory`) are caught by the
/// scanner and turned into skip entries; the rest abort the run.
#[derive(Debug)]
pub enum ScanError {
    /// The history source failed for this ticker.
    Source(SourceError),
    /// Fewer rows than the configured minimum were returned.
    InsufficientHistory {
        symbol: String,
        rows: usize,
        required: usize,
    },
    /// Reading or writing the output file failed.
    Io(std::io::Error),
    /// JSON serialization or deserialization failed.
    Serialization(serde_json::Error),
    /// The watchlist could not be loaded.
    InvalidWatchlist(WatchlistError),
    /// A record carries non-finite numeric fields.
    InvalidRecord { id: String, fields: Vec<String> },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source(e) => write!(f, "Source error: {}", e),
            Self::InsufficientHistory {
                symbol,
                rows,
                required,
            } => write!(
                f,
                "Insufficient history for {}: {} trading days, need {}",
                symbol, rows, required
            ),
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::InvalidWatchlist(e) => write!(f, "Invalid watchlist: {}", e),
            Self::InvalidRecord { id, fields } => write!(
                f,
                "Record {} has non-finite fields: {}",
                id,
                fields.join(", ")
            ),
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Source(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Serialization(e) => Some(e),
            Self::InvalidWatchlist(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SourceError> for ScanError {
    fn from(e: SourceError) -> Self {
        Self::Source(e)
    }
}

impl From<std::io::Error> for ScanError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ScanError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}

impl From<WatchlistError> for ScanError {
    fn from(e: WatchlistError) -> Self {
        Self::InvalidWatchlist(e)
    }
}
