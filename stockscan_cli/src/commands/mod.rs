//! CLI subcommand implementations.

pub mod check;
pub mod scan;
pub mod watchlist;

use std::path::Path;

use anyhow::{Context, Result};
use stockscan_lib::watchlist::{
    from_symbols, load_default_watchlist, load_watchlist_file, WatchEntry,
};

/// Pick the watchlist: explicit symbols first, then a YAML file, then the
/// embedded default.
pub fn resolve_watchlist(file: Option<&Path>, tickers: Option<&str>) -> Result<Vec<WatchEntry>> {
    if let Some(tickers) = tickers {
        return from_symbols(tickers.split(','))
            .with_context(|| format!("invalid --tickers value '{}'", tickers));
    }
    if let Some(path) = file {
        return load_watchlist_file(path)
            .with_context(|| format!("failed to load watchlist {}", path.display()));
    }
    Ok(load_default_watchlist()?)
}
