//! Watchlist loading.
//!
//! The default list is compiled in from `seed_data/watchlist.yml`; a YAML
//! file of the same shape, or a plain list of symbols, can replace it.

use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for watchlist operations.
#[derive(Error, Debug)]
pub enum WatchlistError {
    #[error("Failed to parse watchlist YAML: {0}")]
    YamlParse(#[from] serde_yml::Error),
    #[error("Failed to read watchlist file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid ticker symbol: {0:?}")]
    InvalidSymbol(String),
    #[error("Duplicate ticker in watchlist: {0}")]
    Duplicate(String),
    #[error("Watchlist is empty")]
    Empty,
}

/// Top-level structure for the watchlist YAML file.
#[derive(Deserialize, Debug)]
pub struct WatchlistFile {
    pub tickers: Vec<WatchEntry>,
}

/// One ticker to scan. `name` is shown by the front-end; when absent the
/// symbol itself is used.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct WatchEntry {
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl WatchEntry {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.symbol)
    }
}

fn symbol_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z0-9^][A-Z0-9.\-=^]{0,19}$").expect("valid regex"))
}

/// Trim and upper-case a symbol, rejecting anything that is not a plausible ticker.
pub fn normalize_symbol(raw: &str) -> Result<String, WatchlistError> {
    let symbol = raw.trim().to_uppercase();
    if symbol_pattern().is_match(&symbol) {
        Ok(symbol)
    } else {
        Err(WatchlistError::InvalidSymbol(raw.to_string()))
    }
}

fn finalize(entries: Vec<WatchEntry>) -> Result<Vec<WatchEntry>, WatchlistError> {
    if entries.is_empty() {
        return Err(WatchlistError::Empty);
    }
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(entries.len());
    for entry in entries {
        let symbol = normalize_symbol(&entry.symbol)?;
        if !seen.insert(symbol.clone()) {
            return Err(WatchlistError::Duplicate(symbol));
        }
        let name = entry
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        out.push(WatchEntry { symbol, name });
    }
    Ok(out)
}

/// Parse a watchlist from YAML content.
pub fn parse_watchlist(yaml_content: &str) -> Result<Vec<WatchEntry>, WatchlistError> {
    let file: WatchlistFile = serde_yml::from_str(yaml_content)?;
    finalize(file.tickers)
}

/// Load the watchlist embedded at compile time.
pub fn load_default_watchlist() -> Result<Vec<WatchEntry>, WatchlistError> {
    let yaml_content = include_str!("../seed_data/watchlist.yml");
    parse_watchlist(yaml_content)
}

/// Load a watchlist YAML file from disk.
pub fn load_watchlist_file(path: &Path) -> Result<Vec<WatchEntry>, WatchlistError> {
    let content = std::fs::read_to_string(path)?;
    parse_watchlist(&content)
}

/// Build a watchlist from bare symbols, e.g. a comma-separated flag value.
pub fn from_symbols<I, S>(symbols: I) -> Result<Vec<WatchEntry>, WatchlistError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let entries = symbols
        .into_iter()
        .filter(|s| !s.as_ref().trim().is_empty())
        .map(|s| WatchEntry::new(s.as_ref()))
        .collect();
    finalize(entries)
}
