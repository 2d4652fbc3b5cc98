//! Print the watchlist a scan would use.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    Text,
    Json,
}

#[derive(Args)]
pub struct WatchlistArgs {
    /// Watchlist YAML file (defaults to the built-in list)
    #[arg(long)]
    pub watchlist: Option<PathBuf>,

    /// Comma-separated symbols, overrides --watchlist
    #[arg(long, conflicts_with = "watchlist")]
    pub tickers: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: ListFormat,
}

pub fn run(args: &WatchlistArgs) -> Result<()> {
    let entries = super::resolve_watchlist(args.watchlist.as_deref(), args.tickers.as_deref())?;
    match args.format {
        ListFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        ListFormat::Text => {
            for entry in &entries {
                match &entry.name {
                    Some(name) => println!("{}\t{}", entry.symbol, name),
                    None => println!("{}", entry.symbol),
                }
            }
        }
    }
    Ok(())
}
