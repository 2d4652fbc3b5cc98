//! The scan pipeline: watchlist -> history -> indicators -> JSON file.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Args, ValueEnum};
use stockscan_lib::output::DEFAULT_OUTPUT_PATH;
use stockscan_lib::{write_records, ChartClient, Provider, ScanSettings, Scanner, YahooClient};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProviderKind {
    /// Yahoo Finance through the yahoo_finance_api crate
    Yahoo,
    /// The v8 chart endpoint, optionally at a custom base URL
    Chart,
}

/// Scan CLI arguments.
#[derive(Args)]
pub struct ScanArgs {
    /// Output JSON path
    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Watchlist YAML file (defaults to the built-in list)
    #[arg(long)]
    pub watchlist: Option<PathBuf>,

    /// Comma-separated symbols, overrides --watchlist
    #[arg(long, conflicts_with = "watchlist")]
    pub tickers: Option<String>,

    /// Minimum trading days required (env: STOCKSCAN_MIN_HISTORY, default 200)
    #[arg(long)]
    pub min_history: Option<usize>,

    /// Calendar days of history to request (env: STOCKSCAN_LOOKBACK_DAYS, default 365)
    #[arg(long)]
    pub lookback_days: Option<i64>,

    /// Price data provider
    #[arg(long, value_enum, default_value = "yahoo")]
    pub provider: ProviderKind,

    /// Base URL for the chart provider (env: STOCKSCAN_CHART_BASE_URL)
    #[arg(long)]
    pub chart_base_url: Option<String>,

    /// Use unadjusted prices
    #[arg(long)]
    pub raw_prices: bool,

    /// Pause between tickers in milliseconds (env: STOCKSCAN_DELAY_MS, default 0)
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Constant score written to each record (env: STOCKSCAN_WIN_RATE, default 70)
    #[arg(long)]
    pub win_rate: Option<u32>,
}

/// Apply command-line overrides on top of environment-derived settings.
pub fn settings_from_args(args: &ScanArgs, mut settings: ScanSettings) -> ScanSettings {
    if let Some(min) = args.min_history {
        settings.min_history = min;
    }
    if let Some(days) = args.lookback_days {
        settings.lookback_days = days;
    }
    if let Some(ms) = args.delay_ms {
        settings.delay = Duration::from_millis(ms);
    }
    if let Some(rate) = args.win_rate {
        settings.win_rate = rate;
    }
    if args.raw_prices {
        settings.auto_adjust = false;
    }
    if let Some(url) = &args.chart_base_url {
        settings.chart_base_url = Some(url.clone());
    }
    settings
}

fn build_provider(kind: ProviderKind, settings: &ScanSettings) -> Result<Provider> {
    match kind {
        ProviderKind::Yahoo => Ok(Provider::Yahoo(
            YahooClient::new(settings.lookback_days)
                .map_err(|e| anyhow!("Failed to create Yahoo client: {}", e))?,
        )),
        ProviderKind::Chart => {
            let client = match &settings.chart_base_url {
                Some(url) => ChartClient::with_base_url(url),
                None => ChartClient::new(),
            };
            Ok(Provider::Chart(
                client.with_lookback_days(settings.lookback_days),
            ))
        }
    }
}

/// Run the scan and write the output file.
pub async fn run(args: &ScanArgs) -> Result<()> {
    let settings = settings_from_args(args, ScanSettings::from_env());
    let entries = super::resolve_watchlist(args.watchlist.as_deref(), args.tickers.as_deref())?;
    let provider = build_provider(args.provider, &settings)?;

    eprintln!(
        "Starting scan of {} tickers via {} (minimum {} trading days)",
        entries.len(),
        provider.name(),
        settings.required_rows()
    );

    let scanner = Scanner::new(provider, settings);
    let report = scanner.scan(&entries).await;

    write_records(&args.output, &report.records)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    if !report.skipped.is_empty() {
        eprintln!("Skipped {} tickers:", report.skipped.len());
        for skipped in &report.skipped {
            eprintln!("  {}: {}", skipped.symbol, skipped.reason);
        }
    }
    eprintln!("Scan complete: {} records written", report.records.len());
    eprintln!("Saved to {}", args.output.display());
    Ok(())
}
