mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "stockscan")]
#[command(about = "Scan a stock watchlist and write indicator data for the dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch history, compute indicators and write the JSON file
    Scan(commands::scan::ScanArgs),
    /// Verify an existing output file
    Check(commands::check::CheckArgs),
    /// Print the resolved watchlist
    Watchlist(commands::watchlist::WatchlistArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("stockscan=info".parse().unwrap())
                .add_directive("yahoochart_api=warn".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Scan(args) => commands::scan::run(args).await?,
        Commands::Check(args) => commands::check::run(args)?,
        Commands::Watchlist(args) => commands::watchlist::run(args)?,
    }

    Ok(())
}
