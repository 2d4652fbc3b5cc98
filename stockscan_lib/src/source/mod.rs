//! Daily price-history sources.
//!
//! Two providers sit behind [`HistorySource`]: [`YahooClient`] uses the
//! `yahoo_finance_api` crate (which handles Yahoo's cookie/crumb handshake),
//! and [`ChartClient`] calls the chart endpoint directly through
//! `yahoochart_api`, which makes it usable against a mirror or a mock server.

pub mod chart;
pub mod error;
pub mod yahoo;

pub use chart::ChartClient;
pub use error::SourceError;
pub use yahoo::YahooClient;

use crate::history::PriceHistory;

/// Something that can produce daily bars for a symbol.
#[allow(async_fn_in_trait)]
pub trait HistorySource {
    async fn daily_history(&self, symbol: &str) -> Result<PriceHistory, SourceError>;
}

/// Provider selected on the command line.
pub enum Provider {
    Yahoo(YahooClient),
    Chart(ChartClient),
}

impl Provider {
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Yahoo(_) => "yahoo",
            Provider::Chart(_) => "chart",
        }
    }
}

impl HistorySource for Provider {
    async fn daily_history(&self, symbol: &str) -> Result<PriceHistory, SourceError> {
        match self {
            Provider::Yahoo(client) => client.daily_history(symbol).await,
            Provider::Chart(client) => client.daily_history(symbol).await,
        }
    }
}

impl<S: HistorySource> HistorySource for &S {
    async fn daily_history(&self, symbol: &str) -> Result<PriceHistory, SourceError> {
        (**self).daily_history(symbol).await
    }
}
