//! History source backed by the `yahoochart_api` chart client.

use yahoochart_api::types::ChartResult;
use yahoochart_api::{ChartQuery, Client, Range};

use super::yahoo::timestamp_to_date;
use super::{HistorySource, SourceError};
use crate::history::{Bar, PriceHistory};

pub struct ChartClient {
    client: Client,
    query: ChartQuery,
}

impl ChartClient {
    /// Client against the production chart endpoint, one year of daily bars.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            query: ChartQuery::default(),
        }
    }

    /// Client against a custom base URL (mirror, or wiremock in tests).
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::with_base_url(base_url),
            query: ChartQuery::default(),
        }
    }

    pub fn with_range(mut self, range: Range) -> Self {
        self.query = self.query.with_range(range);
        self
    }

    /// Widen or narrow the request so it reaches `days` calendar days back.
    pub fn with_lookback_days(self, days: i64) -> Self {
        self.with_range(Range::covering_days(days))
    }

    pub fn range(&self) -> Range {
        self.query.range
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

impl Default for ChartClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HistorySource for ChartClient {
    async fn daily_history(&self, symbol: &str) -> Result<PriceHistory, SourceError> {
        let chart = self.client.get_chart(symbol, &self.query).await?;
        history_from_chart(symbol, chart)
    }
}

/// Turn the column-oriented chart payload into bars.
///
/// Sessions with a `null` close are dropped. Missing open/high/low fall back
/// to the close; a missing volume counts as zero.
pub fn history_from_chart(symbol: &str, chart: ChartResult) -> Result<PriceHistory, SourceError> {
    let malformed = |reason: &str| SourceError::Malformed {
        symbol: symbol.to_string(),
        reason: reason.to_string(),
    };

    let timestamps = chart.timestamp.unwrap_or_default();
    if timestamps.is_empty() {
        return Err(SourceError::Empty(symbol.to_string()));
    }
    let quote = chart
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| malformed("missing quote block"))?;
    if quote.close.len() != timestamps.len() {
        return Err(malformed("close column length differs from timestamps"));
    }
    let adjclose = chart
        .indicators
        .adjclose
        .and_then(|blocks| blocks.into_iter().next())
        .map(|block| block.adjclose)
        .unwrap_or_default();

    let gmtoffset = chart.meta.gmtoffset;

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let Some(close) = quote.close[i] else { continue };
        let date = timestamp_to_date(ts, gmtoffset)
            .ok_or_else(|| malformed("timestamp out of range"))?;
        bars.push(Bar {
            date,
            open: column(&quote.open, i).unwrap_or(close),
            high: column(&quote.high, i).unwrap_or(close),
            low: column(&quote.low, i).unwrap_or(close),
            close,
            adj_close: column(&adjclose, i),
            volume: quote.volume.get(i).copied().flatten().unwrap_or(0),
        });
    }

    if bars.is_empty() {
        return Err(SourceError::Empty(symbol.to_string()));
    }
    Ok(PriceHistory::new(symbol, bars))
}

fn column(col: &[Option<f64>], i: usize) -> Option<f64> {
    col.get(i).copied().flatten()
}
