//! Daily price history as returned by a [`crate::HistorySource`].

use chrono::NaiveDate;

/// One trading session.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Split/dividend-adjusted close, when the provider reports one.
    pub adj_close: Option<f64>,
    pub volume: u64,
}

/// Daily bars for one symbol, ordered oldest to newest with at most one bar per date.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceHistory {
    pub symbol: String,
    bars: Vec<Bar>,
}

impl PriceHistory {
    /// Build a history from bars in any order. Bars are sorted by date; when
    /// the provider repeats a date (the live session is often appended a
    /// second time) the later bar wins.
    pub fn new(symbol: impl Into<String>, mut bars: Vec<Bar>) -> Self {
        bars.sort_by_key(|b| b.date);
        let mut deduped: Vec<Bar> = Vec::with_capacity(bars.len());
        for bar in bars {
            match deduped.last_mut() {
                Some(last) if last.date == bar.date => *last = bar,
                _ => deduped.push(bar),
            }
        }
        Self {
            symbol: symbol.into(),
            bars: deduped,
        }
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume as f64).collect()
    }

    /// Rescale open/high/low by `adj_close / close` and replace close with the
    /// adjusted close. Bars without a usable adjusted close are left as-is.
    pub fn auto_adjusted(mut self) -> Self {
        for bar in &mut self.bars {
            let Some(adj) = bar.adj_close else { continue };
            if !adj.is_finite() || bar.close == 0.0 || !bar.close.is_finite() {
                continue;
            }
            let ratio = adj / bar.close;
            bar.open *= ratio;
            bar.high *= ratio;
            bar.low *= ratio;
            bar.close = adj;
        }
        self
    }
}
