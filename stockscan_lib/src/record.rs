//! The per-ticker output record and how it is computed from a history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ScanError;
use crate::history::PriceHistory;
use crate::indicators::{
    self, HIGH_52W_WINDOW, K_SMOOTHING, MA_WINDOWS, RSV_PERIOD, VOLUME_AVG_WINDOW,
};
use crate::settings::ScanSettings;
use crate::watchlist::WatchEntry;

/// A past trade the front-end can show for "re-entry after stop-loss" setups.
/// The scanner has no trade ledger, so it always writes `null`; the type
/// exists so hand-edited files still parse.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LastTransaction {
    pub action: String,
    pub date: NaiveDate,
    pub buy_cost: f64,
}

/// One element of the output array. Field names are part of the front-end contract.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockRecord {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub change_percent: f64,
    pub volume: u64,
    #[serde(rename = "avgVolume20")]
    pub avg_volume_20: u64,
    pub ma5: f64,
    pub ma20: f64,
    pub ma60: f64,
    pub ma200: f64,
    #[serde(rename = "high52w")]
    pub high_52w: f64,
    pub k_val: f64,
    pub d_val: f64,
    pub prev_k: f64,
    pub prev_d: f64,
    pub win_rate: u32,
    pub last_transaction: Option<LastTransaction>,
}

impl StockRecord {
    /// Names (as serialized) of any float fields that are NaN or infinite.
    pub fn non_finite_fields(&self) -> Vec<&'static str> {
        let fields = [
            ("price", self.price),
            ("changePercent", self.change_percent),
            ("ma5", self.ma5),
            ("ma20", self.ma20),
            ("ma60", self.ma60),
            ("ma200", self.ma200),
            ("high52w", self.high_52w),
            ("kVal", self.k_val),
            ("dVal", self.d_val),
            ("prevK", self.prev_k),
            ("prevD", self.prev_d),
        ];
        let mut bad: Vec<&'static str> = fields
            .iter()
            .filter(|(_, v)| !v.is_finite())
            .map(|(name, _)| *name)
            .collect();
        if let Some(tx) = &self.last_transaction {
            if !tx.buy_cost.is_finite() {
                bad.push("lastTransaction.buyCost");
            }
        }
        bad
    }
}

/// Round to two decimals, clamping NaN, infinities and missing values to zero.
pub fn round2(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => {
            let rounded = (v * 100.0).round() / 100.0;
            if rounded.is_finite() {
                // -0.0 -> 0.0
                rounded + 0.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

/// Truncate a volume figure to an integer, clamping non-finite or negative values to zero.
pub fn whole_volume(value: Option<f64>) -> u64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v.trunc() as u64,
        _ => 0,
    }
}

/// The short id the front-end keys on: Taiwan market suffixes are dropped.
pub fn display_id(symbol: &str) -> &str {
    symbol
        .strip_suffix(".TWO")
        .or_else(|| symbol.strip_suffix(".TW"))
        .unwrap_or(symbol)
}

/// Compute the record for one ticker.
///
/// Fails with [`ScanError::InsufficientHistory`] when the history is shorter
/// than `settings.required_rows()`. Every numeric field of a returned record
/// is finite.
pub fn build_record(
    entry: &WatchEntry,
    history: &PriceHistory,
    settings: &ScanSettings,
) -> Result<StockRecord, ScanError> {
    let required = settings.required_rows();
    if history.len() < required {
        return Err(ScanError::InsufficientHistory {
            symbol: entry.symbol.clone(),
            rows: history.len(),
            required,
        });
    }

    let closes = history.closes();
    let highs = history.highs();
    let lows = history.lows();
    let volumes = history.volumes();
    let n = closes.len();

    let price = closes[n - 1];
    let prev_close = closes[n - 2];
    let [ma5, ma20, ma60, ma200] = MA_WINDOWS.map(|w| round2(indicators::last_mean(&closes, w)));
    let kd = indicators::stochastic(&highs, &lows, &closes, RSV_PERIOD, K_SMOOTHING);

    Ok(StockRecord {
        id: display_id(&entry.symbol).to_string(),
        name: entry.display_name().to_string(),
        price: round2(Some(price)),
        change_percent: round2(Some(indicators::change_percent(price, prev_close))),
        volume: whole_volume(volumes.last().copied()),
        avg_volume_20: whole_volume(indicators::last_mean(&volumes, VOLUME_AVG_WINDOW)),
        ma5,
        ma20,
        ma60,
        ma200,
        high_52w: round2(indicators::trailing_high(&highs, HIGH_52W_WINDOW)),
        k_val: round2(kd.k),
        d_val: round2(kd.d),
        prev_k: round2(kd.prev_k),
        prev_d: round2(kd.prev_d),
        win_rate: settings.win_rate,
        last_transaction: None,
    })
}
