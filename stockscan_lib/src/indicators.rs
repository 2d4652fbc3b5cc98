//! Rolling-window indicator math over daily series.
//!
//! Rolling functions use full-window semantics: the output at index `i` is
//! `Some` only when `window` observations end at `i`. Arithmetic on
//! non-finite inputs is not guarded here; callers sanitize at the record
//! boundary.

/// Volume average window (sessions).
pub const VOLUME_AVG_WINDOW: usize = 20;
/// Moving-average windows reported per record.
pub const MA_WINDOWS: [usize; 4] = [5, 20, 60, 200];
/// Sessions in a 52-week year.
pub const HIGH_52W_WINDOW: usize = 252;
/// Lookback for the raw stochastic value.
pub const RSV_PERIOD: usize = 9;
/// Smoothing applied to RSV to obtain K.
pub const K_SMOOTHING: usize = 3;

fn rolling<F>(values: &[f64], window: usize, f: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> f64,
{
    if window == 0 {
        return vec![None; values.len()];
    }
    let mut out = vec![None; values.len()];
    for (i, w) in values.windows(window).enumerate() {
        out[i + window - 1] = Some(f(w));
    }
    out
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, mean)
}

pub fn rolling_max(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, max)
}

pub fn rolling_min(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, min)
}

/// Rolling mean over a series with gaps. A window containing any gap is a gap.
pub fn smooth(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }
    let mut out = vec![None; values.len()];
    for (i, w) in values.windows(window).enumerate() {
        let full: Option<Vec<f64>> = w.iter().copied().collect();
        out[i + window - 1] = full.map(|v| mean(&v));
    }
    out
}

/// Mean of the last `window` values, or `None` if there are fewer.
pub fn last_mean(values: &[f64], window: usize) -> Option<f64> {
    if window == 0 || values.len() < window {
        return None;
    }
    Some(mean(&values[values.len() - window..]))
}

/// Highest value over the last `window` observations, using whatever is
/// available when the series is shorter than the window.
pub fn trailing_high(values: &[f64], window: usize) -> Option<f64> {
    if values.is_empty() || window == 0 {
        return None;
    }
    let start = values.len().saturating_sub(window);
    Some(max(&values[start..]))
}

/// Percentage change from `prev` to `last`. Non-finite when `prev` is zero.
pub fn change_percent(last: f64, prev: f64) -> f64 {
    (last - prev) / prev * 100.0
}

/// Raw stochastic value: where the close sits inside the `period`-session
/// high/low range, on a 0-100 scale. `None` while the window fills and on a
/// flat range.
pub fn rsv(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let high_max = rolling_max(highs, period);
    let low_min = rolling_min(lows, period);
    closes
        .iter()
        .zip(high_max.iter().zip(low_min.iter()))
        .map(|(&close, (hi, lo))| match (hi, lo) {
            (Some(hi), Some(lo)) if hi - lo != 0.0 => Some((close - lo) / (hi - lo) * 100.0),
            _ => None,
        })
        .collect()
}

/// Simplified KD: K is RSV smoothed by a plain mean, and D is taken equal to K.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stochastic {
    pub k: Option<f64>,
    pub d: Option<f64>,
    pub prev_k: Option<f64>,
    pub prev_d: Option<f64>,
}

pub fn stochastic(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    rsv_period: usize,
    smoothing: usize,
) -> Stochastic {
    let k_series = smooth(&rsv(highs, lows, closes, rsv_period), smoothing);
    let n = k_series.len();
    let k = n.checked_sub(1).and_then(|i| k_series[i]);
    let prev_k = n.checked_sub(2).and_then(|i| k_series[i]);
    Stochastic {
        k,
        d: k,
        prev_k,
        prev_d: prev_k,
    }
}
