//! Error types for the chart client.

/// Errors that can occur when requesting chart data.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or unparseable body).
    #[error("Request failed")]
    RequestFailed,
    /// The endpoint returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The endpoint answered but carried no usable series for the symbol.
    #[error("No chart data for {symbol}: {reason}")]
    NoData { symbol: String, reason: String },
}
