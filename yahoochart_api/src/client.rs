//! HTTP client for the Yahoo Finance chart endpoint.

use std::time::Duration;

use url::Url;

use crate::{
    query::{ChartQuery, Query},
    types::{ChartResponse, ChartResult},
    user_agent::get_user_agent,
    Error,
};

/// HTTP client for the Yahoo Finance v8 chart API.
///
/// Sends requests with browser-like headers and a randomized user agent.
/// Each request builds a fresh `reqwest::Client` with a 30-second timeout.
pub struct Client {
    /// Base URL for the API. Defaults to `https://query1.finance.yahoo.com`.
    base_api_url: String,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the production chart API.
    pub fn new() -> Self {
        Self {
            base_api_url: "https://query1.finance.yahoo.com".to_string(),
        }
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock
    /// and for self-hosted mirrors.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, symbol: &str, query: &impl Query) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_api_url).map_err(|e| {
            tracing::error!("Invalid base URL {}: {}", self.base_api_url, e);
            Error::RequestFailed
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                tracing::error!("Base URL cannot carry a path: {}", self.base_api_url);
                Error::RequestFailed
            })?
            .pop_if_empty()
            .extend(&["v8", "finance", "chart", symbol]);
        Ok(query.add_to_url(&url))
    }

    /// Fetches the chart series for one symbol.
    ///
    /// Yahoo reports unknown or delisted symbols with a `chart.error` object,
    /// usually alongside HTTP 404; both shapes surface as [`Error::NoData`].
    pub async fn get_chart(&self, symbol: &str, query: &ChartQuery) -> Result<ChartResult, Error> {
        let url = self.get_url(symbol, query)?;
        tracing::debug!("GET {}", url);

        let client = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let resp = client
            .get(url)
            .header("accept", "application/json, text/plain, */*")
            .header("accept-language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get chart for {}: {}", symbol, e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            if let Some(err) = serde_json::from_str::<ChartResponse>(&body)
                .ok()
                .and_then(|parsed| parsed.chart.error)
            {
                return Err(Error::NoData {
                    symbol: symbol.to_string(),
                    reason: err.description,
                });
            }
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed = serde_json::from_str::<ChartResponse>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse chart: {} | body: {}", e, snippet);
            Error::RequestFailed
        })?;

        if let Some(err) = parsed.chart.error {
            return Err(Error::NoData {
                symbol: symbol.to_string(),
                reason: err.description,
            });
        }

        parsed
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| Error::NoData {
                symbol: symbol.to_string(),
                reason: "empty result".to_string(),
            })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
