//! Market Data Source Module
//! Fetches the market list from the remote HTTP endpoint.

use super::MarketRecord;
use std::time::Duration;
use thiserror::Error;

/// Default CoinGecko markets endpoint (USD quoted).
pub const DEFAULT_ENDPOINT: &str = "https://api.coingecko.com/api/v3/coins/markets?vs_currency=usd";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unexpected status: {0}")]
    Status(u16),
    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Anything that can produce a full market snapshot.
///
/// Implementations are called from worker threads, one call per tick.
pub trait MarketSource: Send + Sync {
    fn fetch(&self) -> Result<Vec<MarketRecord>, FetchError>;
}

/// Market source backed by a blocking HTTP GET.
pub struct HttpMarketSource {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpMarketSource {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("coin_dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    #[cfg(test)]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl MarketSource for HttpMarketSource {
    fn fetch(&self) -> Result<Vec<MarketRecord>, FetchError> {
        let response = self.client.get(&self.endpoint).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        // Decode separately so a bad body is reported as Decode, not Http
        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_source_creation() {
        let source = HttpMarketSource::new(DEFAULT_ENDPOINT).unwrap();
        assert_eq!(source.endpoint(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_unreachable_endpoint_is_http_error() {
        // Port 9 (discard) on localhost is closed on test machines
        let source = HttpMarketSource::new("http://127.0.0.1:9/markets").unwrap();
        assert!(matches!(source.fetch(), Err(FetchError::Http(_))));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(FetchError::Status(429).to_string(), "Unexpected status: 429");
        let decode = serde_json::from_str::<Vec<MarketRecord>>("{").unwrap_err();
        assert!(FetchError::from(decode)
            .to_string()
            .starts_with("Malformed response body"));
    }
}
