//! Market data collaborators — coin search and spot quotes.
//!
//! Both are remote services; the traits exist so the resolver and the price
//! fetcher can be driven by any backend (CoinGecko in production).

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Errors returned by market data backends.
#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response parse error: {0}")]
    Parse(String),
}

/// One candidate returned by a coin search, in relevance order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchCoin {
    /// Identifier understood by the quote service (e.g. `"bitcoin"`).
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

/// Free-text coin search.
#[async_trait]
pub trait CoinSearch: Send + Sync {
    /// Search for coins matching `query`. Results keep the backend's ordering.
    async fn search(&self, query: &str) -> Result<Vec<SearchCoin>, MarketDataError>;
}

/// Spot price lookup for a single coin.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Current price of `coin_id` in `currency`, or `None` when the response
    /// carries no such field.
    async fn simple_price(
        &self,
        coin_id: &str,
        currency: &str,
    ) -> Result<Option<f64>, MarketDataError>;
}
