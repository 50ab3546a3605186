//! CoinGecko client.
//!
//! Implements [`CoinSearch`] over `GET /search?query=` and [`QuoteSource`]
//! over `GET /simple/price?ids=&vs_currencies=`. No retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::market::{CoinSearch, MarketDataError, QuoteSource, SearchCoin};

/// Public CoinGecko API root.
pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Header carrying a CoinGecko demo-plan key.
const API_KEY_HEADER: &str = "x-cg-demo-api-key";

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    coins: Vec<SearchCoin>,
}

/// HTTP client for the CoinGecko v3 API.
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinGeckoClient {
    /// Build a client against `base_url` with a per-request timeout.
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, MarketDataError> {
        let parsed: Url = base_url
            .parse()
            .map_err(|_| MarketDataError::InvalidBaseUrl(base_url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(MarketDataError::InvalidBaseUrl(base_url.to_string()));
        }

        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Response, MarketDataError> {
        let mut req = self.http.get(self.endpoint(path)).query(query);
        if let Some(key) = &self.api_key {
            req = req.header(API_KEY_HEADER, key);
        }

        let resp = req.send().await?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(MarketDataError::Status { status, body });
        }
        Ok(resp)
    }
}

#[async_trait]
impl CoinSearch for CoinGeckoClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchCoin>, MarketDataError> {
        let resp = self.get("search", &[("query", query)]).await?;
        let data: SearchResponse = resp
            .json()
            .await
            .map_err(|e| MarketDataError::Parse(e.to_string()))?;

        debug!(query, candidates = data.coins.len(), "coingecko search");
        Ok(data.coins)
    }
}

#[async_trait]
impl QuoteSource for CoinGeckoClient {
    async fn simple_price(
        &self,
        coin_id: &str,
        currency: &str,
    ) -> Result<Option<f64>, MarketDataError> {
        let resp = self
            .get("simple/price", &[("ids", coin_id), ("vs_currencies", currency)])
            .await?;
        let data: Value = resp
            .json()
            .await
            .map_err(|e| MarketDataError::Parse(e.to_string()))?;

        let price = extract_price(&data, coin_id, currency);
        debug!(coin_id, currency, ?price, "coingecko simple price");
        Ok(price)
    }
}

/// Pull `{coin_id: {currency: price}}` out of a simple-price payload.
fn extract_price(data: &Value, coin_id: &str, currency: &str) -> Option<f64> {
    data.get(coin_id)?.get(currency)?.as_f64()
}
