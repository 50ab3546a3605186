//! Bridge configuration.

use std::time::Duration;

use tracker_core::agent::{DEFAULT_FALLBACK_TIMEOUT, openai};
use tracker_core::coingecko;

/// Default interface to bind.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default per-request timeout for market data calls.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the bridge server.
#[derive(Clone, Debug)]
pub struct BridgeConfig {
    /// Address to bind the HTTP listener (e.g. "0.0.0.0:8080").
    pub bind_addr: String,
    /// API key for the conversational agent. Without it every fallback
    /// yields the canned reply.
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub coingecko_base_url: String,
    /// Optional CoinGecko demo key.
    pub coingecko_api_key: Option<String>,
    /// Deadline for the conversational fallback.
    pub fallback_timeout: Duration,
    /// Timeout for each CoinGecko request.
    pub http_timeout: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            bind_addr: format!("{DEFAULT_HOST}:{DEFAULT_PORT}"),
            openai_api_key: None,
            openai_model: openai::DEFAULT_MODEL.into(),
            openai_base_url: openai::DEFAULT_BASE_URL.into(),
            coingecko_base_url: coingecko::DEFAULT_BASE_URL.into(),
            coingecko_api_key: None,
            fallback_timeout: DEFAULT_FALLBACK_TIMEOUT,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }
}

impl BridgeConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                | Default                            |
    /// |-------------------------|------------------------------------|
    /// | `HOST`                  | `0.0.0.0`                          |
    /// | `PORT`                  | `8080`                             |
    /// | `OPENAI_API_KEY`        | unset                              |
    /// | `OPENAI_MODEL`          | `gpt-4o-mini`                      |
    /// | `OPENAI_BASE_URL`       | `https://api.openai.com/v1`        |
    /// | `COINGECKO_BASE_URL`    | `https://api.coingecko.com/api/v3` |
    /// | `COINGECKO_API_KEY`     | unset                              |
    /// | `FALLBACK_TIMEOUT_SECS` | `7`                                |
    /// | `HTTP_TIMEOUT_SECS`     | `10`                               |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading from `lookup`.
    /// Unparseable numbers fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.into());
        let port = lookup("PORT")
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let secs = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(default)
        };

        Self {
            bind_addr: format!("{host}:{port}"),
            openai_api_key: lookup("OPENAI_API_KEY").filter(|k| !k.is_empty()),
            openai_model: lookup("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            openai_base_url: lookup("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            coingecko_base_url: lookup("COINGECKO_BASE_URL")
                .unwrap_or(defaults.coingecko_base_url),
            coingecko_api_key: lookup("COINGECKO_API_KEY").filter(|k| !k.is_empty()),
            fallback_timeout: secs("FALLBACK_TIMEOUT_SECS", defaults.fallback_timeout),
            http_timeout: secs("HTTP_TIMEOUT_SECS", defaults.http_timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = BridgeConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.fallback_timeout, Duration::from_secs(7));
        assert_eq!(config.openai_model, "gpt-4o-mini");
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn env_values_override_defaults() {
        let config = BridgeConfig::from_lookup(lookup_from(&[
            ("PORT", "3000"),
            ("HOST", "127.0.0.1"),
            ("OPENAI_API_KEY", "sk-test"),
            ("FALLBACK_TIMEOUT_SECS", "2"),
        ]));
        assert_eq!(config.bind_addr, "127.0.0.1:3000");
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.fallback_timeout, Duration::from_secs(2));
    }

    #[test]
    fn bad_numbers_fall_back() {
        let config = BridgeConfig::from_lookup(lookup_from(&[
            ("PORT", "eighty"),
            ("HTTP_TIMEOUT_SECS", "-1"),
            ("OPENAI_API_KEY", ""),
        ]));
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.http_timeout, DEFAULT_HTTP_TIMEOUT);
        assert!(config.openai_api_key.is_none());
    }
}
