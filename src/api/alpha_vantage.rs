//! Alpha Vantage API client

use crate::config::AssistantConfig;
use crate::error::{AssistantError, Result};
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

const BASE_URL: &str = "https://www.alphavantage.co/query";

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Current quote for a symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalQuote {
    pub symbol: String,
    pub price: f64,
    /// Raw change amount as reported by the API ("N/A" when absent)
    pub change: String,
    /// Change percent with the trailing `%` stripped ("N/A" when absent)
    pub change_percent: String,
}

/// Single intraday OHLCV bar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntradayBar {
    pub timestamp: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Narrow seam over the quote source so the market-data tool can be
/// tested without network access
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetch the current quote for a ticker
    async fn global_quote(&self, symbol: &str) -> Result<GlobalQuote>;

    /// Fetch the most recent intraday bar for a ticker at an interval
    async fn latest_intraday(&self, symbol: &str, interval: &str) -> Result<IntradayBar>;
}

/// Alpha Vantage HTTP client
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
    rate_limiter: SharedRateLimiter,
}

impl AlphaVantageClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `api_key` - Alpha Vantage API key
    /// * `rate_limit` - Maximum requests per minute (free tier: 5)
    /// * `timeout` - Per-request timeout
    pub fn new(api_key: impl Into<String>, rate_limit: u32, timeout: Duration) -> Result<Self> {
        let quota =
            Quota::per_minute(NonZeroU32::new(rate_limit).unwrap_or(NonZeroU32::new(5).unwrap()));
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            rate_limiter,
        })
    }

    /// Create a client from an `AssistantConfig`.
    ///
    /// A missing key yields a client whose requests would be rejected by
    /// the API; callers gate on `AssistantConfig::has_api_key` before
    /// issuing requests, so the unauthenticated path is never exercised.
    pub fn from_config(config: &AssistantConfig) -> Result<Self> {
        Self::new(
            config.api_key.clone().unwrap_or_default(),
            config.rate_limit_per_minute,
            config.request_timeout,
        )
    }

    async fn query(&self, params: &HashMap<&str, &str>) -> Result<serde_json::Value> {
        // Wait for rate limiter
        self.rate_limiter.until_ready().await;

        let response = self.client.get(BASE_URL).query(params).send().await?;

        if !response.status().is_success() {
            return Err(AssistantError::ApiError(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let data: serde_json::Value = response.json().await?;
        check_payload(&data)?;

        Ok(data)
    }
}

/// Reject error payloads the API reports inside a 200 response
fn check_payload(data: &serde_json::Value) -> Result<()> {
    if let Some(error) = data.get("Error Message").and_then(|v| v.as_str()) {
        return Err(AssistantError::ApiError(error.to_string()));
    }

    if data.get("Note").is_some() {
        return Err(AssistantError::RateLimitExceeded {
            provider: "Alpha Vantage".to_string(),
        });
    }

    Ok(())
}

/// Extract the current quote from a `GLOBAL_QUOTE` payload
fn parse_global_quote(symbol: &str, data: &serde_json::Value) -> Result<GlobalQuote> {
    let quote = data
        .get("Global Quote")
        .and_then(|v| v.as_object())
        .filter(|o| !o.is_empty())
        .ok_or_else(|| AssistantError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: "no quote in response".to_string(),
        })?;

    let price = quote
        .get("05. price")
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| AssistantError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: "missing price field".to_string(),
        })?;

    let change = quote
        .get("09. change")
        .and_then(|v| v.as_str())
        .unwrap_or("N/A")
        .to_string();

    let change_percent = quote
        .get("10. change percent")
        .and_then(|v| v.as_str())
        .unwrap_or("N/A")
        .trim_end_matches('%')
        .to_string();

    Ok(GlobalQuote {
        symbol: symbol.to_string(),
        price,
        change,
        change_percent,
    })
}

/// Extract the most recent bar from a `TIME_SERIES_INTRADAY` payload
fn parse_latest_bar(
    symbol: &str,
    interval: &str,
    data: &serde_json::Value,
) -> Result<IntradayBar> {
    let series_key = format!("Time Series ({})", interval);
    let series = data
        .get(&series_key)
        .and_then(|v| v.as_object())
        .ok_or_else(|| AssistantError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: "no intraday series in response".to_string(),
        })?;

    // Timestamps are "YYYY-MM-DD HH:MM:SS", so lexicographic order is
    // chronological and the max key is the most recent bar.
    let (timestamp, values) = series
        .iter()
        .max_by(|a, b| a.0.cmp(b.0))
        .ok_or_else(|| AssistantError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: "empty intraday series".to_string(),
        })?;

    let field = |key: &str| {
        values
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or("0")
            .parse::<f64>()
            .unwrap_or(0.0)
    };

    Ok(IntradayBar {
        timestamp: timestamp.clone(),
        open: field("1. open"),
        high: field("2. high"),
        low: field("3. low"),
        close: field("4. close"),
        volume: values
            .get("5. volume")
            .and_then(|v| v.as_str())
            .unwrap_or("0")
            .parse()
            .unwrap_or(0),
    })
}

#[async_trait]
impl QuoteProvider for AlphaVantageClient {
    async fn global_quote(&self, symbol: &str) -> Result<GlobalQuote> {
        let mut params = HashMap::new();
        params.insert("function", "GLOBAL_QUOTE");
        params.insert("symbol", symbol);
        params.insert("apikey", self.api_key.as_str());

        let data = self.query(&params).await?;
        parse_global_quote(symbol, &data)
    }

    async fn latest_intraday(&self, symbol: &str, interval: &str) -> Result<IntradayBar> {
        let mut params = HashMap::new();
        params.insert("function", "TIME_SERIES_INTRADAY");
        params.insert("symbol", symbol);
        params.insert("interval", interval);
        params.insert("apikey", self.api_key.as_str());

        let data = self.query(&params).await?;
        parse_latest_bar(symbol, interval, &data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_global_quote() {
        let data = json!({
            "Global Quote": {
                "05. price": "150.25",
                "09. change": "1.20",
                "10. change percent": "0.80%"
            }
        });

        let quote = parse_global_quote("AAPL", &data).unwrap();
        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.price, 150.25);
        assert_eq!(quote.change, "1.20");
        // The trailing percent sign is stripped.
        assert_eq!(quote.change_percent, "0.80");
    }

    #[test]
    fn test_parse_global_quote_missing_optional_fields() {
        let data = json!({
            "Global Quote": {
                "05. price": "98.10"
            }
        });

        let quote = parse_global_quote("TSLA", &data).unwrap();
        assert_eq!(quote.price, 98.10);
        assert_eq!(quote.change, "N/A");
        assert_eq!(quote.change_percent, "N/A");
    }

    #[test]
    fn test_parse_global_quote_empty_object() {
        // Unknown symbols come back as an empty "Global Quote" object.
        let data = json!({ "Global Quote": {} });

        let err = parse_global_quote("ZZZZ", &data).unwrap_err();
        assert!(matches!(
            err,
            AssistantError::DataUnavailable { ref symbol, .. } if symbol == "ZZZZ"
        ));
    }

    #[test]
    fn test_parse_global_quote_missing_price() {
        let data = json!({
            "Global Quote": {
                "09. change": "1.20"
            }
        });

        let err = parse_global_quote("AAPL", &data).unwrap_err();
        assert!(matches!(err, AssistantError::DataUnavailable { .. }));
    }

    #[test]
    fn test_check_payload_error_message() {
        let data = json!({ "Error Message": "Invalid API call" });

        let err = check_payload(&data).unwrap_err();
        assert!(matches!(
            err,
            AssistantError::ApiError(ref msg) if msg == "Invalid API call"
        ));
    }

    #[test]
    fn test_check_payload_note_is_rate_limit() {
        let data = json!({
            "Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute."
        });

        let err = check_payload(&data).unwrap_err();
        assert!(matches!(err, AssistantError::RateLimitExceeded { .. }));
    }

    #[test]
    fn test_check_payload_accepts_clean_response() {
        let data = json!({ "Global Quote": { "05. price": "1.0" } });
        assert!(check_payload(&data).is_ok());
    }

    #[test]
    fn test_parse_latest_bar_picks_newest_timestamp() {
        let data = json!({
            "Time Series (5min)": {
                "2026-08-24 15:45:00": {
                    "1. open": "149.00", "2. high": "149.50", "3. low": "148.90",
                    "4. close": "149.40", "5. volume": "90000"
                },
                "2026-08-24 15:55:00": {
                    "1. open": "150.10", "2. high": "150.40", "3. low": "149.95",
                    "4. close": "150.25", "5. volume": "120345"
                },
                "2026-08-24 15:50:00": {
                    "1. open": "149.40", "2. high": "150.15", "3. low": "149.30",
                    "4. close": "150.10", "5. volume": "110000"
                }
            }
        });

        let bar = parse_latest_bar("AAPL", "5min", &data).unwrap();
        assert_eq!(bar.timestamp, "2026-08-24 15:55:00");
        assert_eq!(bar.open, 150.10);
        assert_eq!(bar.high, 150.40);
        assert_eq!(bar.low, 149.95);
        assert_eq!(bar.close, 150.25);
        assert_eq!(bar.volume, 120_345);
    }

    #[test]
    fn test_parse_latest_bar_missing_series() {
        // Series key embeds the interval, so a mismatched interval is
        // indistinguishable from missing data.
        let data = json!({ "Time Series (5min)": {} });

        assert!(matches!(
            parse_latest_bar("AAPL", "15min", &data),
            Err(AssistantError::DataUnavailable { .. })
        ));
        assert!(matches!(
            parse_latest_bar("AAPL", "5min", &data),
            Err(AssistantError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn test_parse_latest_bar_malformed_fields_default_to_zero() {
        let data = json!({
            "Time Series (5min)": {
                "2026-08-24 15:55:00": {
                    "1. open": "not-a-number",
                    "5. volume": "also-not"
                }
            }
        });

        let bar = parse_latest_bar("AAPL", "5min", &data).unwrap();
        assert_eq!(bar.open, 0.0);
        assert_eq!(bar.close, 0.0);
        assert_eq!(bar.volume, 0);
    }

    #[test]
    fn test_client_creation() {
        let client = AlphaVantageClient::new("test_key", 5, Duration::from_secs(10)).unwrap();
        assert_eq!(client.api_key, "test_key");
    }

    #[test]
    fn test_zero_rate_limit_falls_back_to_free_tier() {
        // NonZeroU32 construction fails for 0; the client substitutes 5.
        let client = AlphaVantageClient::new("k", 0, Duration::from_secs(10));
        assert!(client.is_ok());
    }

    #[tokio::test]
    #[ignore] // Requires API key and network access
    async fn test_global_quote_live() {
        let config = AssistantConfig::default().with_env_api_key();
        let client = AlphaVantageClient::from_config(&config).unwrap();
        let quote = client.global_quote("AAPL").await.unwrap();
        assert_eq!(quote.symbol, "AAPL");
        assert!(quote.price > 0.0);
    }
}
