//! Price and intraday lookups with caching and symbol resolution
//!
//! Every public operation here returns a user-facing string, never an
//! error: invalid input, missing credentials, unresolvable queries, and
//! remote failures all collapse into descriptive messages the chat layer
//! can show directly.

use crate::api::QuoteProvider;
use crate::cache::ResponseCache;
use crate::config::AssistantConfig;
use crate::error::AssistantError;
use crate::symbols::SymbolResolver;
use std::sync::Arc;

/// Intervals accepted by the intraday endpoint
const VALID_INTERVALS: &[&str] = &["1min", "5min", "15min", "30min", "60min"];

/// Static per-ticker blurbs for the info command
const COMPANY_INFO: &[(&str, &str)] = &[
    ("AAPL", "Apple Inc. - Technology, Founded 1976"),
    ("MSFT", "Microsoft Corporation - Technology, Founded 1975"),
    ("GOOGL", "Alphabet Inc. - Technology, Founded 1998"),
    ("AMZN", "Amazon.com Inc. - E-commerce/Cloud, Founded 1994"),
    ("TSLA", "Tesla Inc. - EV/Energy, Founded 2003"),
    ("NVDA", "NVIDIA Corporation - Semiconductors, Founded 1993"),
    ("META", "Meta Platforms - Social Media/Tech, Founded 2004"),
    ("INTC", "Intel Corporation - Semiconductors, Founded 1968"),
];

/// Market data lookups backed by a quote provider, a response cache, and
/// the symbol resolver
pub struct MarketData<P: QuoteProvider> {
    provider: P,
    cache: ResponseCache,
    resolver: SymbolResolver,
    config: Arc<AssistantConfig>,
}

impl<P: QuoteProvider> MarketData<P> {
    /// Create a market-data tool over an explicit provider
    pub fn new(provider: P, config: Arc<AssistantConfig>) -> Self {
        Self {
            provider,
            cache: ResponseCache::new(config.cache_ttl),
            resolver: SymbolResolver::with_strategy(config.match_strategy),
            config,
        }
    }

    /// Handle to the response cache (shared storage)
    pub fn cache(&self) -> ResponseCache {
        self.cache.clone()
    }

    /// Fetch the live price for a company name or ticker.
    ///
    /// Results are cached for the configured TTL under a key derived from
    /// the raw query, so "Apple" and "AAPL" occupy separate entries even
    /// though they resolve to the same ticker.
    pub async fn fetch_price(&self, query: &str) -> String {
        if query.trim().is_empty() {
            return "❌ Invalid query. Please provide a company name or stock ticker.".to_string();
        }

        if !self.config.has_api_key() {
            return "⚠️ Alpha Vantage API key not configured. Please set ALPHAVANTAGE_API_KEY in .env"
                .to_string();
        }

        // Resolution and the fetch run inside the cache's get_or_fetch,
        // so concurrent callers for the same key cannot double-fetch.
        // Failure messages come back as Err and are never cached.
        let cache_key = format!("price_{}", query.to_lowercase());
        let result = self
            .cache
            .get_or_fetch(cache_key, || async {
                let Some(symbol) = self.resolver.resolve(query) else {
                    return Err(format!(
                        "❌ Could not identify stock for '{}'. \
                         Try: AAPL, MSFT, GOOGL, or company names like Apple, Microsoft",
                        query
                    ));
                };

                match self.provider.global_quote(symbol).await {
                    Ok(quote) => {
                        let emoji = if quote.change_percent.starts_with('-') {
                            "📉"
                        } else {
                            "📈"
                        };
                        Ok(format!(
                            "{} {} is trading at ${:.2}, change: {} ({}%)",
                            emoji, symbol, quote.price, quote.change, quote.change_percent
                        ))
                    }
                    Err(err) => {
                        tracing::warn!(symbol, error = %err, "price fetch failed");
                        Err(render_fetch_error(err, symbol))
                    }
                }
            })
            .await;

        result.unwrap_or_else(|message| message)
    }

    /// Fetch the most recent intraday bar at the given interval.
    ///
    /// Intraday results are point-in-time snapshots and are not cached.
    pub async fn fetch_intraday(&self, query: &str, interval: &str) -> String {
        if query.trim().is_empty() {
            return "❌ Invalid query provided.".to_string();
        }

        // Interval gate comes before credentials, resolution, or any I/O.
        if !VALID_INTERVALS.contains(&interval) {
            return "❌ Invalid interval. Choose from: 1min, 5min, 15min, 30min, 60min".to_string();
        }

        if !self.config.has_api_key() {
            return "⚠️ Alpha Vantage API key not configured.".to_string();
        }

        let Some(symbol) = self.resolver.resolve(query) else {
            return format!("❌ Could not identify stock for '{}'.", query);
        };

        match self.provider.latest_intraday(symbol, interval).await {
            Ok(bar) => format!(
                "📊 {} Intraday ({}) - {}:\nOpen: ${}, High: ${}, Low: ${}, Close: ${}, Volume: {}",
                symbol, interval, bar.timestamp, bar.open, bar.high, bar.low, bar.close, bar.volume
            ),
            Err(err) => {
                tracing::warn!(symbol, interval, error = %err, "intraday fetch failed");
                format!("❌ Error fetching intraday data: {}", err)
            }
        }
    }

    /// Look up the static company blurb for a query
    pub fn company_info(&self, query: &str) -> String {
        if query.trim().is_empty() {
            return "❌ Invalid query provided.".to_string();
        }

        let Some(symbol) = self.resolver.resolve(query) else {
            return format!("❌ Could not identify stock for '{}'.", query);
        };

        match COMPANY_INFO.iter().find(|(s, _)| *s == symbol) {
            Some((_, info)) => format!("ℹ️ {}: {}", symbol, info),
            None => format!("ℹ️ {}: Stock ticker: {}", symbol, symbol),
        }
    }

    /// Drop all cached responses
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }
}

/// Map a provider error to the user-facing message for a price lookup
fn render_fetch_error(err: AssistantError, symbol: &str) -> String {
    match err {
        AssistantError::NetworkError(e) if e.is_timeout() => {
            "⏱️ Request timeout - Alpha Vantage server is slow, please try again.".to_string()
        }
        AssistantError::NetworkError(e) => format!("❌ Network error: {}", e),
        AssistantError::ApiError(msg) => format!("⚠️ API Error: {}", msg),
        AssistantError::RateLimitExceeded { provider } => {
            format!("⚠️ API Error: rate limit exceeded for {}", provider)
        }
        AssistantError::DataUnavailable { symbol, .. } => format!(
            "⚠️ Could not retrieve stock data for {}. Please try again.",
            symbol
        ),
        other => format!("❌ Error parsing data for {}: {}", symbol, other),
    }
}
