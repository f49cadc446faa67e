//! Configuration for the stock assistant

use crate::error::{AssistantError, Result};
use crate::symbols::MatchStrategy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the assistant's data-fetching core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Alpha Vantage API key (optional; absence is a handled condition)
    pub api_key: Option<String>,

    /// TTL for cached price responses
    pub cache_ttl: Duration,

    /// Timeout for a single market-data request
    pub request_timeout: Duration,

    /// Maximum Alpha Vantage requests per minute
    pub rate_limit_per_minute: u32,

    /// Number of conversation pairs retained in memory
    pub max_memory_turns: usize,

    /// Alias matching policy for the symbol resolver
    pub match_strategy: MatchStrategy,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            cache_ttl: Duration::from_secs(60 * 60), // 60 minutes
            request_timeout: Duration::from_secs(10),
            rate_limit_per_minute: 5, // Alpha Vantage free tier
            max_memory_turns: 10,
            match_strategy: MatchStrategy::Substring,
        }
    }
}

impl AssistantConfig {
    /// Create a new configuration builder
    pub fn builder() -> AssistantConfigBuilder {
        AssistantConfigBuilder::default()
    }

    /// Load the Alpha Vantage API key from the environment
    pub fn with_env_api_key(mut self) -> Self {
        if let Ok(key) = std::env::var("ALPHAVANTAGE_API_KEY") {
            self.api_key = Some(key);
        }
        self
    }

    /// Whether a usable API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.rate_limit_per_minute == 0 {
            return Err(AssistantError::ConfigError(
                "rate_limit_per_minute must be greater than 0".to_string(),
            ));
        }

        if self.max_memory_turns == 0 {
            return Err(AssistantError::ConfigError(
                "max_memory_turns must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(AssistantError::ConfigError(
                "request_timeout must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for AssistantConfig
#[derive(Debug, Default)]
pub struct AssistantConfigBuilder {
    api_key: Option<String>,
    cache_ttl: Option<Duration>,
    request_timeout: Option<Duration>,
    rate_limit_per_minute: Option<u32>,
    max_memory_turns: Option<usize>,
    match_strategy: Option<MatchStrategy>,
}

impl AssistantConfigBuilder {
    /// Set the Alpha Vantage API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Load the Alpha Vantage API key from the environment
    pub fn with_env_api_key(mut self) -> Self {
        if let Ok(key) = std::env::var("ALPHAVANTAGE_API_KEY") {
            self.api_key = Some(key);
        }
        self
    }

    /// Set the cache TTL
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    /// Set the request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set the per-minute rate limit
    pub fn rate_limit_per_minute(mut self, limit: u32) -> Self {
        self.rate_limit_per_minute = Some(limit);
        self
    }

    /// Set the number of retained conversation pairs
    pub fn max_memory_turns(mut self, turns: usize) -> Self {
        self.max_memory_turns = Some(turns);
        self
    }

    /// Set the alias matching strategy
    pub fn match_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.match_strategy = Some(strategy);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AssistantConfig> {
        let defaults = AssistantConfig::default();

        let config = AssistantConfig {
            api_key: self.api_key,
            cache_ttl: self.cache_ttl.unwrap_or(defaults.cache_ttl),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            rate_limit_per_minute: self
                .rate_limit_per_minute
                .unwrap_or(defaults.rate_limit_per_minute),
            max_memory_turns: self.max_memory_turns.unwrap_or(defaults.max_memory_turns),
            match_strategy: self.match_strategy.unwrap_or(defaults.match_strategy),
        };

        config.validate()?;
        Ok(config)
    }
}
