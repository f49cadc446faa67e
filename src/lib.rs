//! Stock market information assistant
//!
//! A conversational assistant that answers stock questions by combining
//! an external market-data API with a static symbol resolver, a TTL
//! response cache, and a short rolling conversation memory.
//!
//! Core pieces:
//!
//! - [`SymbolResolver`]: maps free-text queries ("apple", "bank of
//!   america", "AAPL") to canonical ticker symbols with a pluggable
//!   matching strategy
//! - [`ResponseCache`]: bounded-staleness cache for formatted responses
//! - [`MarketData`]: price and intraday lookups over a [`QuoteProvider`],
//!   always returning user-facing message strings
//! - [`ConversationMemory`]: fixed-capacity rolling buffer of exchanges
//! - [`tools::explainer::Explainer`]: concept explanations over a narrow
//!   LLM completion seam
//!
//! # Example
//!
//! ```rust,ignore
//! use stock_assistant::{Assistant, AssistantConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AssistantConfig::builder().with_env_api_key().build()?;
//!     let mut assistant = Assistant::new(config)?;
//!
//!     let reply = assistant.process_input("/price Apple").await?;
//!     println!("{}", reply);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod bot;
pub mod cache;
pub mod config;
pub mod error;
pub mod memory;
pub mod symbols;
pub mod tools;

// Re-export main types for convenience
pub use api::{AlphaVantageClient, GlobalQuote, IntradayBar, QuoteProvider};
pub use bot::{Assistant, Command};
pub use cache::ResponseCache;
pub use config::AssistantConfig;
pub use error::{AssistantError, Result};
pub use memory::ConversationMemory;
pub use symbols::{MatchStrategy, SymbolResolver};
pub use tools::{CompletionProvider, Explainer, MarketData};
