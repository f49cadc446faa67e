//! Conversational assistant front end
//!
//! Routes parsed commands to the market-data tool and the simulated
//! insight source, and records every successful exchange in the
//! conversation memory so `/history` can replay it.

pub mod commands;

pub use commands::Command;

use crate::api::AlphaVantageClient;
use crate::config::AssistantConfig;
use crate::error::{AssistantError, Result};
use crate::memory::ConversationMemory;
use crate::tools::market_data::MarketData;
use crate::tools::insights;
use std::sync::Arc;

/// Interactive assistant owning the tools and session state
pub struct Assistant {
    market: MarketData<AlphaVantageClient>,
    memory: ConversationMemory,
    config: Arc<AssistantConfig>,
}

impl Assistant {
    /// Create an assistant from a configuration
    pub fn new(config: AssistantConfig) -> Result<Self> {
        let config = Arc::new(config);
        let client = AlphaVantageClient::from_config(&config)?;

        Ok(Self {
            market: MarketData::new(client, Arc::clone(&config)),
            memory: ConversationMemory::with_capacity(config.max_memory_turns),
            config,
        })
    }

    /// Whether the market-data credential is configured
    pub fn has_api_key(&self) -> bool {
        self.config.has_api_key()
    }

    /// REPL prompt string
    pub fn prompt(&self) -> &'static str {
        ">>> "
    }

    /// Process one line of user input and produce a response.
    ///
    /// Returns `Err` only for parse failures and the exit request; tool
    /// failures come back as user-facing message strings.
    pub async fn process_input(&mut self, input: &str) -> Result<String> {
        let command = Command::parse(input)?;

        let response = match command {
            Command::Price { query } | Command::Query { text: query } => {
                self.market.fetch_price(&query).await
            }
            Command::Intraday { query, interval } => {
                self.market.fetch_intraday(&query, &interval).await
            }
            Command::Info { query } => self.market.company_info(&query),
            Command::Research { query } => insights::market_research(&query).await?,
            Command::History => {
                let history = self.memory.render();
                return Ok(if history.is_empty() {
                    "No conversation history yet.".to_string()
                } else {
                    history
                });
            }
            Command::Clear => {
                self.memory.reset();
                self.market.clear_cache().await;
                return Ok("Cleared conversation history and cached results.".to_string());
            }
            Command::Help => return Ok(Command::help_text().to_string()),
            Command::Exit => return Err(AssistantError::Other("exit".to_string())),
        };

        if let Err(err) = self.memory.append(input, &response) {
            tracing::warn!(error = %err, "failed to record exchange");
        }

        Ok(response)
    }

    /// Rendered conversation history
    pub fn history(&self) -> String {
        self.memory.render()
    }
}
