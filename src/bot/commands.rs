//! Command parsing for the assistant REPL

use crate::error::{AssistantError, Result};

/// Default interval for intraday lookups
const DEFAULT_INTERVAL: &str = "5min";

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Live price lookup
    Price { query: String },
    /// Latest intraday bar at an interval
    Intraday { query: String, interval: String },
    /// Static company information
    Info { query: String },
    /// Simulated market research
    Research { query: String },
    /// Show conversation history
    History,
    /// Clear conversation history and cached results
    Clear,
    /// Show help
    Help,
    /// Exit the assistant
    Exit,
    /// Free-text input (not a slash command)
    Query { text: String },
}

impl Command {
    /// Parse a command from user input
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if input.is_empty() {
            return Err(AssistantError::CommandError("Empty input".to_string()));
        }

        if !input.starts_with('/') {
            return Ok(Command::Query {
                text: input.to_string(),
            });
        }

        let parts: Vec<&str> = input[1..].split_whitespace().collect();
        if parts.is_empty() {
            return Err(AssistantError::CommandError("Empty command".to_string()));
        }

        let cmd = parts[0].to_lowercase();
        let args = &parts[1..];

        match cmd.as_str() {
            "price" | "p" => {
                let query = join_args(args, "price")?;
                Ok(Command::Price { query })
            }
            "intraday" | "i" => {
                // Trailing "<n>min" argument selects the interval.
                let (query_args, interval) = match args.split_last() {
                    Some((last, rest)) if last.ends_with("min") && !rest.is_empty() => {
                        (rest, last.to_string())
                    }
                    _ => (args, DEFAULT_INTERVAL.to_string()),
                };
                let query = join_args(query_args, "intraday")?;
                Ok(Command::Intraday { query, interval })
            }
            "info" => {
                let query = join_args(args, "info")?;
                Ok(Command::Info { query })
            }
            "research" | "r" => {
                let query = join_args(args, "research")?;
                Ok(Command::Research { query })
            }
            "history" => Ok(Command::History),
            "clear" | "cls" => Ok(Command::Clear),
            "help" | "h" | "?" => Ok(Command::Help),
            "exit" | "quit" | "q" => Ok(Command::Exit),
            _ => Err(AssistantError::CommandError(format!(
                "Unknown command: {}",
                cmd
            ))),
        }
    }

    /// Get help text for all commands
    pub fn help_text() -> &'static str {
        r#"
Stock Market Information Assistant
==================================

Market Data:
  /price <company or ticker>           Live price (e.g. /price Apple)
  /intraday <company> [interval]       Latest intraday bar (1min, 5min, 15min, 30min, 60min)
  /info <company or ticker>            Company information
  /research <topic>                    Market research and insights

Session:
  /history                             Show conversation history
  /clear                               Clear history and cached results
  /help                                Show this help
  /exit                                Exit

Aliases:
  /p = /price    /i = /intraday    /r = /research    /q = /exit

Anything without a leading slash is treated as a price question:
  > how is tesla doing?
"#
    }
}

fn join_args(args: &[&str], command: &str) -> Result<String> {
    if args.is_empty() {
        return Err(AssistantError::CommandError(format!(
            "Missing query for {} command",
            command
        )));
    }
    Ok(args.join(" "))
}
