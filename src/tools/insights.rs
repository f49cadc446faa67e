//! Simulated remote market-insight source
//!
//! Stands in for a remote research service during development and
//! coursework demos: responses are canned, keyword-routed, and delayed
//! by a fixed artificial latency to mimic a network round trip.

use crate::error::{AssistantError, Result};
use std::time::Duration;

/// Artificial per-call latency for the simulated remote source
const SIMULATED_LATENCY: Duration = Duration::from_millis(500);

/// Keyword-routed market research for a free-text query
pub async fn market_research(query: &str) -> Result<String> {
    let query = non_empty(query)?;

    tokio::time::sleep(SIMULATED_LATENCY).await;

    let lower = query.to_lowercase();
    let title = title_case(&query);

    let response = if contains_any(&lower, &["bitcoin", "crypto", "ethereum"]) {
        format!(
            "💰 Crypto Market Data for '{}':\n\
             Current volatility is elevated. Bitcoin is trading near support levels.\n\
             Recent regulatory announcements have impacted institutional adoption.",
            title
        )
    } else if contains_any(&lower, &["tech", "apple", "microsoft", "google"]) {
        format!(
            "🖥️ Tech Sector Analysis for '{}':\n\
             Tech stocks showing strong momentum with AI-related stocks leading gains.\n\
             Earnings seasons remain the key driver for sector performance.",
            title
        )
    } else if contains_any(&lower, &["dividend", "income"]) {
        format!(
            "📊 Dividend & Income Strategy for '{}':\n\
             Dividend yields remain attractive in current rate environment.\n\
             Utility and consumer staple stocks offer stable passive income.",
            title
        )
    } else {
        format!(
            "📡 Market Research for '{}':\n\
             Market shows mixed trends with sector rotation occurring.\n\
             Tech leading gains while energy and financials show consolidation.",
            title
        )
    };

    Ok(response)
}

/// Canned technical/fundamental snapshot for a ticker
pub async fn stock_snapshot(symbol: &str) -> Result<String> {
    let symbol = non_empty(symbol)?.to_uppercase();

    tokio::time::sleep(SIMULATED_LATENCY).await;

    Ok(format!(
        "📈 Stock Analysis for {}:\n\
         Technical: Price above 50-day MA indicates uptrend potential.\n\
         Fundamental: P/E ratio within historical range, earnings growth steady.\n\
         Sentiment: Analyst ratings show 'Buy' consensus with price target upside.",
        symbol
    ))
}

/// Canned summary of major index performance
pub async fn market_summary() -> Result<String> {
    tokio::time::sleep(SIMULATED_LATENCY).await;

    Ok("🌍 Market Summary:\n\
        • S&P 500: +0.85% (record highs on AI enthusiasm)\n\
        • Nasdaq-100: +1.2% (tech-heavy index outperforming)\n\
        • Dow Jones: +0.45% (large-cap stability)\n\
        • VIX: 15.3 (volatility remains calm)\n\
        Market sentiment: Cautiously optimistic"
        .to_string())
}

/// Canned per-sector performance overview
pub async fn sector_performance() -> Result<String> {
    tokio::time::sleep(SIMULATED_LATENCY).await;

    Ok("🏢 Sector Performance:\n\
        • Technology: +2.1% (AI and cloud computing driving growth)\n\
        • Healthcare: +0.8% (pharma names under pressure)\n\
        • Financials: +0.3% (rate-sensitive but stable)\n\
        • Consumer: -0.2% (mixed earnings outlook)\n\
        • Energy: +1.5% (oil prices firm)\n\
        • Utilities: -0.1% (defensive positioning)"
        .to_string())
}

/// Fan out to research and summary concurrently, joining whatever
/// succeeded. Failed branches are dropped from the combined output.
pub async fn combined_query(query: &str) -> Result<String> {
    non_empty(query)?;

    let (research, summary) = futures::join!(market_research(query), market_summary());

    let combined: Vec<String> = [research, summary]
        .into_iter()
        .filter_map(|r| r.ok())
        .collect();

    Ok(combined.join("\n"))
}

fn non_empty(value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AssistantError::InvalidArgument(
            "query must be a non-empty string".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Upper-case the first letter of each whitespace-separated word and
/// lower-case the rest, so "AAPL outlook" renders as "Aapl Outlook"
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
