//! Free-text to ticker symbol resolution
//!
//! Maps company names, informal names, and raw tickers to canonical
//! uppercase ticker symbols using a static alias table. Matching is
//! deliberately loose by default: the first alias (in table order) that
//! appears as a substring of the query wins.

use serde::{Deserialize, Serialize};

/// Alias table mapping lower-cased company names to tickers.
///
/// Order matters: the first matching alias wins, so spelling variants of
/// the same company ("google"/"alphabet", "meta"/"facebook") sit next to
/// each other.
const SYMBOL_TABLE: &[(&str, &str)] = &[
    // Technology
    ("microsoft", "MSFT"),
    ("apple", "AAPL"),
    ("google", "GOOGL"),
    ("alphabet", "GOOGL"),
    ("amazon", "AMZN"),
    ("meta", "META"),
    ("facebook", "META"),
    ("tesla", "TSLA"),
    ("nvidia", "NVDA"),
    ("intel", "INTC"),
    ("amd", "AMD"),
    ("ibm", "IBM"),
    // Finance
    ("jpmorgan", "JPM"),
    ("goldman", "GS"),
    ("morgan stanley", "MS"),
    ("bank of america", "BAC"),
    ("wells fargo", "WFC"),
    // Consumer
    ("walmart", "WMT"),
    ("target", "TGT"),
    ("costco", "COST"),
    ("mcdonald", "MCD"),
    ("coca cola", "KO"),
    ("pepsi", "PEP"),
    // Energy
    ("exxon", "XOM"),
    ("chevron", "CVX"),
    ("shell", "SHEL"),
    // Healthcare
    ("pfizer", "PFE"),
    ("moderna", "MRNA"),
    ("johnson", "JNJ"),
    ("merck", "MRK"),
    // Telecommunications
    ("at&t", "T"),
    ("verizon", "VZ"),
];

/// Alias matching policy for the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchStrategy {
    /// Query must equal the alias exactly (after normalization)
    Exact,
    /// Alias may appear anywhere inside the query, even mid-word
    #[default]
    Substring,
    /// Alias must appear on word boundaries within the query
    Token,
}

/// Resolves free-text queries to canonical ticker symbols
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolResolver {
    strategy: MatchStrategy,
}

impl SymbolResolver {
    /// Create a resolver with the default (substring) matching strategy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver with an explicit matching strategy
    pub fn with_strategy(strategy: MatchStrategy) -> Self {
        Self { strategy }
    }

    /// Resolve a query to a ticker symbol.
    ///
    /// Tickers are matched exactly (case-insensitively) before aliases are
    /// consulted. Returns `None` for empty input or when nothing matches.
    pub fn resolve(&self, query: &str) -> Option<&'static str> {
        let normalized = query.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }

        // Pass 1: exact ticker match
        for (_, ticker) in SYMBOL_TABLE {
            if ticker.to_lowercase() == normalized {
                return Some(ticker);
            }
        }

        // Pass 2: alias match, first in table order wins
        for (alias, ticker) in SYMBOL_TABLE {
            let matched = match self.strategy {
                MatchStrategy::Exact => normalized == *alias,
                MatchStrategy::Substring => normalized.contains(alias),
                MatchStrategy::Token => token_match(&normalized, alias),
            };
            if matched {
                return Some(ticker);
            }
        }

        None
    }

    /// Iterate over all known (alias, ticker) pairs in table order
    pub fn known_symbols() -> impl Iterator<Item = (&'static str, &'static str)> {
        SYMBOL_TABLE.iter().copied()
    }
}

/// True when `alias` occurs in `query` bounded by non-alphanumeric
/// characters (or the string edges) on both sides.
fn token_match(query: &str, alias: &str) -> bool {
    query.match_indices(alias).any(|(idx, _)| {
        let before_ok = query[..idx]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let after_ok = query[idx + alias.len()..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_alias_resolves_to_its_ticker() {
        let resolver = SymbolResolver::new();
        for (alias, ticker) in SymbolResolver::known_symbols() {
            assert_eq!(resolver.resolve(alias), Some(ticker), "alias: {}", alias);
        }
    }

    #[test]
    fn test_ticker_resolves_to_itself_any_case() {
        let resolver = SymbolResolver::new();
        for (_, ticker) in SymbolResolver::known_symbols() {
            assert_eq!(resolver.resolve(ticker), Some(ticker));
            assert_eq!(resolver.resolve(&ticker.to_lowercase()), Some(ticker));
        }
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        let resolver = SymbolResolver::new();
        assert_eq!(resolver.resolve(""), None);
        assert_eq!(resolver.resolve("   "), None);
    }

    #[test]
    fn test_unknown_company() {
        let resolver = SymbolResolver::new();
        assert_eq!(resolver.resolve("xyz-not-a-company"), None);
    }

    #[test]
    fn test_alias_inside_longer_phrase() {
        let resolver = SymbolResolver::new();
        assert_eq!(
            resolver.resolve("how is apple doing today?"),
            Some("AAPL")
        );
        assert_eq!(
            resolver.resolve("price of bank of america please"),
            Some("BAC")
        );
    }

    #[test]
    fn test_substring_matches_mid_word() {
        // The loose default matches "at&t" even inside an unrelated word.
        let resolver = SymbolResolver::new();
        assert_eq!(resolver.resolve("splat&trap"), Some("T"));
    }

    #[test]
    fn test_token_strategy_requires_word_boundaries() {
        let resolver = SymbolResolver::with_strategy(MatchStrategy::Token);
        assert_eq!(resolver.resolve("splat&trap"), None);
        assert_eq!(resolver.resolve("price of at&t today"), Some("T"));
    }

    #[test]
    fn test_exact_strategy() {
        let resolver = SymbolResolver::with_strategy(MatchStrategy::Exact);
        assert_eq!(resolver.resolve("apple"), Some("AAPL"));
        assert_eq!(resolver.resolve("how is apple doing"), None);
    }

    #[test]
    fn test_trimming_and_case() {
        let resolver = SymbolResolver::new();
        assert_eq!(resolver.resolve("  AAPL  "), Some("AAPL"));
        assert_eq!(resolver.resolve("Apple"), Some("AAPL"));
    }

    #[test]
    fn test_first_alias_in_table_order_wins() {
        // "google" precedes "amazon" in the table, so a query mentioning
        // both resolves to GOOGL. Observed behavior, not a guarantee.
        let resolver = SymbolResolver::new();
        assert_eq!(
            resolver.resolve("compare amazon and google"),
            Some("GOOGL")
        );
    }
}
