//! User-facing assistant tools

pub mod explainer;
pub mod insights;
pub mod market_data;

pub use explainer::{CompletionProvider, Explainer};
pub use market_data::MarketData;
