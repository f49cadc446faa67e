//! Beginner-friendly concept explanations over a narrow LLM seam
//!
//! The assistant treats the language model as an external collaborator:
//! everything it needs is a single completion call. Repeated simple
//! explanations are cached per concept to avoid paying for the same
//! answer twice; the cache has no TTL and is only emptied explicitly.

use crate::error::{AssistantError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

const SIMPLE_SYSTEM: &str = "You are a patient financial educator who explains complex ideas \
simply, using short sentences and everyday language. Avoid jargon and technical terms. \
Be concise and beginner-friendly.";

const EXAMPLES_SYSTEM: &str = "You are a financial educator. Explain concepts clearly with \
2-3 real-world examples that beginners can relate to.";

const COMPARE_SYSTEM: &str = "You are a financial educator. Compare financial concepts by \
explaining their differences, similarities, and when to use each.";

/// Narrow seam over the language model
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Run a single completion with a system instruction and user prompt
    async fn complete(&self, system: &str, prompt: &str) -> Result<String>;
}

/// Concept-explanation layer with a per-concept cache
pub struct Explainer<P: CompletionProvider> {
    provider: P,
    cache: RwLock<HashMap<String, String>>,
}

impl<P: CompletionProvider> Explainer<P> {
    /// Create an explainer over a completion provider
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Explain a concept in plain language.
    ///
    /// Empty input is an error; provider failures are reported as a
    /// user-facing message string rather than propagated.
    pub async fn explain_simple(&self, concept: &str) -> Result<String> {
        let concept = non_empty(concept, "concept")?;

        if let Some(cached) = self.cache.read().await.get(&concept) {
            return Ok(cached.clone());
        }

        let prompt = format!(
            "Explain '{}' in simple, clear terms. Keep it under 80 words.",
            concept
        );

        match self.provider.complete(SIMPLE_SYSTEM, &prompt).await {
            Ok(explanation) => {
                let explanation = explanation.trim().to_string();
                self.cache
                    .write()
                    .await
                    .insert(concept, explanation.clone());
                Ok(explanation)
            }
            Err(err) => Ok(format!("❌ Error explaining '{}': {}", concept, err)),
        }
    }

    /// Explain a concept with real-world examples (uncached)
    pub async fn explain_with_examples(&self, concept: &str) -> Result<String> {
        let concept = non_empty(concept, "concept")?;

        let prompt = format!(
            "Explain '{}' with simple, real-world examples. Keep total response under 200 words.",
            concept
        );

        match self.provider.complete(EXAMPLES_SYSTEM, &prompt).await {
            Ok(explanation) => Ok(explanation.trim().to_string()),
            Err(err) => Ok(format!("❌ Error creating examples for '{}': {}", concept, err)),
        }
    }

    /// Compare two concepts, highlighting differences and use cases
    pub async fn compare_concepts(&self, first: &str, second: &str) -> Result<String> {
        let first = non_empty(first, "first concept")?;
        let second = non_empty(second, "second concept")?;

        let prompt = format!(
            "Compare '{}' and '{}'. Explain: 1) Key differences, 2) When to use each, \
             3) Which is better for beginners. Keep it under 200 words.",
            first, second
        );

        match self.provider.complete(COMPARE_SYSTEM, &prompt).await {
            Ok(comparison) => Ok(comparison.trim().to_string()),
            Err(err) => Ok(format!("❌ Error comparing concepts: {}", err)),
        }
    }

    /// Empty the explanation cache
    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
    }
}

fn non_empty(value: &str, name: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AssistantError::InvalidArgument(format!(
            "{} must be a non-empty string",
            name
        )));
    }
    Ok(trimmed.to_string())
}
