//! Port traits for external interactions
//!
//! Text generation and similarity scoring are long-latency model calls, so
//! both ports are async. Implementations live in `autoaumento-llm`.

use async_trait::async_trait;
use std::fmt::Display;

/// Trait for producing several responses to one system/user prompt pair
///
/// Implemented by the infrastructure layer (autoaumento-llm)
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Error type for generation failures
    type Error: Display + Send;

    /// Generate `num_responses` independent responses
    ///
    /// Implementations must return exactly `num_responses` strings on success.
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        num_responses: usize,
        max_new_tokens: usize,
    ) -> Result<Vec<String>, Self::Error>;
}

/// Trait for scoring how similar two texts are
///
/// Scores follow the cosine convention (roughly -1.0 to 1.0), but callers only
/// compare them against configured thresholds.
///
/// Implemented by the infrastructure layer (autoaumento-llm)
#[async_trait]
pub trait SimilarityScorer: Send + Sync {
    /// Error type for scoring failures
    type Error: Display + Send;

    /// Similarity between `text_a` and `text_b`
    async fn similarity(&self, text_a: &str, text_b: &str) -> Result<f64, Self::Error>;
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for std::sync::Arc<T> {
    type Error = T::Error;

    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        num_responses: usize,
        max_new_tokens: usize,
    ) -> Result<Vec<String>, Self::Error> {
        (**self)
            .generate(system_prompt, user_prompt, num_responses, max_new_tokens)
            .await
    }
}

#[async_trait]
impl<T: SimilarityScorer + ?Sized> SimilarityScorer for std::sync::Arc<T> {
    type Error = T::Error;

    async fn similarity(&self, text_a: &str, text_b: &str) -> Result<f64, Self::Error> {
        (**self).similarity(text_a, text_b).await
    }
}
