//! Backend selection.
//!
//! The configured `[backend] kind` decides which implementation of the
//! generation and similarity ports the commands run against.

use crate::config::{BackendConfig, BackendKind};
use async_trait::async_trait;
use autoaumento_domain::traits::{SimilarityScorer, TextGenerator};
use autoaumento_llm::{
    EmbeddingError, EmbeddingSimilarity, LlmError, MockEmbeddingModel, MockGenerator,
    OllamaEmbeddingModel, OllamaProvider,
};
use tracing::debug;

/// Dimension of the mock backend's embeddings.
const MOCK_EMBEDDING_DIMENSION: usize = 384;

/// Text generator chosen by configuration.
pub enum Generator {
    /// Ollama `/api/generate`
    Ollama(OllamaProvider),
    /// Canned response
    Mock(MockGenerator),
}

/// Similarity scorer chosen by configuration.
pub enum Scorer {
    /// Ollama `/api/embeddings`
    Ollama(EmbeddingSimilarity<OllamaEmbeddingModel>),
    /// Hash-based embeddings
    Mock(EmbeddingSimilarity<MockEmbeddingModel>),
}

/// Build the generator, using `model` instead of the configured model when given.
pub fn generator(config: &BackendConfig, model: Option<&str>) -> Generator {
    match config.kind {
        BackendKind::Ollama => {
            let model = model.unwrap_or(config.generation_model.as_str());
            debug!("Using Ollama generator '{}' at {}", model, config.endpoint);
            Generator::Ollama(
                OllamaProvider::new(&config.endpoint, model).with_max_retries(config.max_retries),
            )
        }
        BackendKind::Mock => Generator::Mock(MockGenerator::new(&config.mock_response)),
    }
}

/// Build the similarity scorer.
pub fn scorer(config: &BackendConfig) -> Scorer {
    match config.kind {
        BackendKind::Ollama => {
            debug!(
                "Using Ollama embeddings '{}' at {}",
                config.embedding_model, config.endpoint
            );
            Scorer::Ollama(EmbeddingSimilarity::new(
                OllamaEmbeddingModel::new(&config.endpoint, &config.embedding_model)
                    .with_max_retries(config.max_retries),
            ))
        }
        BackendKind::Mock => Scorer::Mock(EmbeddingSimilarity::new(MockEmbeddingModel::new(
            MOCK_EMBEDDING_DIMENSION,
        ))),
    }
}

#[async_trait]
impl TextGenerator for Generator {
    type Error = LlmError;

    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        num_responses: usize,
        max_new_tokens: usize,
    ) -> Result<Vec<String>, Self::Error> {
        match self {
            Generator::Ollama(provider) => {
                provider
                    .generate(system_prompt, user_prompt, num_responses, max_new_tokens)
                    .await
            }
            Generator::Mock(mock) => {
                mock.generate(system_prompt, user_prompt, num_responses, max_new_tokens)
                    .await
            }
        }
    }
}

#[async_trait]
impl SimilarityScorer for Scorer {
    type Error = EmbeddingError;

    async fn similarity(&self, text_a: &str, text_b: &str) -> Result<f64, Self::Error> {
        match self {
            Scorer::Ollama(scorer) => scorer.similarity(text_a, text_b).await,
            Scorer::Mock(scorer) => scorer.similarity(text_a, text_b).await,
        }
    }
}
