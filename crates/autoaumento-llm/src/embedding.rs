//! Embedding models and the embedding-based similarity scorer
//!
//! # Architecture
//!
//! - **EmbeddingModel**: text → vector
//! - **MockEmbeddingModel**: hash-based deterministic embeddings, no model files
//! - **OllamaEmbeddingModel**: embeddings from a local Ollama server
//! - **EmbeddingSimilarity**: cosine similarity of two embeddings, exposed as a
//!   [`SimilarityScorer`]
//!
//! # Examples
//!
//! ```rust
//! use autoaumento_llm::embedding::{EmbeddingModel, MockEmbeddingModel};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let model = MockEmbeddingModel::new(384);
//! let embedding = model.embed("The sky is blue").await.unwrap();
//! assert_eq!(embedding.len(), 384);
//!
//! // Same text always produces same embedding
//! assert_eq!(embedding, model.embed("The sky is blue").await.unwrap());
//! # }
//! ```

use crate::ollama::{http_client, post_json, DEFAULT_ENDPOINT, DEFAULT_MAX_RETRIES};
use crate::LlmError;
use async_trait::async_trait;
use autoaumento_domain::traits::SimilarityScorer;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during embedding generation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmbeddingError {
    /// Invalid input text
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Two embeddings cannot be compared
    #[error("Dimension mismatch: {left} vs {right}")]
    DimensionMismatch {
        /// Length of the first embedding
        left: usize,
        /// Length of the second embedding
        right: usize,
    },

    /// Backend failure
    #[error("Embedding backend failed: {0}")]
    Backend(#[from] LlmError),
}

/// Trait for embedding models
#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    /// Generate an embedding vector for the given text
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Dimension of embeddings produced by this model, when known up front
    fn dimension(&self) -> Option<usize>;
}

/// Mock embedding model
///
/// Embeddings are deterministic (same text, same vector), unit length and
/// differ between texts. Values come from hashing the text with one seed per
/// dimension.
#[derive(Debug, Clone)]
pub struct MockEmbeddingModel {
    dimension: usize,
}

impl MockEmbeddingModel {
    /// Create a new mock embedding model
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    /// Hash text with a seed to get a deterministic value in [-1, 1]
    fn hash_with_seed(text: &str, seed: u64) -> f32 {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        seed.hash(&mut hasher);
        let hash_value = hasher.finish();

        let normalized = (hash_value as f64 / u64::MAX as f64) * 2.0 - 1.0;
        normalized as f32
    }
}

#[async_trait]
impl EmbeddingModel for MockEmbeddingModel {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.is_empty() {
            return Err(EmbeddingError::InvalidInput(
                "Empty text cannot be embedded".to_string(),
            ));
        }

        let mut embedding: Vec<f32> = (0..self.dimension)
            .map(|i| Self::hash_with_seed(text, i as u64))
            .collect();

        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut embedding {
                *value /= magnitude;
            }
        }

        Ok(embedding)
    }

    fn dimension(&self) -> Option<usize> {
        Some(self.dimension)
    }
}

/// Embedding model served by Ollama's `/api/embeddings`
#[derive(Debug, Clone)]
pub struct OllamaEmbeddingModel {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    embedding: Vec<f32>,
}

impl OllamaEmbeddingModel {
    /// Create a new Ollama embedding model
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client: http_client(),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Create a model on `http://localhost:11434`
    pub fn default_endpoint(model: impl Into<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Set the maximum number of attempts per request
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }
}

#[async_trait]
impl EmbeddingModel for OllamaEmbeddingModel {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let url = format!("{}/api/embeddings", self.endpoint);
        let body = EmbeddingsRequest {
            model: &self.model,
            prompt: text,
        };

        let response: EmbeddingsResponse = post_json(
            &self.client,
            &url,
            &body,
            &self.model,
            self.max_retries,
            Duration::from_secs(1),
        )
        .await?;

        if response.embedding.is_empty() {
            return Err(EmbeddingError::Backend(LlmError::InvalidResponse(
                "Empty embedding".to_string(),
            )));
        }
        Ok(response.embedding)
    }

    fn dimension(&self) -> Option<usize> {
        None
    }
}

/// Calculate cosine similarity between two embedding vectors
///
/// Returns a value in [-1, 1]; 0.0 when either vector has zero magnitude.
///
/// # Panics
///
/// Panics if vectors have different lengths
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "Vectors must have same length");

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_a * magnitude_b)
}

/// Similarity scorer backed by an embedding model
#[derive(Debug, Clone)]
pub struct EmbeddingSimilarity<M> {
    model: M,
}

impl<M: EmbeddingModel> EmbeddingSimilarity<M> {
    /// Wrap an embedding model
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Underlying model
    pub fn model(&self) -> &M {
        &self.model
    }
}

#[async_trait]
impl<M: EmbeddingModel> SimilarityScorer for EmbeddingSimilarity<M> {
    type Error = EmbeddingError;

    async fn similarity(&self, text_a: &str, text_b: &str) -> Result<f64, Self::Error> {
        let a = self.model.embed(text_a).await?;
        let b = self.model.embed(text_b).await?;
        if a.len() != b.len() {
            return Err(EmbeddingError::DimensionMismatch {
                left: a.len(),
                right: b.len(),
            });
        }
        Ok(f64::from(cosine_similarity(&a, &b)))
    }
}
