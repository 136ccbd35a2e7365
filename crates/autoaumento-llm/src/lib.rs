//! Autoaumento LLM Provider Layer
//!
//! Implementations of the generation and similarity ports defined in
//! `autoaumento-domain`.
//!
//! # Providers
//!
//! - `OllamaProvider`: text generation through a local Ollama server
//! - `EmbeddingSimilarity`: similarity scoring from any [`EmbeddingModel`]
//!   (`OllamaEmbeddingModel` or the hash-based `MockEmbeddingModel`)
//! - `MockGenerator` / `MockSimilarity`: deterministic spies for tests and
//!   offline runs
//!
//! # Examples
//!
//! ```
//! use autoaumento_domain::traits::TextGenerator;
//! use autoaumento_llm::MockGenerator;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let generator = MockGenerator::new("Hello from LLM!");
//! let responses = generator.generate("system", "user", 2, 16).await.unwrap();
//! assert_eq!(responses, vec!["Hello from LLM!", "Hello from LLM!"]);
//! assert_eq!(generator.call_count(), 1);
//! # }
//! ```

#![warn(missing_docs)]

pub mod embedding;
pub mod mock;
pub mod ollama;

use thiserror::Error;

pub use embedding::{
    cosine_similarity, EmbeddingError, EmbeddingModel, EmbeddingSimilarity, MockEmbeddingModel,
    OllamaEmbeddingModel,
};
pub use mock::{GenerationCall, MockGenerator, MockSimilarity};
pub use ollama::OllamaProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}
