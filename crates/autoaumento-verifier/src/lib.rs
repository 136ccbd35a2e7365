//! Autoaumento Verifier
//!
//! Decides whether extracted candidates are acceptable by running an ordered
//! chain of verification methods and reducing their results to a final status.
//!
//! The Verifier provides:
//! - Single-method evaluation (embedding similarity, consensus vote)
//! - The process engine with eliminatorio short-circuiting and acumulativo thresholds
//! - Bounded-concurrency batch verification with per-candidate error isolation
//!
//! # Examples
//!
//! ```
//! use autoaumento_domain::{EmbeddingSettings, Entry, FinalStatus, MethodMode,
//!     VerificationMethod, VerificationProcess};
//! use autoaumento_llm::{MockGenerator, MockSimilarity};
//! use autoaumento_verifier::Verifier;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let process = VerificationProcess::new(
//!     vec![VerificationMethod::embedding(
//!         "similarity",
//!         MethodMode::Acumulativo,
//!         EmbeddingSettings {
//!             lower_threshold: 0.8,
//!             upper_threshold: 0.99,
//!             reference_text: "The sky is blue".to_string(),
//!         },
//!     )],
//!     1,
//!     0,
//! )
//! .unwrap();
//!
//! let verifier = Verifier::new(MockGenerator::new("yes"), MockSimilarity::new(0.9));
//! let entries: Vec<Entry> = vec![[("text", "The sky looks blue")].into_iter().collect()];
//!
//! let outcome = verifier.verify(entries, &process).await.unwrap();
//! assert_eq!(outcome.final_status(), FinalStatus::Confirmed);
//! # }
//! ```

#![warn(missing_docs)]

mod batch;
mod config;
mod engine;
mod error;
mod evaluator;

pub use batch::BatchItem;
pub use config::VerifierConfig;
pub use engine::Verifier;
pub use error::VerifierError;
pub use evaluator::evaluate;
