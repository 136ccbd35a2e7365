//! Error types for the Synthesizer

use autoaumento_extractor::ExtractorError;
use autoaumento_verifier::VerifierError;
use thiserror::Error;

/// Errors that can occur while generating or running the pipeline
#[derive(Error, Debug)]
pub enum SynthesizerError {
    /// Request parameters are out of range or inconsistent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A prompt references a placeholder absent from the reference data
    #[error("Missing placeholder '{0}' in reference data")]
    MissingPlaceholder(String),

    /// The generation port failed
    #[error("Error generating text: {0}")]
    Generation(String),

    /// The extractor could not be built
    #[error(transparent)]
    Extractor(#[from] ExtractorError),

    /// The verifier could not be built
    #[error(transparent)]
    Verifier(#[from] VerifierError),
}
