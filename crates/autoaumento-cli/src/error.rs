//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Named setup does not exist
    #[error("Setup '{0}' not found")]
    SetupNotFound(String),

    /// Domain invariant violated by an input document
    #[error(transparent)]
    Configuration(#[from] autoaumento_domain::ConfigurationError),

    /// Extraction error
    #[error("Extraction failed: {0}")]
    Extractor(#[from] autoaumento_extractor::ExtractorError),

    /// Verification error
    #[error("Verification failed: {0}")]
    Verifier(#[from] autoaumento_verifier::VerifierError),

    /// Generation or pipeline error
    #[error(transparent)]
    Synthesizer(#[from] autoaumento_synthesizer::SynthesizerError),

    /// Setup storage error
    #[error("Storage error: {0}")]
    Store(#[from] autoaumento_store::StoreError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}
