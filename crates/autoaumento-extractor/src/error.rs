//! Error types for the Extractor

use autoaumento_domain::ConfigurationError;
use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// A rule with the `Error` fallback found nothing
    #[error("No match for rule '{label}'")]
    NoMatch {
        /// Label of the rule that found nothing
        label: String,
    },

    /// A Regex-mode rule carries a pattern that does not compile
    #[error("Invalid pattern for rule '{label}': {source}")]
    InvalidPattern {
        /// Label of the offending rule
        label: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// Text exceeds maximum length
    #[error("Text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),

    /// The extraction configuration violates an invariant
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Extractor settings are invalid
    #[error("Configuration error: {0}")]
    Config(String),
}
