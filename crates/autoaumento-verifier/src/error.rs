//! Verifier error types

use thiserror::Error;

/// Errors that can occur while verifying a candidate
///
/// A method that merely fails is not an error; these variants are backend
/// failures, reported with the name of the method being evaluated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VerifierError {
    /// The generation port failed
    #[error("Generation failed in method '{method}': {message}")]
    Generation {
        /// Method being evaluated
        method: String,
        /// Backend error message
        message: String,
    },

    /// The similarity port failed
    #[error("Similarity scoring failed in method '{method}': {message}")]
    Similarity {
        /// Method being evaluated
        method: String,
        /// Backend error message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl VerifierError {
    /// Name of the method that was being evaluated, if any
    pub fn method(&self) -> Option<&str> {
        match self {
            VerifierError::Generation { method, .. } | VerifierError::Similarity { method, .. } => {
                Some(method)
            }
            VerifierError::Config(_) => None,
        }
    }
}
