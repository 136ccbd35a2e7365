//! Construction-time configuration errors

use thiserror::Error;

/// Invariant violations detected while building an extraction configuration
/// or a verification process.
///
/// These are raised eagerly by the constructors; an invalid configuration
/// object is never handed to an engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// An extraction rule has an empty label
    #[error("Extraction rule label cannot be empty")]
    EmptyLabel,

    /// Two extraction rules share a label
    #[error("Duplicate extraction rule label '{0}'")]
    DuplicateLabel(String),

    /// A verification method has an empty name
    #[error("Verification method name cannot be empty")]
    EmptyMethodName,

    /// Two verification methods share a name
    #[error("Duplicate verification method name '{0}'")]
    DuplicateMethodName(String),

    /// `required_for_confirmed` exceeds the number of acumulativo methods
    #[error("required_for_confirmed ({required}) exceeds the number of acumulativo methods ({available})")]
    ConfirmedExceedsAccumulative {
        /// Configured threshold
        required: usize,
        /// Acumulativo methods in the process
        available: usize,
    },

    /// `required_for_review` is not strictly below `required_for_confirmed`
    #[error("required_for_review ({review}) must be less than required_for_confirmed ({confirmed})")]
    ReviewNotBelowConfirmed {
        /// Configured review threshold
        review: i64,
        /// Configured confirmed threshold
        confirmed: usize,
    },

    /// Embedding thresholds are not finite or not ordered
    #[error("Method '{method}': lower_threshold {lower} must be less than upper_threshold {upper}")]
    InvalidThresholds {
        /// Method name
        method: String,
        /// Lower bound
        lower: f64,
        /// Upper bound
        upper: f64,
    },

    /// Consensus settings are inconsistent
    #[error("Method '{method}': {reason}")]
    InvalidConsensus {
        /// Method name
        method: String,
        /// Description of the issue
        reason: String,
    },

    /// A prompt template references a placeholder that is not declared
    #[error("Method '{method}': prompt references undeclared placeholder '{{{placeholder}}}'")]
    UndeclaredPlaceholder {
        /// Method name
        method: String,
        /// Placeholder token without braces
        placeholder: String,
    },
}
