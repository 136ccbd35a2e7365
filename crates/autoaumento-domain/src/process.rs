//! Verification process - an ordered chain of methods plus disposition thresholds

use crate::method::{
    ConsensusSettings, EmbeddingSettings, MethodMode, VerificationMethod,
};
use crate::{ConfigurationError, FinalStatus};
use std::collections::HashSet;

/// An ordered list of verification methods with confirmed/review thresholds
///
/// Invariants, checked by [`VerificationProcess::new`]:
/// - `required_for_confirmed <= A`, where `A` is the number of acumulativo methods
/// - `required_for_review < required_for_confirmed`; review may be negative, so a
///   chain of eliminatorio gates is built with `(0, -1)`
/// - every method passes [`VerificationMethod::validate`] and names are unique
///
/// # Examples
///
/// ```
/// use autoaumento_domain::{
///     EmbeddingSettings, MethodMode, VerificationMethod, VerificationProcess,
/// };
///
/// let method = VerificationMethod::embedding(
///     "similarity",
///     MethodMode::Acumulativo,
///     EmbeddingSettings {
///         lower_threshold: 0.8,
///         upper_threshold: 0.99,
///         reference_text: "The sky is blue".to_string(),
///     },
/// );
///
/// assert!(VerificationProcess::new(vec![method.clone()], 1, 0).is_ok());
/// assert!(VerificationProcess::new(vec![method.clone()], 2, 1).is_err());
///
/// let gate = VerificationMethod { mode: MethodMode::Eliminatorio, ..method };
/// assert!(VerificationProcess::new(vec![gate], 0, -1).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationProcess {
    methods: Vec<VerificationMethod>,
    required_for_confirmed: usize,
    required_for_review: i64,
}

impl VerificationProcess {
    /// Build a process, validating thresholds and every method
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationError`] found.
    pub fn new(
        methods: Vec<VerificationMethod>,
        required_for_confirmed: usize,
        required_for_review: i64,
    ) -> Result<Self, ConfigurationError> {
        let mut names = HashSet::new();
        for method in &methods {
            method.validate()?;
            if !names.insert(method.name.as_str()) {
                return Err(ConfigurationError::DuplicateMethodName(method.name.clone()));
            }
        }

        let available = methods.iter().filter(|m| m.is_accumulative()).count();
        if required_for_confirmed > available {
            return Err(ConfigurationError::ConfirmedExceedsAccumulative {
                required: required_for_confirmed,
                available,
            });
        }
        if required_for_review >= as_signed(required_for_confirmed) {
            return Err(ConfigurationError::ReviewNotBelowConfirmed {
                review: required_for_review,
                confirmed: required_for_confirmed,
            });
        }

        Ok(Self {
            methods,
            required_for_confirmed,
            required_for_review,
        })
    }

    /// The fixed two-condition verdict: one embedding and one consensus check,
    /// both acumulativo, confirmed when both pass and sent to review when one does
    pub fn embedding_and_consensus(
        embedding_name: impl Into<String>,
        embedding: EmbeddingSettings,
        consensus_name: impl Into<String>,
        consensus: ConsensusSettings,
    ) -> Result<Self, ConfigurationError> {
        Self::new(
            vec![
                VerificationMethod::embedding(embedding_name, MethodMode::Acumulativo, embedding),
                VerificationMethod::consensus(consensus_name, MethodMode::Acumulativo, consensus),
            ],
            2,
            1,
        )
    }

    /// Methods in evaluation order
    pub fn methods(&self) -> &[VerificationMethod] {
        &self.methods
    }

    /// Acumulativo passes needed for [`FinalStatus::Confirmed`]
    pub fn required_for_confirmed(&self) -> usize {
        self.required_for_confirmed
    }

    /// Acumulativo passes needed for [`FinalStatus::NeedsReview`]
    pub fn required_for_review(&self) -> i64 {
        self.required_for_review
    }

    /// Number of acumulativo methods
    pub fn accumulative_count(&self) -> usize {
        self.methods.iter().filter(|m| m.is_accumulative()).count()
    }

    /// Disposition for a completed pass with `accumulated_passes` acumulativo passes
    pub fn resolve(&self, accumulated_passes: usize) -> FinalStatus {
        if accumulated_passes >= self.required_for_confirmed {
            FinalStatus::Confirmed
        } else if as_signed(accumulated_passes) >= self.required_for_review {
            FinalStatus::NeedsReview
        } else {
            FinalStatus::Discarded
        }
    }
}

fn as_signed(count: usize) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::MethodSettings;

    fn embedding(name: &str, mode: MethodMode) -> VerificationMethod {
        VerificationMethod::embedding(
            name,
            mode,
            EmbeddingSettings {
                lower_threshold: 0.5,
                upper_threshold: 0.99,
                reference_text: "reference".to_string(),
            },
        )
    }

    fn consensus() -> ConsensusSettings {
        ConsensusSettings {
            system_prompt: "Answer yes or no.".to_string(),
            user_prompt: "Is '{text}' fluent?".to_string(),
            placeholders: vec!["text".to_string()],
            positive_responses: vec!["yes".to_string()],
            num_responses: 3,
            num_positive_required: 2,
            max_new_tokens: 10,
        }
    }

    #[test]
    fn test_confirmed_cannot_exceed_accumulative_count() {
        let result = VerificationProcess::new(
            vec![
                embedding("a", MethodMode::Acumulativo),
                embedding("b", MethodMode::Eliminatorio),
            ],
            2,
            1,
        );
        assert_eq!(
            result,
            Err(ConfigurationError::ConfirmedExceedsAccumulative {
                required: 2,
                available: 1
            })
        );
    }

    #[test]
    fn test_review_must_be_below_confirmed() {
        let result = VerificationProcess::new(
            vec![
                embedding("a", MethodMode::Acumulativo),
                embedding("b", MethodMode::Acumulativo),
            ],
            1,
            1,
        );
        assert_eq!(
            result,
            Err(ConfigurationError::ReviewNotBelowConfirmed {
                review: 1,
                confirmed: 1
            })
        );
    }

    #[test]
    fn test_eliminatorio_only_chain_needs_negative_review() {
        let gates = || {
            vec![
                embedding("gate_a", MethodMode::Eliminatorio),
                embedding("gate_b", MethodMode::Eliminatorio),
            ]
        };
        assert_eq!(
            VerificationProcess::new(gates(), 0, 0),
            Err(ConfigurationError::ReviewNotBelowConfirmed {
                review: 0,
                confirmed: 0
            })
        );

        let process = VerificationProcess::new(gates(), 0, -1).unwrap();
        assert_eq!(process.accumulative_count(), 0);
        assert_eq!(process.required_for_review(), -1);
        assert_eq!(process.resolve(0), FinalStatus::Confirmed);
    }

    #[test]
    fn test_negative_review_never_discards_on_count() {
        let process = VerificationProcess::new(
            vec![
                embedding("a", MethodMode::Acumulativo),
                embedding("b", MethodMode::Acumulativo),
            ],
            2,
            -1,
        )
        .unwrap();
        assert_eq!(process.resolve(2), FinalStatus::Confirmed);
        assert_eq!(process.resolve(0), FinalStatus::NeedsReview);
    }

    #[test]
    fn test_duplicate_method_names_rejected() {
        let result = VerificationProcess::new(
            vec![
                embedding("same", MethodMode::Acumulativo),
                embedding("same", MethodMode::Acumulativo),
            ],
            2,
            1,
        );
        assert_eq!(
            result,
            Err(ConfigurationError::DuplicateMethodName("same".to_string()))
        );
    }

    #[test]
    fn test_method_errors_surface_at_construction() {
        let mut bad = consensus();
        bad.user_prompt = "Is '{missing}' fluent?".to_string();
        let result = VerificationProcess::new(
            vec![VerificationMethod::consensus("judge", MethodMode::Acumulativo, bad)],
            1,
            0,
        );
        assert!(matches!(
            result,
            Err(ConfigurationError::UndeclaredPlaceholder { .. })
        ));
    }

    #[test]
    fn test_resolve_thresholds() {
        let process = VerificationProcess::new(
            vec![
                embedding("a", MethodMode::Acumulativo),
                embedding("b", MethodMode::Acumulativo),
                embedding("c", MethodMode::Acumulativo),
            ],
            3,
            1,
        )
        .unwrap();
        assert_eq!(process.resolve(3), FinalStatus::Confirmed);
        assert_eq!(process.resolve(2), FinalStatus::NeedsReview);
        assert_eq!(process.resolve(1), FinalStatus::NeedsReview);
        assert_eq!(process.resolve(0), FinalStatus::Discarded);
    }

    #[test]
    fn test_embedding_and_consensus_preset() {
        let process = VerificationProcess::embedding_and_consensus(
            "similarity",
            EmbeddingSettings {
                lower_threshold: 0.9,
                upper_threshold: 0.995,
                reference_text: "reference".to_string(),
            },
            "judge",
            consensus(),
        )
        .unwrap();

        assert_eq!(process.required_for_confirmed(), 2);
        assert_eq!(process.required_for_review(), 1);
        assert_eq!(process.accumulative_count(), 2);
        assert!(matches!(
            process.methods()[0].settings,
            MethodSettings::Embedding(_)
        ));
        assert!(matches!(
            process.methods()[1].settings,
            MethodSettings::Consensus(_)
        ));
    }
}
