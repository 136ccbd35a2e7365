//! End-to-end pipeline: generate → extract → verify

use crate::error::SynthesizerError;
use crate::generation::{GenerationRequest, Synthesizer};
use autoaumento_domain::traits::{SimilarityScorer, TextGenerator};
use autoaumento_domain::{ExtractionConfiguration, FinalStatus, VerificationOutcome, VerificationProcess};
use autoaumento_extractor::{Extractor, ExtractorConfig};
use autoaumento_verifier::{Verifier, VerifierConfig};
use std::sync::Arc;
use tracing::{info, warn};

/// What happened to one generated candidate
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateStatus {
    /// Extraction and verification completed
    Verified(VerificationOutcome),
    /// Extraction failed; the candidate never reached verification
    ExtractionFailed(String),
    /// A port failed while verifying
    VerificationFailed(String),
}

/// Report line for one candidate
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateReport {
    /// Position among the generated texts
    pub index: usize,
    /// Generated text
    pub text: String,
    /// Result of extraction and verification
    pub status: CandidateStatus,
}

impl CandidateReport {
    /// Final status, when the candidate was verified
    pub fn final_status(&self) -> Option<FinalStatus> {
        match &self.status {
            CandidateStatus::Verified(outcome) => Some(outcome.final_status()),
            _ => None,
        }
    }
}

/// Result of a pipeline run, in generation order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PipelineReport {
    /// One line per generated text
    pub candidates: Vec<CandidateReport>,
}

impl PipelineReport {
    /// Number of generated candidates
    pub fn total(&self) -> usize {
        self.candidates.len()
    }

    /// Candidates that ended with `status`
    pub fn count(&self, status: FinalStatus) -> usize {
        self.candidates
            .iter()
            .filter(|c| c.final_status() == Some(status))
            .count()
    }

    /// Candidates whose extraction failed
    pub fn extraction_failures(&self) -> usize {
        self.candidates
            .iter()
            .filter(|c| matches!(c.status, CandidateStatus::ExtractionFailed(_)))
            .count()
    }

    /// Candidates whose verification hit a port failure
    pub fn verification_failures(&self) -> usize {
        self.candidates
            .iter()
            .filter(|c| matches!(c.status, CandidateStatus::VerificationFailed(_)))
            .count()
    }

    /// Confirmed candidates
    pub fn confirmed(&self) -> impl Iterator<Item = &CandidateReport> {
        self.candidates
            .iter()
            .filter(|c| c.final_status() == Some(FinalStatus::Confirmed))
    }
}

/// Generates candidates, extracts their fields and verifies them
///
/// The same generator serves candidate generation and consensus checks.
pub struct Pipeline<G, S> {
    synthesizer: Synthesizer<Arc<G>>,
    verifier: Verifier<Arc<G>, S>,
    extractor_config: ExtractorConfig,
}

impl<G, S> Pipeline<G, S>
where
    G: TextGenerator,
    S: SimilarityScorer,
{
    /// Create a pipeline with default extractor and verifier settings
    pub fn new(generator: G, scorer: S) -> Self {
        let generator = Arc::new(generator);
        Self {
            synthesizer: Synthesizer::new(Arc::clone(&generator)),
            verifier: Verifier::new(generator, scorer),
            extractor_config: ExtractorConfig::default(),
        }
    }

    /// Create a pipeline with explicit settings
    pub fn with_configs(
        generator: G,
        scorer: S,
        extractor_config: ExtractorConfig,
        verifier_config: VerifierConfig,
    ) -> Result<Self, SynthesizerError> {
        extractor_config
            .validate()
            .map_err(autoaumento_extractor::ExtractorError::Config)?;
        let generator = Arc::new(generator);
        Ok(Self {
            synthesizer: Synthesizer::new(Arc::clone(&generator)),
            verifier: Verifier::with_config(generator, scorer, verifier_config)?,
            extractor_config,
        })
    }

    /// Run the whole pipeline
    ///
    /// # Errors
    ///
    /// Invalid requests, generation failures and extraction rules that do not
    /// compile abort the run. Per-candidate extraction and verification
    /// failures are recorded in the report instead.
    pub async fn run(
        &self,
        request: &GenerationRequest,
        extraction: &ExtractionConfiguration,
        process: &VerificationProcess,
    ) -> Result<PipelineReport, SynthesizerError> {
        let extractor = Extractor::with_config(extraction, self.extractor_config.clone())?;
        let texts = self.synthesizer.generate(request).await?;

        let mut statuses: Vec<Option<CandidateStatus>> = Vec::with_capacity(texts.len());
        let mut pending = Vec::new();
        let mut candidates = Vec::new();
        for (index, text) in texts.iter().enumerate() {
            match extractor.extract(text) {
                Ok(entries) => {
                    statuses.push(None);
                    pending.push(index);
                    candidates.push(entries);
                }
                Err(e) => {
                    warn!("Candidate {} extraction failed: {}", index, e);
                    statuses.push(Some(CandidateStatus::ExtractionFailed(e.to_string())));
                }
            }
        }

        let items = self.verifier.verify_batch(candidates, process).await;
        for item in items {
            let status = match item.result {
                Ok(outcome) => CandidateStatus::Verified(outcome),
                Err(e) => CandidateStatus::VerificationFailed(e.to_string()),
            };
            statuses[pending[item.index]] = Some(status);
        }

        let candidates = texts
            .into_iter()
            .zip(statuses)
            .enumerate()
            .filter_map(|(index, (text, status))| {
                status.map(|status| CandidateReport {
                    index,
                    text,
                    status,
                })
            })
            .collect();
        let report = PipelineReport { candidates };

        info!(
            "Pipeline finished: {} candidates, {} confirmed, {} needs review, {} discarded, {} failed",
            report.total(),
            report.count(FinalStatus::Confirmed),
            report.count(FinalStatus::NeedsReview),
            report.count(FinalStatus::Discarded),
            report.extraction_failures() + report.verification_failures()
        );
        Ok(report)
    }
}
