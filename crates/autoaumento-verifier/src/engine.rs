//! Verification process engine

use crate::config::VerifierConfig;
use crate::error::VerifierError;
use crate::evaluator::evaluate;
use autoaumento_domain::traits::{SimilarityScorer, TextGenerator};
use autoaumento_domain::{
    Entry, FinalStatus, MethodMode, VerificationOutcome, VerificationProcess,
};
use tracing::{debug, info};

/// Runs verification processes over candidates using one generator and one scorer
pub struct Verifier<G, S> {
    pub(crate) generator: G,
    pub(crate) scorer: S,
    pub(crate) config: VerifierConfig,
}

impl<G, S> Verifier<G, S>
where
    G: TextGenerator,
    S: SimilarityScorer,
{
    /// Create a new Verifier with default configuration
    pub fn new(generator: G, scorer: S) -> Self {
        Self {
            generator,
            scorer,
            config: VerifierConfig::default(),
        }
    }

    /// Create a new Verifier with explicit configuration
    pub fn with_config(
        generator: G,
        scorer: S,
        config: VerifierConfig,
    ) -> Result<Self, VerifierError> {
        config.validate().map_err(VerifierError::Config)?;
        Ok(Self {
            generator,
            scorer,
            config,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Run `process` over one candidate's entries
    ///
    /// Methods run strictly in order. The first failing eliminatorio method
    /// discards the candidate and no later method is evaluated. Otherwise the
    /// number of passing acumulativo methods decides the status.
    ///
    /// # Errors
    ///
    /// Port failures propagate as [`VerifierError`], naming the method.
    pub async fn verify(
        &self,
        entries: Vec<Entry>,
        process: &VerificationProcess,
    ) -> Result<VerificationOutcome, VerifierError> {
        let mut run = Run::default();

        for method in process.methods() {
            let passed = evaluate(method, &entries, &self.generator, &self.scorer).await?;
            debug!(
                "Method '{}' ({}, {}): {}",
                method.name,
                method.method_type().as_str(),
                method.mode.as_str(),
                if passed { "passed" } else { "failed" }
            );

            if passed {
                run.pass(&method.name, method.mode);
            } else {
                run.fail(&method.name);
                if method.mode == MethodMode::Eliminatorio {
                    info!("Eliminatorio method '{}' failed, discarding", method.name);
                    return Ok(run.finish(entries, FinalStatus::Discarded));
                }
            }
        }

        let status = process.resolve(run.accumulated_passes);
        info!(
            "Verification finished: {} ({} acumulativo passes, confirmed at {}, review at {})",
            status,
            run.accumulated_passes,
            process.required_for_confirmed(),
            process.required_for_review()
        );
        Ok(run.finish(entries, status))
    }
}

/// State of one evaluation pass
#[derive(Default)]
struct Run {
    accumulated_passes: usize,
    passed: Vec<String>,
    failed: Vec<String>,
}

impl Run {
    fn pass(&mut self, name: &str, mode: MethodMode) {
        self.passed.push(name.to_string());
        if mode == MethodMode::Acumulativo {
            self.accumulated_passes += 1;
        }
    }

    fn fail(&mut self, name: &str) {
        self.failed.push(name.to_string());
    }

    fn finish(self, entries: Vec<Entry>, status: FinalStatus) -> VerificationOutcome {
        VerificationOutcome::new(entries, self.passed, self.failed, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_counts_only_acumulativo_passes() {
        let mut run = Run::default();
        run.pass("gate", MethodMode::Eliminatorio);
        run.pass("a", MethodMode::Acumulativo);
        run.fail("b");

        assert_eq!(run.accumulated_passes, 1);
        let outcome = run.finish(Vec::new(), FinalStatus::NeedsReview);
        assert_eq!(outcome.methods_passed(), ["gate".to_string(), "a".to_string()]);
        assert_eq!(outcome.methods_failed(), ["b".to_string()]);
    }
}
