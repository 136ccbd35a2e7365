//! Bounded-concurrency verification of many candidates

use crate::engine::Verifier;
use crate::error::VerifierError;
use autoaumento_domain::traits::{SimilarityScorer, TextGenerator};
use autoaumento_domain::{Entry, VerificationOutcome, VerificationProcess};
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

/// Result slot of one candidate in a batch
#[derive(Debug, Clone, PartialEq)]
pub struct BatchItem {
    /// Position of the candidate in the input
    pub index: usize,
    /// Outcome, or the port failure that stopped this candidate
    pub result: Result<VerificationOutcome, VerifierError>,
}

impl BatchItem {
    /// Whether the candidate was verified without a port failure
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

impl<G, S> Verifier<G, S>
where
    G: TextGenerator,
    S: SimilarityScorer,
{
    /// Verify every candidate with the same process
    ///
    /// At most `max_concurrency` candidates are in flight. Items come back in
    /// input order, and a failure is confined to its own item.
    pub async fn verify_batch(
        &self,
        candidates: Vec<Vec<Entry>>,
        process: &VerificationProcess,
    ) -> Vec<BatchItem> {
        let total = candidates.len();
        info!(
            "Verifying {} candidates (max concurrency {})",
            total, self.config.max_concurrency
        );

        let items: Vec<BatchItem> = stream::iter(candidates.into_iter().enumerate())
            .map(|(index, entries)| async move {
                let result = self.verify(entries, process).await;
                if let Err(e) = &result {
                    warn!("Candidate {} failed: {}", index, e);
                }
                BatchItem { index, result }
            })
            .buffered(self.config.max_concurrency.max(1))
            .collect()
            .await;

        let failures = items.iter().filter(|item| !item.is_ok()).count();
        info!("Batch complete: {} verified, {} failed", total - failures, failures);
        items
    }
}
