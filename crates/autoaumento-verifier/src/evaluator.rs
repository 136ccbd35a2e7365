//! Single-method evaluation against the generation and similarity ports

use crate::error::VerifierError;
use autoaumento_domain::template;
use autoaumento_domain::traits::{SimilarityScorer, TextGenerator};
use autoaumento_domain::{
    ConsensusSettings, EmbeddingSettings, Entry, MethodSettings, VerificationMethod,
};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Evaluate one method against a candidate's entries
///
/// Returns `Ok(true)` on pass and `Ok(false)` on fail. An unresolvable
/// placeholder or a candidate without entries is a fail, not an error; only
/// port failures are reported as [`VerifierError`].
pub async fn evaluate<G, S>(
    method: &VerificationMethod,
    entries: &[Entry],
    generator: &G,
    scorer: &S,
) -> Result<bool, VerifierError>
where
    G: TextGenerator + ?Sized,
    S: SimilarityScorer + ?Sized,
{
    match &method.settings {
        MethodSettings::Embedding(settings) => {
            evaluate_embedding(&method.name, settings, entries, scorer).await
        }
        MethodSettings::Consensus(settings) => {
            evaluate_consensus(&method.name, settings, entries, generator).await
        }
    }
}

async fn evaluate_embedding<S>(
    name: &str,
    settings: &EmbeddingSettings,
    entries: &[Entry],
    scorer: &S,
) -> Result<bool, VerifierError>
where
    S: SimilarityScorer + ?Sized,
{
    let Some(candidate) = entries.first().and_then(Entry::first_value) else {
        warn!("Method '{}': no candidate value to compare", name);
        return Ok(false);
    };

    let similarity = scorer
        .similarity(&settings.reference_text, candidate)
        .await
        .map_err(|e| VerifierError::Similarity {
            method: name.to_string(),
            message: e.to_string(),
        })?;

    let passed = settings.accepts(similarity);
    debug!(
        "Method '{}': similarity {:.4} in ({}, {}) -> {}",
        name, similarity, settings.lower_threshold, settings.upper_threshold, passed
    );
    Ok(passed)
}

async fn evaluate_consensus<G>(
    name: &str,
    settings: &ConsensusSettings,
    entries: &[Entry],
    generator: &G,
) -> Result<bool, VerifierError>
where
    G: TextGenerator + ?Sized,
{
    let values = match resolve_placeholders(&settings.placeholders, entries) {
        Ok(values) => values,
        Err(missing) => {
            warn!("Method '{}': placeholder '{}' not found in entries", name, missing);
            return Ok(false);
        }
    };

    let system_prompt = template::render(&settings.system_prompt, &values);
    let user_prompt = template::render(&settings.user_prompt, &values);

    let responses = generator
        .generate(
            &system_prompt,
            &user_prompt,
            settings.num_responses,
            settings.max_new_tokens,
        )
        .await
        .map_err(|e| VerifierError::Generation {
            method: name.to_string(),
            message: e.to_string(),
        })?;

    let positives = settings.count_positive(&responses);
    let passed = positives >= settings.num_positive_required;
    debug!(
        "Method '{}': {}/{} positive responses (need {}) -> {}",
        name,
        positives,
        responses.len(),
        settings.num_positive_required,
        passed
    );
    Ok(passed)
}

/// Value of each placeholder taken from the first entry that has it
///
/// Stops at the first placeholder no entry provides and returns its name.
fn resolve_placeholders<'a>(
    placeholders: &'a [String],
    entries: &[Entry],
) -> Result<HashMap<String, String>, &'a str> {
    placeholders
        .iter()
        .map(|name| {
            entries
                .iter()
                .find_map(|entry| entry.get(name))
                .map(|value| (name.clone(), value.to_string()))
                .ok_or(name.as_str())
        })
        .collect()
}
