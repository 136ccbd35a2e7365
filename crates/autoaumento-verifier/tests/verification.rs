//! End-to-end verification scenarios using spy ports

use autoaumento_domain::{
    ConfigurationError, ConsensusSettings, EmbeddingSettings, Entry, FinalStatus, MethodMode,
    VerificationMethod, VerificationProcess,
};
use autoaumento_llm::{MockGenerator, MockSimilarity};
use autoaumento_verifier::{Verifier, VerifierConfig, VerifierError};

fn embedding(name: &str, mode: MethodMode) -> VerificationMethod {
    VerificationMethod::embedding(
        name,
        mode,
        EmbeddingSettings {
            lower_threshold: 0.9,
            upper_threshold: 0.995,
            reference_text: "The capital of France is Paris.".to_string(),
        },
    )
}

fn consensus(name: &str, mode: MethodMode) -> VerificationMethod {
    VerificationMethod::consensus(
        name,
        mode,
        ConsensusSettings {
            system_prompt: "Answer only yes or no.".to_string(),
            user_prompt: "Is this sentence correct? {sentence}".to_string(),
            placeholders: vec!["sentence".to_string()],
            positive_responses: vec!["yes".to_string(), "sí".to_string()],
            num_responses: 3,
            num_positive_required: 2,
            max_new_tokens: 5,
        },
    )
}

fn candidate(sentence: &str) -> Vec<Entry> {
    vec![[("sentence", sentence)].into_iter().collect()]
}

fn two_accumulative() -> VerificationProcess {
    VerificationProcess::new(
        vec![
            embedding("similarity", MethodMode::Acumulativo),
            consensus("judge", MethodMode::Acumulativo),
        ],
        2,
        1,
    )
    .unwrap()
}

#[tokio::test]
async fn failing_eliminatorio_skips_remaining_methods() {
    let process = VerificationProcess::new(
        vec![
            embedding("gate", MethodMode::Eliminatorio),
            consensus("judge", MethodMode::Acumulativo),
        ],
        1,
        0,
    )
    .unwrap();
    let generator = MockGenerator::new("yes");
    let scorer = MockSimilarity::new(0.1);
    let verifier = Verifier::new(generator.clone(), scorer.clone());

    let outcome = verifier
        .verify(candidate("Paris is in France."), &process)
        .await
        .unwrap();

    assert_eq!(outcome.final_status(), FinalStatus::Discarded);
    assert_eq!(outcome.methods_failed(), ["gate".to_string()]);
    assert!(outcome.methods_passed().is_empty());
    assert_eq!(scorer.call_count(), 1);
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn eliminatorio_only_chain_confirms_or_discards() {
    let gates = VerificationProcess::new(
        vec![
            embedding("similarity_gate", MethodMode::Eliminatorio),
            consensus("judge_gate", MethodMode::Eliminatorio),
        ],
        0,
        -1,
    )
    .unwrap();

    let verifier = Verifier::new(MockGenerator::new("yes"), MockSimilarity::new(0.95));
    let outcome = verifier
        .verify(candidate("Paris is in France."), &gates)
        .await
        .unwrap();
    assert_eq!(outcome.final_status(), FinalStatus::Confirmed);
    assert_eq!(
        outcome.methods_passed(),
        ["similarity_gate".to_string(), "judge_gate".to_string()]
    );

    let generator = MockGenerator::new("yes");
    let verifier = Verifier::new(generator.clone(), MockSimilarity::new(0.2));
    let outcome = verifier
        .verify(candidate("Paris is in France."), &gates)
        .await
        .unwrap();
    assert_eq!(outcome.final_status(), FinalStatus::Discarded);
    assert_eq!(outcome.methods_failed(), ["similarity_gate".to_string()]);
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn empty_fallback_value_is_still_scored() {
    let wide = |name: &str, mode: MethodMode| {
        VerificationMethod::embedding(
            name,
            mode,
            EmbeddingSettings {
                lower_threshold: -1.5,
                upper_threshold: 1.5,
                reference_text: "The capital of France is Paris.".to_string(),
            },
        )
    };
    let process = VerificationProcess::new(
        vec![
            wide("gate", MethodMode::Eliminatorio),
            wide("similarity", MethodMode::Acumulativo),
        ],
        1,
        0,
    )
    .unwrap();
    let scorer = MockSimilarity::new(0.0);
    let verifier = Verifier::new(MockGenerator::new("unused"), scorer.clone());
    let blank: Vec<Entry> = vec![[("answer", "")].into_iter().collect()];

    let outcome = verifier.verify(blank, &process).await.unwrap();

    assert_eq!(outcome.final_status(), FinalStatus::Confirmed);
    assert_eq!(
        outcome.methods_passed(),
        ["gate".to_string(), "similarity".to_string()]
    );
    assert_eq!(scorer.call_count(), 2);
}

#[tokio::test]
async fn passing_eliminatorio_does_not_count_towards_thresholds() {
    let process = VerificationProcess::new(
        vec![
            embedding("gate", MethodMode::Eliminatorio),
            consensus("judge", MethodMode::Acumulativo),
        ],
        1,
        0,
    )
    .unwrap();
    let verifier = Verifier::new(MockGenerator::new("no"), MockSimilarity::new(0.95));

    let outcome = verifier
        .verify(candidate("Paris is in France."), &process)
        .await
        .unwrap();

    assert_eq!(outcome.methods_passed(), ["gate".to_string()]);
    assert_eq!(outcome.methods_failed(), ["judge".to_string()]);
    assert_eq!(outcome.final_status(), FinalStatus::NeedsReview);
}

#[tokio::test]
async fn both_accumulative_pass_confirms() {
    let verifier = Verifier::new(MockGenerator::new("Yes."), MockSimilarity::new(0.95));

    let outcome = verifier
        .verify(candidate("Paris is the French capital."), &two_accumulative())
        .await
        .unwrap();

    assert_eq!(outcome.final_status(), FinalStatus::Confirmed);
    assert_eq!(
        outcome.methods_passed(),
        ["similarity".to_string(), "judge".to_string()]
    );
    assert_eq!(outcome.entries().len(), 1);
}

#[tokio::test]
async fn one_accumulative_pass_needs_review() {
    let verifier = Verifier::new(MockGenerator::new("No."), MockSimilarity::new(0.95));

    let outcome = verifier
        .verify(candidate("Paris is the French capital."), &two_accumulative())
        .await
        .unwrap();

    assert_eq!(outcome.final_status(), FinalStatus::NeedsReview);
    assert_eq!(outcome.methods_failed(), ["judge".to_string()]);
}

#[tokio::test]
async fn no_accumulative_pass_discards() {
    let generator = MockGenerator::new("No.");
    let verifier = Verifier::new(generator.clone(), MockSimilarity::new(0.999));

    let outcome = verifier
        .verify(candidate("The capital of France is Paris."), &two_accumulative())
        .await
        .unwrap();

    assert_eq!(outcome.final_status(), FinalStatus::Discarded);
    assert_eq!(outcome.methods_failed().len(), 2);
    assert_eq!(generator.call_count(), 1);
}

#[tokio::test]
async fn fixed_two_condition_preset_matches_general_engine() {
    let process = VerificationProcess::embedding_and_consensus(
        "similarity",
        EmbeddingSettings {
            lower_threshold: 0.9,
            upper_threshold: 0.995,
            reference_text: "reference".to_string(),
        },
        "judge",
        ConsensusSettings {
            system_prompt: String::new(),
            user_prompt: "{sentence}".to_string(),
            placeholders: vec!["sentence".to_string()],
            positive_responses: vec!["yes".to_string()],
            num_responses: 1,
            num_positive_required: 1,
            max_new_tokens: 1,
        },
    )
    .unwrap();

    for (score, response, expected) in [
        (0.95, "yes", FinalStatus::Confirmed),
        (0.5, "yes", FinalStatus::NeedsReview),
        (0.95, "no", FinalStatus::NeedsReview),
        (0.5, "no", FinalStatus::Discarded),
    ] {
        let verifier = Verifier::new(MockGenerator::new(response), MockSimilarity::new(score));
        let outcome = verifier.verify(candidate("x"), &process).await.unwrap();
        assert_eq!(outcome.final_status(), expected, "{} / {}", score, response);
    }
}

#[tokio::test]
async fn port_failure_propagates_with_method_name() {
    let verifier = Verifier::new(MockGenerator::failing("model unloaded"), MockSimilarity::new(0.95));

    let err = verifier
        .verify(candidate("Paris."), &two_accumulative())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        VerifierError::Generation {
            method: "judge".to_string(),
            message: "Communication error: model unloaded".to_string(),
        }
    );
}

#[tokio::test]
async fn invalid_process_is_never_built() {
    let result = VerificationProcess::new(
        vec![embedding("only", MethodMode::Acumulativo)],
        2,
        0,
    );
    assert_eq!(
        result,
        Err(ConfigurationError::ConfirmedExceedsAccumulative {
            required: 2,
            available: 1
        })
    );
}

#[tokio::test]
async fn batch_keeps_order_and_isolates_failures() {
    let scorer = MockSimilarity::new(0.95)
        .with_score("near copy", 0.999)
        .with_failure("broken");
    let verifier = Verifier::with_config(
        MockGenerator::new("yes"),
        scorer,
        VerifierConfig { max_concurrency: 2 },
    )
    .unwrap();

    let items = verifier
        .verify_batch(
            vec![
                candidate("good"),
                candidate("broken"),
                candidate("near copy"),
                candidate("also good"),
            ],
            &two_accumulative(),
        )
        .await;

    assert_eq!(items.len(), 4);
    assert_eq!(
        items.iter().map(|item| item.index).collect::<Vec<_>>(),
        vec![0, 1, 2, 3]
    );

    let status = |i: usize| items[i].result.as_ref().map(|o| o.final_status()).ok();
    assert_eq!(status(0), Some(FinalStatus::Confirmed));
    assert!(matches!(
        items[1].result,
        Err(VerifierError::Similarity { .. })
    ));
    assert_eq!(status(2), Some(FinalStatus::NeedsReview));
    assert_eq!(status(3), Some(FinalStatus::Confirmed));
}

#[tokio::test]
async fn empty_batch() {
    let verifier = Verifier::new(MockGenerator::new("yes"), MockSimilarity::new(0.95));
    let items = verifier.verify_batch(Vec::new(), &two_accumulative()).await;
    assert!(items.is_empty());
}

#[test]
fn zero_concurrency_is_rejected() {
    let result = Verifier::with_config(
        MockGenerator::new("yes"),
        MockSimilarity::new(0.95),
        VerifierConfig { max_concurrency: 0 },
    );
    assert!(matches!(result, Err(VerifierError::Config(_))));
}
