//! Deterministic generation and similarity ports for testing
//!
//! Both mocks record every call and share their state between clones, so a
//! test can hand one clone to the code under test and inspect the other.

use crate::LlmError;
use async_trait::async_trait;
use autoaumento_domain::traits::{SimilarityScorer, TextGenerator};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One recorded call to [`MockGenerator`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationCall {
    /// System prompt as received
    pub system_prompt: String,
    /// User prompt as received
    pub user_prompt: String,
    /// Requested number of responses
    pub num_responses: usize,
    /// Requested generation budget
    pub max_new_tokens: usize,
}

/// Mock text generator
///
/// Response `i` of every call is taken from the configured response list,
/// cycling when more responses are requested than configured.
///
/// # Examples
///
/// ```
/// use autoaumento_domain::traits::TextGenerator;
/// use autoaumento_llm::MockGenerator;
///
/// # #[tokio::main]
/// # async fn main() {
/// let mut generator = MockGenerator::with_responses(["yes", "no"]);
/// generator.add_response("special", "override");
///
/// let out = generator.generate("sys", "any", 3, 8).await.unwrap();
/// assert_eq!(out, vec!["yes", "no", "yes"]);
///
/// let out = generator.generate("sys", "special", 2, 8).await.unwrap();
/// assert_eq!(out, vec!["override", "override"]);
/// assert_eq!(generator.call_count(), 2);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockGenerator {
    responses: Vec<String>,
    by_prompt: Arc<Mutex<HashMap<String, String>>>,
    failing_prompts: Arc<Mutex<HashSet<String>>>,
    failure: Option<String>,
    calls: Arc<Mutex<Vec<GenerationCall>>>,
}

impl MockGenerator {
    /// Every response is `response`
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_responses([response.into()])
    }

    /// Responses cycle through `responses`
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
            by_prompt: Arc::new(Mutex::new(HashMap::new())),
            failing_prompts: Arc::new(Mutex::new(HashSet::new())),
            failure: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every call fails with [`LlmError::Communication`]
    pub fn failing(message: impl Into<String>) -> Self {
        let mut generator = Self::with_responses(Vec::<String>::new());
        generator.failure = Some(message.into());
        generator
    }

    /// Answer calls whose user prompt is exactly `user_prompt` with `response`
    pub fn add_response(&mut self, user_prompt: impl Into<String>, response: impl Into<String>) {
        lock(&self.by_prompt).insert(user_prompt.into(), response.into());
    }

    /// Fail calls whose user prompt is exactly `user_prompt`
    pub fn add_error(&mut self, user_prompt: impl Into<String>) {
        lock(&self.failing_prompts).insert(user_prompt.into());
    }

    /// Number of calls to `generate`
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Recorded calls, oldest first
    pub fn calls(&self) -> Vec<GenerationCall> {
        lock(&self.calls).clone()
    }

    /// Forget recorded calls
    pub fn reset_calls(&self) {
        lock(&self.calls).clear();
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    type Error = LlmError;

    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        num_responses: usize,
        max_new_tokens: usize,
    ) -> Result<Vec<String>, Self::Error> {
        lock(&self.calls).push(GenerationCall {
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
            num_responses,
            max_new_tokens,
        });

        if let Some(message) = &self.failure {
            return Err(LlmError::Communication(message.clone()));
        }
        if lock(&self.failing_prompts).contains(user_prompt) {
            return Err(LlmError::Other("Mock error".to_string()));
        }
        if let Some(response) = lock(&self.by_prompt).get(user_prompt) {
            return Ok(vec![response.clone(); num_responses]);
        }
        if self.responses.is_empty() {
            return Err(LlmError::InvalidResponse(
                "Mock generator has no responses configured".to_string(),
            ));
        }

        Ok(self
            .responses
            .iter()
            .cycle()
            .take(num_responses)
            .cloned()
            .collect())
    }
}

/// Mock similarity scorer
///
/// Scores are looked up by the second text (the candidate), falling back to a
/// default score.
#[derive(Debug, Clone)]
pub struct MockSimilarity {
    default_score: f64,
    scores: HashMap<String, f64>,
    failing_texts: HashSet<String>,
    failure: Option<String>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockSimilarity {
    /// Every comparison scores `score`
    pub fn new(score: f64) -> Self {
        Self {
            default_score: score,
            scores: HashMap::new(),
            failing_texts: HashSet::new(),
            failure: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every comparison fails with [`LlmError::Communication`]
    pub fn failing(message: impl Into<String>) -> Self {
        let mut scorer = Self::new(0.0);
        scorer.failure = Some(message.into());
        scorer
    }

    /// Score `candidate` with `score` instead of the default
    pub fn with_score(mut self, candidate: impl Into<String>, score: f64) -> Self {
        self.scores.insert(candidate.into(), score);
        self
    }

    /// Fail every comparison against `candidate`
    pub fn with_failure(mut self, candidate: impl Into<String>) -> Self {
        self.failing_texts.insert(candidate.into());
        self
    }

    /// Number of calls to `similarity`
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Recorded `(text_a, text_b)` pairs, oldest first
    pub fn calls(&self) -> Vec<(String, String)> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl SimilarityScorer for MockSimilarity {
    type Error = LlmError;

    async fn similarity(&self, text_a: &str, text_b: &str) -> Result<f64, Self::Error> {
        lock(&self.calls).push((text_a.to_string(), text_b.to_string()));

        if let Some(message) = &self.failure {
            return Err(LlmError::Communication(message.clone()));
        }
        if self.failing_texts.contains(text_b) {
            return Err(LlmError::Other(format!("Mock error for '{}'", text_b)));
        }
        Ok(self.scores.get(text_b).copied().unwrap_or(self.default_score))
    }
}
