//! Candidate generation from prompt templates

use crate::error::SynthesizerError;
use autoaumento_domain::template;
use autoaumento_domain::traits::TextGenerator;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// Parameters of one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// System prompt template
    pub system_prompt: String,
    /// User prompt template
    pub user_prompt: String,
    /// Responses requested per generator call
    pub num_return_sequences: usize,
    /// Generation budget per response
    pub max_new_tokens: usize,
    /// Number of generator calls
    pub num_executions: usize,
    /// Values for the `{placeholder}` tokens of both prompts
    #[serde(default)]
    pub reference_data: HashMap<String, String>,
}

impl GenerationRequest {
    /// Check counts and render both prompts
    ///
    /// Returns the rendered `(system, user)` prompts.
    pub fn render(&self) -> Result<(String, String), SynthesizerError> {
        if self.num_return_sequences == 0 || self.max_new_tokens == 0 || self.num_executions == 0 {
            return Err(SynthesizerError::InvalidRequest(
                "num_return_sequences, max_new_tokens and num_executions must be greater than 0"
                    .to_string(),
            ));
        }

        let mut placeholders = template::placeholders(&self.system_prompt);
        for name in template::placeholders(&self.user_prompt) {
            if !placeholders.contains(&name) {
                placeholders.push(name);
            }
        }

        if !placeholders.is_empty() && self.reference_data.is_empty() {
            return Err(SynthesizerError::InvalidRequest(
                "placeholders defined but no reference data provided".to_string(),
            ));
        }
        if let Some(missing) = placeholders
            .into_iter()
            .find(|name| !self.reference_data.contains_key(name))
        {
            return Err(SynthesizerError::MissingPlaceholder(missing));
        }

        Ok((
            template::render(&self.system_prompt, &self.reference_data),
            template::render(&self.user_prompt, &self.reference_data),
        ))
    }
}

/// Generates candidate texts through a [`TextGenerator`]
pub struct Synthesizer<G> {
    generator: G,
}

impl<G: TextGenerator> Synthesizer<G> {
    /// Create a new Synthesizer
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Underlying generator
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Run the generator `num_executions` times and collect every response
    ///
    /// Prompts are validated and rendered before the first call. Responses
    /// keep call order; the first generator failure aborts the run.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<Vec<String>, SynthesizerError> {
        let (system_prompt, user_prompt) = request.render()?;
        debug!("Rendered user prompt: {}", user_prompt);

        let mut results =
            Vec::with_capacity(request.num_executions * request.num_return_sequences);
        for execution in 0..request.num_executions {
            let responses = self
                .generator
                .generate(
                    &system_prompt,
                    &user_prompt,
                    request.num_return_sequences,
                    request.max_new_tokens,
                )
                .await
                .map_err(|e| SynthesizerError::Generation(e.to_string()))?;
            debug!(
                "Execution {}/{} returned {} responses",
                execution + 1,
                request.num_executions,
                responses.len()
            );
            results.extend(responses);
        }

        info!("Generated {} results", results.len());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(user_prompt: &str) -> GenerationRequest {
        GenerationRequest {
            system_prompt: "You write {kind} questions.".to_string(),
            user_prompt: user_prompt.to_string(),
            num_return_sequences: 2,
            max_new_tokens: 50,
            num_executions: 1,
            reference_data: HashMap::from([("kind".to_string(), "trivia".to_string())]),
        }
    }

    #[test]
    fn test_render_substitutes_both_prompts() {
        let (system, user) = request("One question about {kind}.").render().unwrap();
        assert_eq!(system, "You write trivia questions.");
        assert_eq!(user, "One question about trivia.");
    }

    #[test]
    fn test_render_rejects_zero_counts() {
        let mut req = request("x");
        req.num_executions = 0;
        assert!(matches!(req.render(), Err(SynthesizerError::InvalidRequest(_))));

        let mut req = request("x");
        req.max_new_tokens = 0;
        assert!(matches!(req.render(), Err(SynthesizerError::InvalidRequest(_))));
    }

    #[test]
    fn test_render_requires_reference_data_for_placeholders() {
        let mut req = request("x");
        req.reference_data.clear();
        assert!(matches!(req.render(), Err(SynthesizerError::InvalidRequest(_))));
    }

    #[test]
    fn test_render_reports_missing_placeholder() {
        let req = request("About {topic}");
        assert!(matches!(
            req.render(),
            Err(SynthesizerError::MissingPlaceholder(name)) if name == "topic"
        ));
    }

    #[test]
    fn test_render_without_placeholders_needs_no_data() {
        let req = GenerationRequest {
            system_prompt: "plain".to_string(),
            user_prompt: "plain".to_string(),
            num_return_sequences: 1,
            max_new_tokens: 1,
            num_executions: 1,
            reference_data: HashMap::new(),
        };
        assert_eq!(
            req.render().unwrap(),
            ("plain".to_string(), "plain".to_string())
        );
    }

    #[test]
    fn test_reference_data_defaults_to_empty() {
        let json = r#"{
            "system_prompt": "s",
            "user_prompt": "u",
            "num_return_sequences": 1,
            "max_new_tokens": 10,
            "num_executions": 2
        }"#;
        let req: GenerationRequest = serde_json::from_str(json).unwrap();
        assert!(req.reference_data.is_empty());
        assert_eq!(req.num_executions, 2);
    }
}
