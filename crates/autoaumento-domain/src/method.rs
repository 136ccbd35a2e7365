//! Verification methods and their settings

use crate::template;
use crate::ConfigurationError;
use tracing::warn;

/// How a method's result feeds the final disposition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodMode {
    /// Failure discards the candidate immediately; later methods are skipped
    Eliminatorio,
    /// A pass counts towards the confirmed/review thresholds
    Acumulativo,
}

impl MethodMode {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            MethodMode::Eliminatorio => "eliminatorio",
            MethodMode::Acumulativo => "acumulativo",
        }
    }
}

/// Kind of check a method performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodType {
    /// Similarity against a reference text
    Embedding,
    /// Majority vote of generated judgements
    Consensus,
}

impl MethodType {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            MethodType::Embedding => "embedding",
            MethodType::Consensus => "consensus",
        }
    }
}

/// Settings of an embedding-similarity check
///
/// A candidate passes iff `lower_threshold < similarity < upper_threshold`.
/// The upper bound rejects near-copies of the reference.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingSettings {
    /// Exclusive lower bound
    pub lower_threshold: f64,
    /// Exclusive upper bound
    pub upper_threshold: f64,
    /// Text the candidate is compared with
    pub reference_text: String,
}

impl EmbeddingSettings {
    /// Whether a similarity score falls strictly inside the thresholds
    pub fn accepts(&self, similarity: f64) -> bool {
        similarity > self.lower_threshold && similarity < self.upper_threshold
    }

    fn validate(&self, method: &str) -> Result<(), ConfigurationError> {
        let finite = self.lower_threshold.is_finite() && self.upper_threshold.is_finite();
        if !finite || self.lower_threshold >= self.upper_threshold {
            return Err(ConfigurationError::InvalidThresholds {
                method: method.to_string(),
                lower: self.lower_threshold,
                upper: self.upper_threshold,
            });
        }
        Ok(())
    }
}

/// Settings of a consensus check
#[derive(Debug, Clone, PartialEq)]
pub struct ConsensusSettings {
    /// System prompt template
    pub system_prompt: String,
    /// User prompt template
    pub user_prompt: String,
    /// Placeholder names resolved from entries, in declaration order
    pub placeholders: Vec<String>,
    /// Tokens that mark a response as positive (case-insensitive substring)
    pub positive_responses: Vec<String>,
    /// Responses requested from the generator
    pub num_responses: usize,
    /// Positive responses needed to pass
    pub num_positive_required: usize,
    /// Generation budget per response
    pub max_new_tokens: usize,
}

impl ConsensusSettings {
    /// Whether `response` contains any positive token, ignoring case
    pub fn is_positive(&self, response: &str) -> bool {
        let response = response.to_lowercase();
        self.positive_responses
            .iter()
            .any(|p| response.contains(&p.to_lowercase()))
    }

    /// Number of positive responses in `responses`
    pub fn count_positive<S: AsRef<str>>(&self, responses: &[S]) -> usize {
        responses
            .iter()
            .filter(|r| self.is_positive(r.as_ref()))
            .count()
    }

    fn validate(&self, method: &str) -> Result<(), ConfigurationError> {
        let invalid = |reason: String| ConfigurationError::InvalidConsensus {
            method: method.to_string(),
            reason,
        };

        if self.num_responses == 0 {
            return Err(invalid("num_responses must be greater than 0".to_string()));
        }
        if self.max_new_tokens == 0 {
            return Err(invalid("max_new_tokens must be greater than 0".to_string()));
        }
        if self.num_positive_required > self.num_responses {
            warn!(
                "Method '{}': num_positive_required ({}) exceeds num_responses ({}), it can never pass",
                method, self.num_positive_required, self.num_responses
            );
        }

        for prompt in [&self.system_prompt, &self.user_prompt] {
            if let Some(placeholder) = template::undeclared(prompt, &self.placeholders)
                .into_iter()
                .next()
            {
                return Err(ConfigurationError::UndeclaredPlaceholder {
                    method: method.to_string(),
                    placeholder,
                });
            }
        }

        Ok(())
    }
}

/// Settings variant, one per method type
#[derive(Debug, Clone, PartialEq)]
pub enum MethodSettings {
    /// Embedding-similarity check
    Embedding(EmbeddingSettings),
    /// Consensus check
    Consensus(ConsensusSettings),
}

/// A named verification method
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationMethod {
    /// Unique name within a process
    pub name: String,
    /// Eliminatorio or acumulativo
    pub mode: MethodMode,
    /// Type-specific settings
    pub settings: MethodSettings,
}

impl VerificationMethod {
    /// Create an embedding method
    pub fn embedding(name: impl Into<String>, mode: MethodMode, settings: EmbeddingSettings) -> Self {
        Self {
            name: name.into(),
            mode,
            settings: MethodSettings::Embedding(settings),
        }
    }

    /// Create a consensus method
    pub fn consensus(name: impl Into<String>, mode: MethodMode, settings: ConsensusSettings) -> Self {
        Self {
            name: name.into(),
            mode,
            settings: MethodSettings::Consensus(settings),
        }
    }

    /// Type derived from the settings variant
    pub fn method_type(&self) -> MethodType {
        match self.settings {
            MethodSettings::Embedding(_) => MethodType::Embedding,
            MethodSettings::Consensus(_) => MethodType::Consensus,
        }
    }

    /// Whether the method counts towards thresholds
    pub fn is_accumulative(&self) -> bool {
        self.mode == MethodMode::Acumulativo
    }

    /// Check name and settings invariants
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.name.is_empty() {
            return Err(ConfigurationError::EmptyMethodName);
        }
        match &self.settings {
            MethodSettings::Embedding(settings) => settings.validate(&self.name),
            MethodSettings::Consensus(settings) => settings.validate(&self.name),
        }
    }
}
