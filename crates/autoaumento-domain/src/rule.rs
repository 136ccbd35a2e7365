//! Extraction rules - how labelled fields are pulled out of generated text

use crate::ConfigurationError;
use std::collections::HashSet;

/// How a rule's primary pattern is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractionMode {
    /// Primary pattern is a regular expression
    Regex,
    /// Primary pattern is a literal start token, optionally closed by a literal end token
    Keyword,
}

/// Which text units a rule is applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExtractionScope {
    /// Each line is scanned on its own, matches concatenated in line order
    LineByLine,
    /// The whole text is scanned as one unit
    #[default]
    AllText,
}

/// What to do when a rule finds nothing
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FallbackStrategy {
    /// Abort the whole extraction
    #[default]
    Error,
    /// Substitute a single empty string
    Empty,
    /// Substitute a single configured value
    Custom(String),
}

/// How many matches of a rule survive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MultipleStrategy {
    /// Keep only the first match
    #[default]
    First,
    /// Keep every match
    All,
}

/// A single extraction rule
///
/// # Examples
///
/// ```
/// use autoaumento_domain::{ExtractionRule, ExtractionScope, MultipleStrategy};
///
/// let rule = ExtractionRule::regex("score", r"score: (\d+)")
///     .with_scope(ExtractionScope::LineByLine)
///     .with_multiple(MultipleStrategy::All);
/// assert_eq!(rule.label, "score");
/// assert!(rule.secondary_pattern.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRule {
    /// Field name the extracted value is stored under
    pub label: String,

    /// Interpretation of `pattern`
    pub mode: ExtractionMode,

    /// Regex (Regex mode) or literal start token (Keyword mode)
    pub pattern: String,

    /// Literal end token; ignored in Regex mode
    pub secondary_pattern: Option<String>,

    /// Text units the rule scans
    pub scope: ExtractionScope,

    /// Behaviour when nothing matches
    pub fallback: FallbackStrategy,

    /// Behaviour when several things match
    pub multiple: MultipleStrategy,
}

impl ExtractionRule {
    /// Create a Regex-mode rule with default scope, fallback and multiplicity
    pub fn regex(label: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            mode: ExtractionMode::Regex,
            pattern: pattern.into(),
            secondary_pattern: None,
            scope: ExtractionScope::default(),
            fallback: FallbackStrategy::default(),
            multiple: MultipleStrategy::default(),
        }
    }

    /// Create a Keyword-mode rule delimited by `start` and an optional `end` token
    pub fn keyword(
        label: impl Into<String>,
        start: impl Into<String>,
        end: Option<impl Into<String>>,
    ) -> Self {
        Self {
            label: label.into(),
            mode: ExtractionMode::Keyword,
            pattern: start.into(),
            secondary_pattern: end.map(Into::into),
            scope: ExtractionScope::default(),
            fallback: FallbackStrategy::default(),
            multiple: MultipleStrategy::default(),
        }
    }

    /// Set the scan scope
    pub fn with_scope(mut self, scope: ExtractionScope) -> Self {
        self.scope = scope;
        self
    }

    /// Set the fallback strategy
    pub fn with_fallback(mut self, fallback: FallbackStrategy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Set the multiple-match strategy
    pub fn with_multiple(mut self, multiple: MultipleStrategy) -> Self {
        self.multiple = multiple;
        self
    }

    /// End token that actually takes part in Keyword scanning
    ///
    /// `None` in Regex mode and when the configured end token is empty.
    pub fn end_token(&self) -> Option<&str> {
        match self.mode {
            ExtractionMode::Regex => None,
            ExtractionMode::Keyword => self
                .secondary_pattern
                .as_deref()
                .filter(|end| !end.is_empty()),
        }
    }
}

/// An ordered, immutable set of extraction rules
///
/// Rule order only matters when entries are combined; matching is independent
/// per rule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractionConfiguration {
    rules: Vec<ExtractionRule>,
}

impl ExtractionConfiguration {
    /// Build a configuration, rejecting empty or duplicate labels
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::EmptyLabel`] or
    /// [`ConfigurationError::DuplicateLabel`].
    pub fn new(rules: Vec<ExtractionRule>) -> Result<Self, ConfigurationError> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if rule.label.is_empty() {
                return Err(ConfigurationError::EmptyLabel);
            }
            if !seen.insert(rule.label.as_str()) {
                return Err(ConfigurationError::DuplicateLabel(rule.label.clone()));
            }
        }

        Ok(Self { rules })
    }

    /// Rules in configured order
    pub fn rules(&self) -> &[ExtractionRule] {
        &self.rules
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the configuration has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Labels in configured order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.label.as_str())
    }
}
