//! Core Extractor implementation

use crate::combiner::combine;
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::rule_engine::CompiledRule;
use autoaumento_domain::{Entry, ExtractionConfiguration};
use tracing::{debug, info};

/// The Extractor turns generated text into entries according to a fixed rule set
///
/// Build it once per configuration and reuse it: it holds only read-only
/// state, so one instance can serve many texts, also from several threads.
#[derive(Debug, Clone)]
pub struct Extractor {
    rules: Vec<CompiledRule>,
    config: ExtractorConfig,
}

impl Extractor {
    /// Create a new Extractor with default settings
    pub fn new(configuration: &ExtractionConfiguration) -> Result<Self, ExtractorError> {
        Self::with_config(configuration, ExtractorConfig::default())
    }

    /// Create a new Extractor with explicit settings
    pub fn with_config(
        configuration: &ExtractionConfiguration,
        config: ExtractorConfig,
    ) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;

        let rules = configuration
            .rules()
            .iter()
            .map(CompiledRule::compile)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules, config })
    }

    /// Number of rules
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Extract entries from `text`
    ///
    /// Input is capped at [`ExtractorConfig::max_text_length`] characters
    /// (100,000 by default) before any rule runs. This is a resource guard for
    /// runaway generations; raise it through the config (`[extraction]
    /// max_text_length` in the CLI) for longer texts.
    ///
    /// # Errors
    ///
    /// [`ExtractorError::TextTooLong`] when `text` exceeds the cap.
    /// [`ExtractorError::NoMatch`] when a rule with the `Error` fallback finds
    /// nothing; no partial entries are returned in that case.
    pub fn extract(&self, text: &str) -> Result<Vec<Entry>, ExtractorError> {
        let length = text.chars().count();
        if length > self.config.max_text_length {
            return Err(ExtractorError::TextTooLong(
                length,
                self.config.max_text_length,
            ));
        }

        let mut columns = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            let values = rule.apply(text)?;
            debug!("Rule '{}' produced {} value(s)", rule.label(), values.len());
            columns.push((rule.label().to_string(), values));
        }

        let entries = combine(columns);
        info!(
            "Extracted {} entries from {} chars with {} rule(s)",
            entries.len(),
            length,
            self.rules.len()
        );
        Ok(entries)
    }
}

/// One-shot extraction with default settings
///
/// # Examples
///
/// ```
/// use autoaumento_domain::{ExtractionConfiguration, ExtractionRule};
/// use autoaumento_extractor::extract;
///
/// let config = ExtractionConfiguration::new(vec![
///     ExtractionRule::keyword("answer", "Answer:", None::<String>),
/// ])
/// .unwrap();
///
/// let entries = extract("Question: why?\nAnswer: because", &config).unwrap();
/// assert_eq!(entries[0].get("answer"), Some("because"));
/// ```
pub fn extract(
    text: &str,
    configuration: &ExtractionConfiguration,
) -> Result<Vec<Entry>, ExtractorError> {
    Extractor::new(configuration)?.extract(text)
}
