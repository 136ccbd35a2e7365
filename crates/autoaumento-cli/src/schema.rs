//! Input document schema.
//!
//! Requests, extraction rules, verification processes, entry lists and named
//! setups are read from JSON or TOML files. The definitions here mirror the
//! domain types and convert into them through their validating constructors.

use crate::error::{CliError, Result};
use autoaumento_domain::{
    ConsensusSettings, EmbeddingSettings, Entry, ExtractionConfiguration, ExtractionMode,
    ExtractionRule, ExtractionScope, FallbackStrategy, MethodMode, MultipleStrategy,
    VerificationMethod, VerificationProcess,
};
use autoaumento_synthesizer::GenerationRequest;
use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::path::Path;

/// Document format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `.json`
    Json,
    /// `.toml`
    Toml,
}

impl DocumentFormat {
    /// Format of the file at `path`.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            _ => Err(CliError::InvalidInput(format!(
                "{}: expected a .json or .toml file",
                path.display()
            ))),
        }
    }

    /// Parse `contents` in this format.
    pub fn parse<T: DeserializeOwned>(self, contents: &str) -> Result<T> {
        match self {
            Self::Json => Ok(serde_json::from_str(contents)?),
            Self::Toml => Ok(toml::from_str(contents)?),
        }
    }
}

/// Read and parse a JSON or TOML document.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = DocumentFormat::from_path(path)?;
    let contents = fs::read_to_string(path)?;
    format.parse(&contents)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ModeDef {
    Regex,
    Keyword,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ScopeDef {
    LineByLine,
    #[default]
    AllText,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum FallbackDef {
    #[default]
    Error,
    Empty,
    Custom,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum MultipleDef {
    #[default]
    First,
    All,
}

/// One extraction rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDefinition {
    label: String,
    mode: ModeDef,
    pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    secondary_pattern: Option<String>,
    #[serde(default)]
    scope: ScopeDef,
    #[serde(default)]
    fallback: FallbackDef,
    /// Value substituted by the `custom` fallback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fallback_value: Option<String>,
    #[serde(default)]
    multiple: MultipleDef,
}

impl RuleDefinition {
    fn to_rule(&self) -> Result<ExtractionRule> {
        let fallback = match (self.fallback, &self.fallback_value) {
            (FallbackDef::Error, _) => FallbackStrategy::Error,
            (FallbackDef::Empty, _) => FallbackStrategy::Empty,
            (FallbackDef::Custom, Some(value)) => FallbackStrategy::Custom(value.clone()),
            (FallbackDef::Custom, None) => {
                return Err(CliError::InvalidInput(format!(
                    "rule '{}': custom fallback requires fallback_value",
                    self.label
                )))
            }
        };

        Ok(ExtractionRule {
            label: self.label.clone(),
            mode: match self.mode {
                ModeDef::Regex => ExtractionMode::Regex,
                ModeDef::Keyword => ExtractionMode::Keyword,
            },
            pattern: self.pattern.clone(),
            secondary_pattern: self.secondary_pattern.clone(),
            scope: match self.scope {
                ScopeDef::LineByLine => ExtractionScope::LineByLine,
                ScopeDef::AllText => ExtractionScope::AllText,
            },
            fallback,
            multiple: match self.multiple {
                MultipleDef::First => MultipleStrategy::First,
                MultipleDef::All => MultipleStrategy::All,
            },
        })
    }
}

/// An extraction configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionDefinition {
    /// Rules in combination order
    pub rules: Vec<RuleDefinition>,
}

impl ExtractionDefinition {
    /// Build the validated domain configuration.
    pub fn to_configuration(&self) -> Result<ExtractionConfiguration> {
        let rules = self
            .rules
            .iter()
            .map(RuleDefinition::to_rule)
            .collect::<Result<Vec<_>>>()?;
        Ok(ExtractionConfiguration::new(rules)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum MethodModeDef {
    #[serde(alias = "eliminatory")]
    Eliminatorio,
    #[serde(alias = "accumulative")]
    Acumulativo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum SettingsDef {
    Embedding {
        lower_threshold: f64,
        upper_threshold: f64,
        reference_text: String,
    },
    Consensus {
        system_prompt: String,
        user_prompt: String,
        #[serde(default)]
        placeholders: Vec<String>,
        positive_responses: Vec<String>,
        num_responses: usize,
        num_positive_required: usize,
        max_new_tokens: usize,
    },
}

/// One verification method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDefinition {
    name: String,
    mode: MethodModeDef,
    settings: SettingsDef,
}

impl MethodDefinition {
    fn to_method(&self) -> VerificationMethod {
        let mode = match self.mode {
            MethodModeDef::Eliminatorio => MethodMode::Eliminatorio,
            MethodModeDef::Acumulativo => MethodMode::Acumulativo,
        };
        match &self.settings {
            SettingsDef::Embedding {
                lower_threshold,
                upper_threshold,
                reference_text,
            } => VerificationMethod::embedding(
                self.name.clone(),
                mode,
                EmbeddingSettings {
                    lower_threshold: *lower_threshold,
                    upper_threshold: *upper_threshold,
                    reference_text: reference_text.clone(),
                },
            ),
            SettingsDef::Consensus {
                system_prompt,
                user_prompt,
                placeholders,
                positive_responses,
                num_responses,
                num_positive_required,
                max_new_tokens,
            } => VerificationMethod::consensus(
                self.name.clone(),
                mode,
                ConsensusSettings {
                    system_prompt: system_prompt.clone(),
                    user_prompt: user_prompt.clone(),
                    placeholders: placeholders.clone(),
                    positive_responses: positive_responses.clone(),
                    num_responses: *num_responses,
                    num_positive_required: *num_positive_required,
                    max_new_tokens: *max_new_tokens,
                },
            ),
        }
    }
}

/// A verification process document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessDefinition {
    /// Methods in evaluation order
    pub methods: Vec<MethodDefinition>,
    /// Acumulativo passes needed for `confirmed`
    pub required_for_confirmed: usize,
    /// Acumulativo passes needed for `needs_review`; `-1` for gate-only chains
    pub required_for_review: i64,
}

impl ProcessDefinition {
    /// Build the validated domain process.
    pub fn to_process(&self) -> Result<VerificationProcess> {
        let methods = self.methods.iter().map(MethodDefinition::to_method).collect();
        Ok(VerificationProcess::new(
            methods,
            self.required_for_confirmed,
            self.required_for_review,
        )?)
    }
}

/// An entry whose serialized form keeps label order.
///
/// serde visits map keys in document order, so reading into an [`Entry`]
/// directly preserves which label comes first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryRecord(pub Entry);

/// Borrowed view used to serialize an [`Entry`] in label order.
#[derive(Debug, Clone, Copy)]
pub struct EntryRef<'a>(pub &'a Entry);

impl Serialize for EntryRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, value) in self.0.iter() {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

impl Serialize for EntryRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        EntryRef(&self.0).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EntryRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EntryVisitor;

        impl<'de> Visitor<'de> for EntryVisitor {
            type Value = EntryRecord;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of labels to string values")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entry = Entry::new();
                while let Some((label, value)) = access.next_entry::<String, String>()? {
                    entry.insert(label, value);
                }
                Ok(EntryRecord(entry))
            }
        }

        deserializer.deserialize_map(EntryVisitor)
    }
}

/// A list of entries, as read by `verify` and written by `extract`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntriesFile {
    /// Entries in order
    pub entries: Vec<EntryRecord>,
}

impl EntriesFile {
    /// Unwrap into domain entries.
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries.into_iter().map(|record| record.0).collect()
    }
}

/// A named, reusable pipeline setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupDefinition {
    /// Generation model, overriding the configured one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    /// Generation request
    pub generation: GenerationRequest,
    /// Extraction rules
    pub extraction: ExtractionDefinition,
    /// Verification process
    pub verification: ProcessDefinition,
}

impl SetupDefinition {
    /// Convert every part, failing on the first invalid one.
    pub fn resolve(&self) -> Result<(ExtractionConfiguration, VerificationProcess)> {
        self.generation.render()?;
        Ok((
            self.extraction.to_configuration()?,
            self.verification.to_process()?,
        ))
    }
}
