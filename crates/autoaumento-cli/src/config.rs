//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use autoaumento_extractor::ExtractorConfig;
use autoaumento_verifier::VerifierConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Generation and embedding backends
    #[serde(default)]
    pub backend: BackendConfig,

    /// Extractor limits
    #[serde(default)]
    pub extraction: ExtractorConfig,

    /// Verifier settings
    #[serde(default)]
    pub verification: VerifierConfig,

    /// Where named setups live
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log filter
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputSettings,
}

/// Which backend serves generation and similarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Local Ollama server
    Ollama,
    /// Deterministic in-process backend
    Mock,
}

/// Backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend implementation
    pub kind: BackendKind,

    /// Ollama API endpoint
    pub endpoint: String,

    /// Model used for generation and consensus
    pub generation_model: String,

    /// Model used for embeddings
    pub embedding_model: String,

    /// Attempts per request
    pub max_retries: u32,

    /// Text every generation returns with the mock backend
    pub mock_response: String,
}

/// Storage settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Setups directory, `~/.autoaumento/setups` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setups_dir: Option<PathBuf>,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    pub level: String,
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Directory holding the configuration file and default setups directory.
    pub fn home() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".autoaumento"))
    }

    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::home()?.join("config.toml"))
    }

    /// Load configuration from the default path, or defaults when it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from `path`, or defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.extraction
            .validate()
            .map_err(|e| CliError::Config(format!("[extraction] {}", e)))?;
        self.verification
            .validate()
            .map_err(|e| CliError::Config(format!("[verification] {}", e)))?;
        if self.backend.max_retries == 0 {
            return Err(CliError::Config(
                "[backend] max_retries must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Setups directory, resolved against the default location.
    pub fn setups_dir(&self) -> Result<PathBuf> {
        match &self.storage.setups_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::home()?.join("setups")),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::Ollama,
            endpoint: autoaumento_llm::ollama::DEFAULT_ENDPOINT.to_string(),
            generation_model: "llama3.2".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
            max_retries: autoaumento_llm::ollama::DEFAULT_MAX_RETRIES,
            mock_response: "yes".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
