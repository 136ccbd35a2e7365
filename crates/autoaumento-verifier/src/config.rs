//! Verifier configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Verifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Maximum number of candidates verified at the same time in a batch
    pub max_concurrency: usize,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self { max_concurrency: 4 }
    }
}

impl VerifierConfig {
    /// One candidate at a time
    pub fn sequential() -> Self {
        Self { max_concurrency: 1 }
    }

    /// Wide fan-out for remote backends that scale horizontally
    pub fn parallel() -> Self {
        Self {
            max_concurrency: 16,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_concurrency == 0 {
            return Err("max_concurrency must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
