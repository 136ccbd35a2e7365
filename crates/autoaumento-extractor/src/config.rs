//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum input text length (characters)
    pub max_text_length: usize,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// Default configuration, sized for a few pages of generated text
    fn default() -> Self {
        Self {
            max_text_length: 100_000,
        }
    }
}

impl ExtractorConfig {
    /// Strict preset: short generations only
    pub fn strict() -> Self {
        Self {
            max_text_length: 10_000,
        }
    }

    /// Lenient preset: long documents
    pub fn lenient() -> Self {
        Self {
            max_text_length: 1_000_000,
        }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(ExtractorConfig::default().validate().is_ok());
        assert!(ExtractorConfig::strict().validate().is_ok());
        assert!(ExtractorConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_invalid_max_text_length() {
        let config = ExtractorConfig { max_text_length: 0 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::strict();
        let toml_str = config.to_toml().unwrap();
        assert_eq!(ExtractorConfig::from_toml(&toml_str).unwrap(), config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = ExtractorConfig::from_toml("").unwrap();
        assert_eq!(config, ExtractorConfig::default());
    }
}
