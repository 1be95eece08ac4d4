use crate::segmenter::SegmenterConfig;
use crate::tree::DEFAULT_MAX_BLOCK_SIZE;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Extension of link-notation project files
pub const DEFAULT_PROJECT_EXTENSION: &str = "spaceproj";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Thresholds for a compilation run
///
/// Every field has a default, so a TOML file only needs the values it
/// overrides:
///
/// ```toml
/// max_block_size = 4000
///
/// [segmenter]
/// min_length = 80
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    pub segmenter: SegmenterConfig,
    /// Character budget per block
    pub max_block_size: usize,
    /// Extension (without dot) identifying the project file in a sandbox
    pub project_extension: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            segmenter: SegmenterConfig::default(),
            max_block_size: DEFAULT_MAX_BLOCK_SIZE,
            project_extension: DEFAULT_PROJECT_EXTENSION.to_string(),
        }
    }
}

impl CompilerConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let SegmenterConfig {
            min_length,
            max_length,
        } = self.segmenter;

        if min_length == 0 {
            return Err(ConfigError::Invalid("min_length must be positive".into()));
        }
        if max_length < min_length {
            return Err(ConfigError::Invalid(format!(
                "max_length ({}) is smaller than min_length ({})",
                max_length, min_length
            )));
        }
        if self.max_block_size == 0 {
            return Err(ConfigError::Invalid("max_block_size must be positive".into()));
        }
        if self.project_extension.trim_start_matches('.').is_empty() {
            return Err(ConfigError::Invalid("project_extension is empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CompilerConfig::default();
        assert_eq!(config.segmenter.min_length, 50);
        assert_eq!(config.segmenter.max_length, 2000);
        assert_eq!(config.max_block_size, 8000);
        assert_eq!(config.project_extension, "spaceproj");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let toml = "max_block_size = 4000\n[segmenter]\nmin_length = 80\n";
        let config = CompilerConfig::from_toml_str(toml).unwrap();

        assert_eq!(config.max_block_size, 4000);
        assert_eq!(config.segmenter.min_length, 80);
        assert_eq!(config.segmenter.max_length, 2000);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(
            CompilerConfig::from_toml_str("").unwrap(),
            CompilerConfig::default()
        );
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let toml = "[segmenter]\nmin_length = 100\nmax_length = 10\n";
        let result = CompilerConfig::from_toml_str(toml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("smaller than"));
    }

    #[test]
    fn test_rejects_zero_block_size() {
        let result = CompilerConfig::from_toml_str("max_block_size = 0");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let result = CompilerConfig::from_toml_str("max_block_size = \"big\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
