//! Configuration for olist-features
//!
//! Where the source CSVs live, which feature options the training table is
//! built with, and where it is exported.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FeatureError, FeatureResult};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OlistConfig {
    /// Source data settings
    pub data: DataConfig,
    /// Feature assembly options
    pub features: FeatureConfig,
    /// Export settings
    pub output: OutputConfig,
}

/// Source data configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding the Olist CSV files
    pub dir: PathBuf,
    /// Field delimiter
    pub delimiter: char,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data/csv"),
            delimiter: ',',
        }
    }
}

impl DataConfig {
    /// Delimiter as the byte the CSV reader expects
    pub fn delimiter_byte(&self) -> FeatureResult<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                FeatureError::InvalidConfig(format!(
                    "delimiter must be a single ASCII character, got {:?}",
                    self.delimiter
                ))
            })
    }
}

/// Training table options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Keep only orders with status "delivered"
    pub only_delivered: bool,
    /// Add the mean seller-customer distance column
    pub with_distance_seller_customer: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            only_delivered: true,
            with_distance_seller_customer: false,
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// CSV file the training table is written to
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("training_data.csv"),
        }
    }
}

impl OlistConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load and validate a configuration file
    ///
    /// `.json` files are read as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> FeatureResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => {
                Self::from_json(&content).map_err(|e| FeatureError::ConfigParse(e.to_string()))?
            }
            _ => Self::from_toml(&content).map_err(|e| FeatureError::ConfigParse(e.to_string()))?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> FeatureResult<()> {
        self.data.delimiter_byte()?;

        if self.data.dir.as_os_str().is_empty() {
            return Err(FeatureError::InvalidConfig(
                "data.dir must not be empty".to_string(),
            ));
        }

        if self.output.path.as_os_str().is_empty() {
            return Err(FeatureError::InvalidConfig(
                "output.path must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
