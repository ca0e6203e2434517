//! Error types for olist-features

use olist_io::IoError;
use thiserror::Error;

/// Main error type for feature computation
#[derive(Error, Debug)]
pub enum FeatureError {
    /// A source table the feature needs is not loaded
    #[error("Table '{0}' not found in dataset")]
    MissingTable(String),

    /// Table access or file errors
    #[error("Data error: {0}")]
    Io(#[from] IoError),

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be parsed
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(String),
}

impl From<std::io::Error> for FeatureError {
    fn from(err: std::io::Error) -> Self {
        FeatureError::Io(IoError::Io(err))
    }
}

/// Result type for feature computation
pub type FeatureResult<T> = Result<T, FeatureError>;
