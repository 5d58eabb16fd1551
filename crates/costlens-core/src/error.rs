//! Error types for CostLens

use thiserror::Error;

/// Result type alias using CostLens's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for CostLens operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// An event record carried a timestamp that could not be parsed
    #[error("Invalid timestamp {value:?} on record {index} (campaign {campaign_id})")]
    InvalidTimestamp {
        /// Position of the record in its batch
        index: usize,
        /// Campaign the record belongs to
        campaign_id: String,
        /// The rejected timestamp text
        value: String,
    },

    /// An event record had no timestamp at all
    #[error("Missing timestamp on record {index} (campaign {campaign_id})")]
    MissingTimestamp {
        /// Position of the record in its batch
        index: usize,
        /// Campaign the record belongs to
        campaign_id: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error was caused by bad caller input rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InvalidTimestamp { .. } | Self::MissingTimestamp { .. }
        )
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
