//! Card error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a card configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Failed to read card config {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML for [`CardConfig`](crate::CardConfig)
    #[error("Malformed card config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be written back out
    #[error("Failed to serialize card config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value parsed but is outside its usable range
    #[error("Invalid card config: `{field}` {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
