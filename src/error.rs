//! Error types for reading metadata documents

use thiserror::Error;

/// Errors that can occur while reading a metadata document
#[derive(Debug, Error)]
pub enum ParseError {
    /// IO error reading file
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// JSON deserialization error
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML deserialization error
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
