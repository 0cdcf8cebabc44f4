use std::io;

/// Errors that can occur during scriptree operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Manifest error: {0}")]
    ManifestError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Session error: {0}")]
    SessionError(String),

    #[error("Project '{0}' has no package manifest")]
    NoManifest(String),

    #[error("No project found for root {0}")]
    ProjectNotFound(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for scriptree operations
pub type Result<T> = std::result::Result<T, Error>;
