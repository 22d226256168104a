use std::io;

/// Errors that can occur during interceptor generation
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Signature table error: {0}")]
    SignatureTableError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type alias for interceptor-gen operations
pub type Result<T> = std::result::Result<T, Error>;
