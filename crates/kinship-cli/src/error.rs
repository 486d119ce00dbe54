//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage error
    #[error("Store error: {0}")]
    Store(#[from] kinship_store::StoreError),

    /// Inference error (the save was rolled back)
    #[error("Inference error: {0}")]
    Inference(#[from] kinship_inference::InferenceError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Member not found
    #[error("Member not found: {0}")]
    MemberNotFound(kinship_domain::MemberId),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
