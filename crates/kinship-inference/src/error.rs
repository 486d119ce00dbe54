//! Error types for inference runs

use kinship_domain::MemberId;
use thiserror::Error;

/// Errors that can occur while inferring family relations
///
/// Any of these aborts the run; the caller is expected to roll back the
/// enclosing transaction so no partial derivation is ever committed.
#[derive(Error, Debug)]
pub enum InferenceError {
    /// The underlying store failed
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// More than one spouse edge while `strict_single_spouse` is enabled
    #[error("Member {subject} has {count} spouse edges")]
    MultipleSpouses {
        /// Member being inferred
        subject: MemberId,
        /// Number of spouse edges found
        count: usize,
    },
}

impl InferenceError {
    /// Wrap a store error
    pub(crate) fn data_access<E: std::fmt::Display>(err: E) -> Self {
        Self::DataAccess(err.to_string())
    }
}
