//! Error types for similarity scoring.

use thiserror::Error;

use crate::provider::ProviderError;

/// Similarity-specific errors.
#[derive(Debug, Error)]
pub enum SimilarityError {
    /// Two vectors being compared have different lengths.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A vector with no components was supplied.
    #[error("empty vector")]
    EmptyVector,

    /// A vector component is NaN or infinite.
    #[error("non-finite component at index {index}")]
    NonFinite { index: usize },

    /// The provider returned a different number of vectors than inputs.
    #[error("provider returned {actual} embeddings for {expected} documents")]
    CountMismatch { expected: usize, actual: usize },

    /// The embedding provider failed.
    #[error("embedding provider error: {0}")]
    Provider(#[source] ProviderError),
}

/// Result type for similarity operations.
pub type SimilarityResult<T> = Result<T, SimilarityError>;
