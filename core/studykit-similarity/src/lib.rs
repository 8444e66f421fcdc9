//! Cosine similarity scoring over embedding vectors.
//!
//! This crate handles:
//! - Pairwise cosine similarity between two vectors
//! - Scoring a query vector against a batch of document vectors
//! - Picking the best match (index and score) or a full descending ranking
//! - The [`EmbeddingProvider`] contract for turning text into vectors
//!
//! There is no index here: every call scores the full batch it is given.

mod cosine;
mod error;
mod provider;

pub use cosine::{Match, best_match, cosine_similarity, rank, score_all};
pub use error::{SimilarityError, SimilarityResult};
pub use provider::{EmbeddingProvider, ProviderError, most_similar};
