//! The text-embedding provider contract.
//!
//! Implementations may call a local model or a remote API. A provider must
//! return vectors of [`EmbeddingProvider::dimensions`] components, one per
//! input string.

use tracing::debug;

use crate::cosine::{best_match, Match};
use crate::error::{SimilarityError, SimilarityResult};

/// Error type returned by provider implementations.
pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;

pub trait EmbeddingProvider: Send + Sync {
    /// Length of every vector this provider returns.
    fn dimensions(&self) -> usize;

    /// Embeds a batch of documents, one vector per input, in input order.
    fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError>;

    /// Embeds a search query. Defaults to embedding it as a one-document batch.
    fn embed_query(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        self.embed_documents(&[text.to_owned()])?
            .pop()
            .ok_or_else(|| "provider returned no embedding for query".into())
    }
}

/// Embeds `documents` and `query` with `provider` and returns the document
/// most similar to the query, or `None` if `documents` is empty.
///
/// # Errors
///
/// Fails if the provider fails, returns the wrong number of vectors, or
/// returns vectors of inconsistent length.
pub fn most_similar(
    provider: &dyn EmbeddingProvider,
    documents: &[String],
    query: &str,
) -> SimilarityResult<Option<Match>> {
    if documents.is_empty() {
        return Ok(None);
    }
    let doc_vectors = provider
        .embed_documents(documents)
        .map_err(SimilarityError::Provider)?;
    if doc_vectors.len() != documents.len() {
        return Err(SimilarityError::CountMismatch {
            expected: documents.len(),
            actual: doc_vectors.len(),
        });
    }
    let query_vector = provider
        .embed_query(query)
        .map_err(SimilarityError::Provider)?;

    let expected = provider.dimensions();
    if let Some(v) = std::iter::once(&query_vector)
        .chain(&doc_vectors)
        .find(|v| v.len() != expected)
    {
        return Err(SimilarityError::DimensionMismatch {
            expected,
            actual: v.len(),
        });
    }

    let best = best_match(&query_vector, &doc_vectors)?;
    if let Some(m) = best {
        debug!(index = m.index, score = m.score, "best match for query");
    }
    Ok(best)
}
