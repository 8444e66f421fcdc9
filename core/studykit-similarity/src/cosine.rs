//! Cosine similarity and best-match selection.

use crate::error::{SimilarityError, SimilarityResult};

/// A scored document: its position in the input batch and its similarity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match {
    pub index: usize,
    pub score: f32,
}

/// Cosine of the angle between `a` and `b`, in `[-1, 1]`.
///
/// A zero-norm vector has no direction and scores `0.0` against anything.
///
/// # Errors
///
/// Returns an error if either vector is empty, their lengths differ, or a
/// component is NaN or infinite.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> SimilarityResult<f32> {
    if a.is_empty() || b.is_empty() {
        return Err(SimilarityError::EmptyVector);
    }
    if a.len() != b.len() {
        return Err(SimilarityError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    if let Some(index) = a.iter().chain(b).position(|x| !x.is_finite()) {
        return Err(SimilarityError::NonFinite {
            index: index % a.len(),
        });
    }

    // Accumulate in f64 so long vectors don't lose precision.
    let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }
    let score = dot / (norm_a.sqrt() * norm_b.sqrt());
    Ok(score.clamp(-1.0, 1.0) as f32)
}

/// Scores `query` against every document, preserving document order.
pub fn score_all(query: &[f32], documents: &[Vec<f32>]) -> SimilarityResult<Vec<f32>> {
    documents
        .iter()
        .map(|doc| cosine_similarity(query, doc))
        .collect()
}

/// The highest-scoring document, or `None` if there are no documents.
///
/// Among equal scores the later document wins.
pub fn best_match(query: &[f32], documents: &[Vec<f32>]) -> SimilarityResult<Option<Match>> {
    let scores = score_all(query, documents)?;
    let best = scores
        .into_iter()
        .enumerate()
        .map(|(index, score)| Match { index, score })
        .max_by(|a, b| a.score.total_cmp(&b.score));
    Ok(best)
}

/// Every document, highest score first. Ties keep the later document first,
/// consistent with [`best_match`].
pub fn rank(query: &[f32], documents: &[Vec<f32>]) -> SimilarityResult<Vec<Match>> {
    let mut matches: Vec<Match> = score_all(query, documents)?
        .into_iter()
        .enumerate()
        .map(|(index, score)| Match { index, score })
        .collect();
    matches.sort_by(|a, b| b.score.total_cmp(&a.score).then(b.index.cmp(&a.index)));
    Ok(matches)
}
