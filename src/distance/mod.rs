//! Question-to-question dissimilarity.
//!
//! # Top-k best-match sum
//!
//! Every word of question A is paired with every word of question B and the
//! pairs are ranked by cosine similarity. The distance sums `1 - cos` over
//! the `k` best pairs (k = 9 by default):
//!
//! ```text
//! d(A, B) = Σ_{i < min(k, P)} (1 - cos_i)  +  min(0, P - k)
//! ```
//!
//! where `P = |A|·|B|` is the number of word pairs. The second term is a
//! fixed bonus for questions with fewer than `k` comparable pairs: it pulls
//! short questions together and makes distances negative. Two questions
//! with no pairs at all sit at `-k`.
//!
//! The metric ignores argument order, so `d(A, B) == d(B, A)` bit for bit.
//!
//! # Degenerate vectors
//!
//! A zero-norm embedding makes the cosine `0/0`. The NaN is not caught here;
//! it flows into the distance and is rejected later by
//! [`crate::cluster::HierarchicalClustering`].

mod matrix;

pub use matrix::DistanceMatrix;

use crate::question::QuestionRepresentation;

/// Default number of best word pairs summed.
pub const DEFAULT_TOP_K: usize = 9;

/// Cosine similarity `a·b / (|a|·|b|)`, accumulated in f64.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let (dot, na, nb) = a
        .iter()
        .zip(b.iter())
        .fold((0.0f64, 0.0f64, 0.0f64), |(dot, na, nb), (&x, &y)| {
            let (x, y) = (x as f64, y as f64);
            (dot + x * y, na + x * x, nb + y * y)
        });
    dot / (na.sqrt() * nb.sqrt())
}

/// A cross-question word pair and its cosine similarity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordPair<'a> {
    /// Word from the first question.
    pub left: &'a str,
    /// Word from the second question.
    pub right: &'a str,
    /// Cosine similarity of the two embeddings.
    pub similarity: f64,
}

/// The top-k best-match-sum metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairwiseDistance {
    top_k: usize,
}

impl Default for PairwiseDistance {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl PairwiseDistance {
    /// Create the metric with k = 9.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of best pairs summed (and the pair-count threshold).
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Number of best pairs summed.
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// All cross-question word pairs, most similar first.
    ///
    /// Ties keep enumeration order (A-major, then B). NaN similarities sort
    /// by `f64::total_cmp`, so the order is deterministic even then.
    pub fn word_pairs<'a>(
        &self,
        a: &'a QuestionRepresentation,
        b: &'a QuestionRepresentation,
    ) -> Vec<WordPair<'a>> {
        let mut pairs: Vec<WordPair<'a>> = a
            .iter()
            .flat_map(|wa| {
                b.iter().map(move |wb| WordPair {
                    left: &wa.surface,
                    right: &wb.surface,
                    similarity: cosine_similarity(&wa.vector, &wb.vector),
                })
            })
            .collect();
        pairs.sort_by(|x, y| y.similarity.total_cmp(&x.similarity));
        pairs
    }

    /// Dissimilarity between two questions. May be negative.
    pub fn distance(&self, a: &QuestionRepresentation, b: &QuestionRepresentation) -> f64 {
        let pairs = self.word_pairs(a, b);
        let matched: f64 = pairs
            .iter()
            .take(self.top_k)
            .map(|p| 1.0 - p.similarity)
            .sum();
        if pairs.len() < self.top_k {
            matched + pairs.len() as f64 - self.top_k as f64
        } else {
            matched
        }
    }
}
