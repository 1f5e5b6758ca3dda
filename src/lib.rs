//! # quizscatter
//!
//! Cluster quiz questions by meaning, then order them so that similar
//! questions are *not* asked back to back.
//!
//! Each question becomes a bag of embedded content words
//! ([`QuestionRepresentation`]). A top-k best-match metric
//! ([`PairwiseDistance`]) fills a [`DistanceMatrix`], agglomerative clustering
//! turns it into a [`MergeTree`], and two views are read off the tree:
//!
//! - [`TextDendrogram`]: an indented text tree of the clusters.
//! - [`Scatter`]: a linear order interleaving sibling clusters.
//!
//! ```rust
//! use quizscatter::{DistanceMatrix, MergeTree, Scatter, TextDendrogram};
//!
//! let distances = DistanceMatrix::from_array(ndarray::arr2(&[
//!     [0.0, 0.1, 9.0, 9.0],
//!     [0.1, 0.0, 9.0, 9.0],
//!     [9.0, 9.0, 0.0, 0.1],
//!     [9.0, 9.0, 0.1, 0.0],
//! ])).unwrap();
//! let tree = MergeTree::from_pairs(4, &[(0, 1), (2, 3), (4, 5)]).unwrap();
//!
//! let order = Scatter::new(&tree, &distances).unwrap().arrange();
//! assert_eq!(order, vec![0, 3, 1, 2]);
//!
//! let labels = ["cat", "dog", "sun", "rain"];
//! let lines = TextDendrogram::new(&tree, &labels).unwrap().lines();
//! assert_eq!(lines.len(), 4);
//! ```

pub mod cluster;
pub mod distance;
/// Error types used across `quizscatter`.
pub mod error;
pub mod hierarchy;
pub mod language;
pub mod pipeline;
pub mod question;

#[cfg(test)]
mod scenario_tests;

pub use cluster::{HierarchicalClustering, Linkage};
pub use distance::{cosine_similarity, DistanceMatrix, PairwiseDistance, WordPair};
pub use error::{Error, Result};
pub use hierarchy::{Glyph, Merge, MergeTree, Scatter, TextDendrogram, TreeLine};
pub use language::{EmbeddingTable, LanguageResources, MecabTokenizer, Morpheme, Tokenizer, WordFilter};
pub use pipeline::{load_questions, read_questions, ScatterConfig, ScatterReport, Scatterer};
pub use question::{normalize, QuestionRepresentation, WordEntry};
