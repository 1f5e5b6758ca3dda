//! Question representations.
//!
//! A question is reduced to a bag of distinct content words, each carrying
//! its embedding and how many times it occurred:
//!
//! ```text
//! "猫が好きな猫"  ──tokenize──▶  猫 好き 猫  ──fold──▶  [猫 ×2, 好き ×1]
//! ```
//!
//! Order is first-occurrence order in the source text. Building the bag is
//! the job of [`crate::language::LanguageResources`]; this module only holds
//! the data and its invariants.

mod normalize;

pub use normalize::normalize;

use crate::error::{Error, Result};

/// One distinct content word of a question.
#[derive(Debug, Clone, PartialEq)]
pub struct WordEntry {
    /// Surface form, unique within a [`QuestionRepresentation`].
    pub surface: String,
    /// Coarse part-of-speech path, e.g. `"名詞.一般"`.
    pub word_type: String,
    /// Embedding vector.
    pub vector: Vec<f32>,
    /// Occurrences of `surface` in the question (at least 1).
    pub count: usize,
}

impl WordEntry {
    /// A word seen once.
    pub fn new(surface: impl Into<String>, word_type: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            surface: surface.into(),
            word_type: word_type.into(),
            vector,
            count: 1,
        }
    }

    /// Set the occurrence count.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }
}

/// Ordered bag of distinct content words for one question.
///
/// Immutable once built. An empty representation is legal: a question with
/// no words in the embedding vocabulary still takes part in distance
/// computation (see [`crate::distance::PairwiseDistance`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionRepresentation {
    words: Vec<WordEntry>,
}

impl QuestionRepresentation {
    /// Build from already-distinct entries, checking the invariants.
    ///
    /// Fails if a surface repeats, a count is zero, or vector dimensions differ.
    pub fn new(words: Vec<WordEntry>) -> Result<Self> {
        let dim = words.first().map(|w| w.vector.len());
        for (i, word) in words.iter().enumerate() {
            if word.count == 0 {
                return Err(Error::InvalidParameter {
                    name: "count",
                    message: "word counts must be positive",
                });
            }
            if words[..i].iter().any(|w| w.surface == word.surface) {
                return Err(Error::Other(format!(
                    "duplicate surface '{}' in question representation",
                    word.surface
                )));
            }
            if let Some(expected) = dim {
                if word.vector.len() != expected {
                    return Err(Error::DimensionMismatch {
                        expected,
                        found: word.vector.len(),
                    });
                }
            }
        }
        Ok(Self { words })
    }

    /// Fold a stream of word occurrences into distinct entries.
    ///
    /// A repeated surface adds its count to the earliest entry with that
    /// surface; its own word type and vector are discarded.
    pub fn from_occurrences<I>(occurrences: I) -> Result<Self>
    where
        I: IntoIterator<Item = WordEntry>,
    {
        let mut words: Vec<WordEntry> = Vec::new();
        for occurrence in occurrences {
            match words.iter_mut().find(|w| w.surface == occurrence.surface) {
                Some(existing) => existing.count += occurrence.count,
                None => words.push(occurrence),
            }
        }
        Self::new(words)
    }

    /// The empty representation.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Distinct words in first-occurrence order.
    pub fn words(&self) -> &[WordEntry] {
        &self.words
    }

    /// Iterate over the distinct words.
    pub fn iter(&self) -> impl Iterator<Item = &WordEntry> {
        self.words.iter()
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True if no word qualified.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Total occurrences across all words.
    pub fn total_count(&self) -> usize {
        self.words.iter().map(|w| w.count).sum()
    }

    /// Embedding dimension, if any word is present.
    pub fn dim(&self) -> Option<usize> {
        self.words.first().map(|w| w.vector.len())
    }

    /// Look up a word by surface.
    pub fn get(&self, surface: &str) -> Option<&WordEntry> {
        self.words.iter().find(|w| w.surface == surface)
    }
}
