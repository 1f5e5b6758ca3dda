//! Word embedding lookup table.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use crate::error::{Error, Result};

/// Fixed-dimension word vectors keyed by surface form.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingTable {
    vectors: HashMap<String, Vec<f32>>,
    dim: usize,
}

impl EmbeddingTable {
    /// Build from `(word, vector)` pairs. All vectors must share a dimension.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Vec<f32>)>,
    {
        let mut table = Self::default();
        for (word, vector) in entries {
            table.insert(word, vector)?;
        }
        Ok(table)
    }

    fn insert(&mut self, word: String, vector: Vec<f32>) -> Result<()> {
        if self.vectors.is_empty() {
            self.dim = vector.len();
        } else if vector.len() != self.dim {
            return Err(Error::DimensionMismatch {
                expected: self.dim,
                found: vector.len(),
            });
        }
        self.vectors.insert(word, vector);
        Ok(())
    }

    /// Read the word2vec text format: an optional `"<count> <dim>"` header,
    /// then one `word v1 v2 ... vD` line per word. Blank lines are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut table = Self::default();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let lineno = idx + 1;
            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else {
                continue;
            };
            let rest: Vec<&str> = fields.collect();

            let is_header = lineno == 1
                && rest.len() == 1
                && word.parse::<usize>().is_ok()
                && rest[0].parse::<usize>().is_ok();
            if is_header {
                continue;
            }

            let vector = rest
                .iter()
                .map(|v| v.parse::<f32>())
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| Error::Parse {
                    line: lineno,
                    message: format!("bad component for '{word}': {e}"),
                })?;
            if vector.is_empty() {
                return Err(Error::Parse {
                    line: lineno,
                    message: format!("no vector for '{word}'"),
                });
            }
            table.insert(word.to_owned(), vector).map_err(|e| match e {
                Error::DimensionMismatch { expected, found } => Error::Parse {
                    line: lineno,
                    message: format!("expected {expected} components, found {found}"),
                },
                other => other,
            })?;
        }
        log::debug!("loaded {} embeddings of dimension {}", table.len(), table.dim);
        Ok(table)
    }

    /// Load a word2vec text file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())
            .map_err(|e| Error::Io(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Vector for `word`, if it is in the vocabulary.
    pub fn get(&self, word: &str) -> Option<&[f32]> {
        self.vectors.get(word).map(Vec::as_slice)
    }

    /// Whether `word` is in the vocabulary.
    pub fn contains(&self, word: &str) -> bool {
        self.vectors.contains_key(word)
    }

    /// Vector dimension (0 for an empty table).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Vocabulary size.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// True if the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}
