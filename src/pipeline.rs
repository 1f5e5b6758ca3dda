//! End-to-end run: questions in, dendrogram and scattered order out.
//!
//! ```text
//! questions ─normalize─▶ LanguageResources ─▶ representations
//!     ─PairwiseDistance─▶ DistanceMatrix ─HierarchicalClustering─▶ MergeTree
//!     ─┬─▶ TextDendrogram   (labelled with the original question text)
//!      └─▶ Scatter
//! ```

use std::io::BufRead;
use std::path::Path;

use crate::cluster::{HierarchicalClustering, Linkage};
use crate::distance::{DistanceMatrix, PairwiseDistance};
use crate::error::{Error, Result};
use crate::hierarchy::{MergeTree, Scatter, TextDendrogram};
use crate::language::{LanguageResources, Tokenizer};
use crate::question::{normalize, QuestionRepresentation};

/// Knobs for a run.
#[derive(Debug, Clone, Default)]
pub struct ScatterConfig {
    /// Question distance metric.
    pub distance: PairwiseDistance,
    /// Clustering linkage.
    pub linkage: Linkage,
}

impl ScatterConfig {
    /// Default configuration: top-9 metric, Ward linkage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of best word pairs the metric sums.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.distance = self.distance.with_top_k(top_k);
        self
    }

    /// Set the linkage method.
    pub fn with_linkage(mut self, linkage: Linkage) -> Self {
        self.linkage = linkage;
        self
    }
}

/// Read newline-delimited questions, dropping empty lines.
pub fn read_questions<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut questions = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.is_empty() {
            questions.push(line);
        }
    }
    Ok(questions)
}

/// Read questions from a file; see [`read_questions`].
pub fn load_questions(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .map_err(|e| Error::Io(format!("{}: {e}", path.display())))?;
    read_questions(std::io::BufReader::new(file))
}

/// Runs the pipeline against a set of language resources.
#[derive(Debug)]
pub struct Scatterer<'r, T> {
    resources: &'r LanguageResources<T>,
    config: ScatterConfig,
}

impl<'r, T: Tokenizer> Scatterer<'r, T> {
    /// Use `resources` with the default configuration.
    pub fn new(resources: &'r LanguageResources<T>) -> Self {
        Self {
            resources,
            config: ScatterConfig::default(),
        }
    }

    /// Override the configuration.
    pub fn with_config(mut self, config: ScatterConfig) -> Self {
        self.config = config;
        self
    }

    /// Normalize, tokenize and embed each question.
    pub fn represent(&self, questions: &[String]) -> Result<Vec<QuestionRepresentation>> {
        let normalized: Vec<String> = questions.iter().map(|q| normalize(q)).collect();
        let texts: Vec<&str> = normalized.iter().map(String::as_str).collect();
        let reps = self.resources.represent_all(&texts)?;
        for (idx, rep) in reps.iter().enumerate() {
            if rep.is_empty() {
                log::warn!("question {idx} has no words in the embedding vocabulary");
            } else {
                log::debug!(
                    "question {idx}: {} distinct words, {} occurrences",
                    rep.len(),
                    rep.total_count()
                );
            }
        }
        Ok(reps)
    }

    /// Run every stage.
    ///
    /// Fails with [`Error::DegenerateInput`] for fewer than two questions,
    /// before touching the tokenizer.
    pub fn run(&self, questions: Vec<String>) -> Result<ScatterReport> {
        if questions.len() < 2 {
            return Err(Error::DegenerateInput {
                n_items: questions.len(),
            });
        }
        log::info!("representing {} questions", questions.len());
        let reps = self.represent(&questions)?;

        log::info!("computing distance matrix");
        let distances = DistanceMatrix::build(&reps, &self.config.distance)?;
        if let Some(closest) = distances.min_off_diagonal() {
            log::debug!("closest pair distance {closest:.4}");
        }

        log::info!("clustering with {} linkage", self.config.linkage);
        let tree = HierarchicalClustering::new()
            .with_linkage(self.config.linkage)
            .fit(&distances)?;

        ScatterReport::new(questions, distances, tree)
    }
}

/// The outcome of a run: questions, their distances and merge tree.
#[derive(Debug, Clone)]
pub struct ScatterReport {
    questions: Vec<String>,
    distances: DistanceMatrix,
    tree: MergeTree,
}

impl ScatterReport {
    /// Assemble a report from precomputed parts; sizes must agree.
    pub fn new(questions: Vec<String>, distances: DistanceMatrix, tree: MergeTree) -> Result<Self> {
        for found in [distances.len(), tree.n_leaves()] {
            if found != questions.len() {
                return Err(Error::DimensionMismatch {
                    expected: questions.len(),
                    found,
                });
            }
        }
        Ok(Self {
            questions,
            distances,
            tree,
        })
    }

    /// The original question texts.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// Question distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Merge tree.
    pub fn tree(&self) -> &MergeTree {
        &self.tree
    }

    /// Dendrogram lines rooted at the top merge.
    pub fn dendrogram_lines(&self) -> Vec<String> {
        TextDendrogram {
            tree: &self.tree,
            labels: &self.questions,
        }
        .lines()
    }

    /// Scattered question order.
    pub fn scatter_order(&self) -> Vec<usize> {
        Scatter {
            tree: &self.tree,
            distances: &self.distances,
        }
        .arrange()
    }

    /// Scattered order formatted as `index.question` lines.
    pub fn scatter_lines(&self) -> Vec<String> {
        self.scatter_order()
            .into_iter()
            .map(|i| format!("{i}.{}", self.questions[i]))
            .collect()
    }
}
