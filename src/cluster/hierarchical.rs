//! Hierarchical (agglomerative) clustering over a precomputed distance matrix.
//!
//! ## Ward's Method: Variance Minimization
//!
//! Ward linkage minimizes the increase in total within-cluster variance
//! when merging clusters A and B:
//!
//! ```text
//! Δ(A,B) = (nₐ × nᵦ)/(nₐ + nᵦ) × ||μₐ - μᵦ||²
//! ```
//!
//! Question distances can be negative (few-word questions get a bonus).
//! Ward runs on the signed values directly (see `ward.rs`); the remaining
//! linkages go through kodama, which evaluates centroid and median linkage on
//! *squared* dissimilarities, so those two log a warning when they see any
//! negative value.

use core::fmt;
use core::str::FromStr;

use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};
use crate::hierarchy::{Merge, MergeTree};
use kodama::{linkage as kodama_linkage, Method as KodamaMethod};

use super::ward::ward_signed;

/// Linkage method for hierarchical clustering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Linkage {
    /// Single linkage: minimum distance between clusters.
    Single,
    /// Complete linkage: maximum distance between clusters.
    Complete,
    /// Average linkage: mean distance between clusters.
    Average,
    /// Weighted average linkage (WPGMA).
    Weighted,
    /// Ward's method: minimize within-cluster variance.
    #[default]
    Ward,
    /// Centroid linkage (UPGMC).
    Centroid,
    /// Median linkage (WPGMC).
    Median,
}

impl Linkage {
    /// All linkage methods.
    pub const ALL: [Linkage; 7] = [
        Linkage::Single,
        Linkage::Complete,
        Linkage::Average,
        Linkage::Weighted,
        Linkage::Ward,
        Linkage::Centroid,
        Linkage::Median,
    ];

    /// Lower-case name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Linkage::Single => "single",
            Linkage::Complete => "complete",
            Linkage::Average => "average",
            Linkage::Weighted => "weighted",
            Linkage::Ward => "ward",
            Linkage::Centroid => "centroid",
            Linkage::Median => "median",
        }
    }

    /// Whether this method runs on squared dissimilarities.
    ///
    /// Such methods do not keep the order of negative distances.
    pub fn works_on_squares(self) -> bool {
        matches!(self, Linkage::Centroid | Linkage::Median)
    }

    /// kodama method backing this linkage; `None` for signed Ward.
    fn method(self) -> Option<KodamaMethod> {
        match self {
            Linkage::Single => Some(KodamaMethod::Single),
            Linkage::Complete => Some(KodamaMethod::Complete),
            Linkage::Average => Some(KodamaMethod::Average),
            Linkage::Weighted => Some(KodamaMethod::Weighted),
            Linkage::Ward => None,
            Linkage::Centroid => Some(KodamaMethod::Centroid),
            Linkage::Median => Some(KodamaMethod::Median),
        }
    }
}

impl fmt::Display for Linkage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Linkage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Linkage::ALL
            .into_iter()
            .find(|l| l.name() == wanted)
            .ok_or_else(|| {
                Error::Other(format!(
                    "unknown linkage '{s}' (expected one of: {})",
                    Linkage::ALL.map(Linkage::name).join(", ")
                ))
            })
    }
}

/// Hierarchical (agglomerative) clustering.
#[derive(Debug, Clone, Default)]
pub struct HierarchicalClustering {
    /// Linkage method.
    linkage: Linkage,
}

impl HierarchicalClustering {
    /// Create a new hierarchical clusterer (Ward linkage).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set linkage method.
    pub fn with_linkage(mut self, linkage: Linkage) -> Self {
        self.linkage = linkage;
        self
    }

    /// Linkage method in use.
    pub fn linkage(&self) -> Linkage {
        self.linkage
    }

    /// Cluster the questions behind `distances` into a merge tree.
    ///
    /// Fails with [`Error::DegenerateInput`] below two questions and with
    /// [`Error::NonFiniteDistance`] if any off-diagonal cell is NaN or
    /// infinite.
    pub fn fit(&self, distances: &DistanceMatrix) -> Result<MergeTree> {
        let n = distances.len();
        if n < 2 {
            return Err(Error::DegenerateInput { n_items: n });
        }

        for row in 0..n {
            for col in (row + 1)..n {
                if !distances.get(row, col).is_finite() {
                    return Err(Error::NonFiniteDistance { row, col });
                }
            }
        }

        let merges = match self.linkage.method() {
            None => ward_signed(distances)?,
            Some(method) => {
                // Condensed dissimilarity matrix (upper triangle, row-major).
                let mut condensed = distances.condensed();
                if self.linkage.works_on_squares() && condensed.iter().any(|&d| d < 0.0) {
                    log::warn!(
                        "{} linkage squares dissimilarities; negative distances will not keep their order",
                        self.linkage
                    );
                }

                // kodama's dendrogram uses SciPy/MATLAB-style cluster labels:
                // - leaves: 0..n-1
                // - each merge i creates cluster id n+i
                let dend = kodama_linkage(&mut condensed, n, method);
                dend.steps()
                    .iter()
                    .map(|step| Merge {
                        children: [
                            step.cluster1.min(step.cluster2),
                            step.cluster1.max(step.cluster2),
                        ],
                        dissimilarity: step.dissimilarity,
                        size: step.size,
                    })
                    .collect()
            }
        };
        let tree = MergeTree::new(n, merges)?;
        log::debug!("{} linkage produced {} merges", self.linkage, tree.n_merges());
        Ok(tree)
    }
}
