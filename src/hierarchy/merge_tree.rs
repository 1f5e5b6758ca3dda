//! Binary merge tree produced by agglomerative clustering.
//!
//! Node ids follow the SciPy/MATLAB convention:
//! - leaves: `0..n`
//! - merge `r` creates internal node `n + r`
//! - the root is `2n - 2`

use crate::error::{Error, Result};

/// One merge: two child ids joined into a new internal node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Merge {
    /// The two children, in the order the clustering reported them.
    pub children: [usize; 2],
    /// Dissimilarity at which the merge happened.
    pub dissimilarity: f64,
    /// Number of leaves under the new node.
    pub size: usize,
}

/// A full binary tree over `n` leaves, stored as `n - 1` merge records.
///
/// Invariants, checked on construction:
/// - exactly `n - 1` merges for `n >= 2` leaves
/// - every child id is strictly smaller than its parent's id
/// - every non-root node is the child of exactly one merge
#[derive(Debug, Clone, PartialEq)]
pub struct MergeTree {
    merges: Vec<Merge>,
    n_leaves: usize,
}

impl MergeTree {
    /// Validate and wrap a merge sequence.
    pub fn new(n_leaves: usize, merges: Vec<Merge>) -> Result<Self> {
        if n_leaves < 2 {
            return Err(Error::DegenerateInput { n_items: n_leaves });
        }
        if merges.len() != n_leaves - 1 {
            return Err(Error::ShapeMismatch {
                expected: format!("{} merges", n_leaves - 1),
                actual: format!("{} merges", merges.len()),
            });
        }

        let mut has_parent = vec![false; 2 * n_leaves - 2];
        for (r, merge) in merges.iter().enumerate() {
            let node = n_leaves + r;
            let [a, b] = merge.children;
            if a == b {
                return Err(Error::InvalidMergeTree {
                    node,
                    message: format!("both children are {a}"),
                });
            }
            for child in [a, b] {
                if child >= node {
                    return Err(Error::InvalidMergeTree {
                        node,
                        message: format!("child {child} is not below its parent"),
                    });
                }
                if std::mem::replace(&mut has_parent[child], true) {
                    return Err(Error::InvalidMergeTree {
                        node,
                        message: format!("child {child} already has a parent"),
                    });
                }
            }
        }

        Ok(Self { merges, n_leaves })
    }

    /// Build from child pairs only. Sizes are derived; dissimilarities are
    /// the merge rank.
    pub fn from_pairs(n_leaves: usize, pairs: &[(usize, usize)]) -> Result<Self> {
        let mut sizes = vec![1usize; n_leaves + pairs.len()];
        let mut merges = Vec::with_capacity(pairs.len());
        for (r, &(a, b)) in pairs.iter().enumerate() {
            let size = sizes.get(a).copied().unwrap_or(0) + sizes.get(b).copied().unwrap_or(0);
            sizes[n_leaves + r] = size;
            merges.push(Merge {
                children: [a, b],
                dissimilarity: r as f64,
                size,
            });
        }
        Self::new(n_leaves, merges)
    }

    /// Number of leaves.
    pub fn n_leaves(&self) -> usize {
        self.n_leaves
    }

    /// Number of merges (`n_leaves - 1`).
    pub fn n_merges(&self) -> usize {
        self.merges.len()
    }

    /// Total number of nodes (`2n - 1`).
    pub fn n_nodes(&self) -> usize {
        self.n_leaves + self.merges.len()
    }

    /// Root node id (`2n - 2`).
    pub fn root(&self) -> usize {
        self.n_nodes() - 1
    }

    /// Whether `node` is a leaf.
    #[inline]
    pub fn is_leaf(&self, node: usize) -> bool {
        node < self.n_leaves
    }

    /// Whether `node` exists in this tree.
    #[inline]
    pub fn contains(&self, node: usize) -> bool {
        node < self.n_nodes()
    }

    /// Merge record of an internal node.
    pub fn merge(&self, node: usize) -> Option<&Merge> {
        node.checked_sub(self.n_leaves)
            .and_then(|r| self.merges.get(r))
    }

    /// Children of an internal node; `None` for leaves and unknown ids.
    #[inline]
    pub fn children(&self, node: usize) -> Option<[usize; 2]> {
        self.merge(node).map(|m| m.children)
    }

    /// Iterate over merges in merge order.
    pub fn merges(&self) -> impl Iterator<Item = &Merge> {
        self.merges.iter()
    }

    /// Merge dissimilarities in merge order.
    pub fn distances(&self) -> Vec<f64> {
        self.merges.iter().map(|m| m.dissimilarity).collect()
    }

    /// Leaves under `node`, left to right.
    pub fn leaves(&self, node: usize) -> Result<Vec<usize>> {
        self.check_node(node)?;
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            match self.children(id) {
                Some([a, b]) => {
                    stack.push(b);
                    stack.push(a);
                }
                None => out.push(id),
            }
        }
        Ok(out)
    }

    pub(crate) fn check_node(&self, node: usize) -> Result<()> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(Error::InvalidMergeTree {
                node,
                message: format!("no such node (tree has {} nodes)", self.n_nodes()),
            })
        }
    }
}
