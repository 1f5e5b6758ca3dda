//! Maximal-separation ordering of merge tree leaves.
//!
//! Clustering puts similar questions next to each other; a quiz wants the
//! opposite. [`Scatter`] walks the merge tree bottom-up and, at every merge,
//! interleaves the two child orderings so that leaves from the two sides
//! alternate as evenly as their sizes allow.
//!
//! # Per-merge step
//!
//! 1. Find the closest cross pair `(v1[p], v2[q])` in the distance matrix:
//!    the two questions most in need of being kept apart.
//! 2. Rotate `v1` so `v1[p]` comes first.
//! 3. Rotate `v2` so `v2[q]` comes first, then by `⌈|v2| / 2⌉` more, which
//!    puts it near the middle of `v2`.
//! 4. Merge with a rational fair-share schedule: with 1-based cursors
//!    `i1`, `i2` and bias `d = 1 / (2(|v1|+1)(|v2|+1))`, emit from `v2`
//!    while `i1/(|v1|+1) > i2/(|v2|+1) + d`, otherwise from `v1`.
//!
//! ```text
//! v1 = [a b c], v2 = [x]   ──▶   a b x c
//! v1 = [a b],   v2 = [x y] ──▶   a x b y
//! ```

use super::MergeTree;
use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};

/// Scatter scheduler over a merge tree and its distance matrix.
#[derive(Debug, Clone, Copy)]
pub struct Scatter<'a> {
    pub(crate) tree: &'a MergeTree,
    pub(crate) distances: &'a DistanceMatrix,
}

impl<'a> Scatter<'a> {
    /// Pair a tree with the distance matrix it was built from.
    pub fn new(tree: &'a MergeTree, distances: &'a DistanceMatrix) -> Result<Self> {
        if distances.len() != tree.n_leaves() {
            return Err(Error::DimensionMismatch {
                expected: tree.n_leaves(),
                found: distances.len(),
            });
        }
        Ok(Self { tree, distances })
    }

    /// Scattered ordering of all leaves.
    pub fn arrange(&self) -> Vec<usize> {
        self.arrange_node(self.tree.root())
    }

    /// Scattered ordering of the leaves under `node`.
    pub fn arrange_subtree(&self, node: usize) -> Result<Vec<usize>> {
        self.tree.check_node(node)?;
        Ok(self.arrange_node(node))
    }

    fn arrange_node(&self, node: usize) -> Vec<usize> {
        let Some([first, second]) = self.tree.children(node) else {
            return vec![node];
        };
        let mut v1 = self.arrange_node(first);
        let mut v2 = self.arrange_node(second);

        let (p, q) = self.closest_pair(&v1, &v2);
        v1.rotate_left(p);
        v2.rotate_left(q);
        let half = v2.len().div_ceil(2);
        v2.rotate_left(half);

        interleave(&v1, &v2)
    }

    /// Positions `(p, q)` of the smallest `distances[v1[p]][v2[q]]`.
    ///
    /// Row-major scan, first strict minimum wins; NaN cells never win.
    fn closest_pair(&self, v1: &[usize], v2: &[usize]) -> (usize, usize) {
        let mut best = (0, 0);
        let mut best_dist = f64::INFINITY;
        for (p, &a) in v1.iter().enumerate() {
            for (q, &b) in v2.iter().enumerate() {
                let d = self.distances.get(a, b);
                if d < best_dist {
                    best_dist = d;
                    best = (p, q);
                }
            }
        }
        best
    }
}

/// Fair-share merge of two sequences, ties favouring `v1`.
///
/// The shorter sequence ends up spread as evenly as possible through the
/// longer one. Output length is `v1.len() + v2.len()`.
pub fn interleave<T: Copy>(v1: &[T], v2: &[T]) -> Vec<T> {
    let n1 = (v1.len() + 1) as f64;
    let n2 = (v2.len() + 1) as f64;
    let bias = 1.0 / (2.0 * n1 * n2);

    let mut out = Vec::with_capacity(v1.len() + v2.len());
    let (mut i1, mut i2) = (1usize, 1usize);
    while i1 <= v1.len() || i2 <= v2.len() {
        if i1 as f64 / n1 > i2 as f64 / n2 + bias {
            out.push(v2[i2 - 1]);
            i2 += 1;
        } else {
            out.push(v1[i1 - 1]);
            i1 += 1;
        }
    }
    out
}
