//! Merge trees and what is derived from them.
//!
//! # Node numbering
//!
//! Agglomerative clustering over `n` questions performs `n - 1` merges. Leaves
//! keep their question index; merge `r` creates node `n + r`:
//!
//! ```text
//!         6
//!        / \
//!       4   5
//!      / \ / \
//!     0  1 2  3
//! ```
//!
//! Children always have smaller ids than their parent, so every walk from
//! the root terminates after visiting each leaf exactly once.
//!
//! # Views
//!
//! - [`TextDendrogram`]: indented text tree, one line per question.
//! - [`Scatter`]: a linear order that keeps similar questions apart.

mod merge_tree;
mod scatter;
mod text_tree;

pub use merge_tree::{Merge, MergeTree};
pub use scatter::{interleave, Scatter};
pub use text_tree::{Glyph, TextDendrogram, TreeLine, RANKED_GLYPHS};

#[cfg(test)]
pub(crate) mod strategies {
    use super::MergeTree;
    use proptest::prelude::*;

    /// Random valid merge tree: repeatedly join two live clusters.
    pub(crate) fn arb_tree() -> impl Strategy<Value = MergeTree> {
        (2usize..24)
            .prop_flat_map(|n| (Just(n), proptest::collection::vec(any::<u32>(), 2 * (n - 1))))
            .prop_map(|(n, picks)| {
                let mut live: Vec<usize> = (0..n).collect();
                let mut pairs = Vec::with_capacity(n - 1);
                for r in 0..n - 1 {
                    let a = live.swap_remove(picks[2 * r] as usize % live.len());
                    let b = live.swap_remove(picks[2 * r + 1] as usize % live.len());
                    pairs.push((a, b));
                    live.push(n + r);
                }
                MergeTree::from_pairs(n, &pairs).expect("live clusters form a valid tree")
            })
    }
}
