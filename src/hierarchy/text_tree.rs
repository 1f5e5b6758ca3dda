//! Text rendering of a merge tree.
//!
//! One line per leaf, prefixed by connector glyphs. The first child of every
//! merge continues the current line with a branch glyph that encodes the
//! merge's depth (①..⑨, then `┬`); the second child starts a new line under
//! a `└` corner, with earlier branches turned into `│` bars:
//!
//! ```text
//! ①③0.猫が好き
//! │└1.犬が好き
//! └②2.晴れの日
//! 　└3.雨の日
//! ```
//!
//! Prefixes are kept as [`Glyph`] tokens and only turned into characters by
//! `Display`.

use core::fmt;

use super::MergeTree;
use crate::error::{Error, Result};

/// Number of depth-specific branch glyphs before falling back to `┬`.
pub const RANKED_GLYPHS: usize = 9;

const RANKED: [char; RANKED_GLYPHS] = ['①', '②', '③', '④', '⑤', '⑥', '⑦', '⑧', '⑨'];

/// One prefix cell of a rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    /// Branch of the merge with the given rank (1..=9).
    Ranked(u8),
    /// Branch of a merge ranked beyond 9.
    Branch,
    /// An open branch continuing downward.
    Vertical,
    /// The last child of a branch.
    Corner,
    /// A closed branch.
    Blank,
}

impl Glyph {
    /// Branch glyph for a merge of the given rank (root = 1).
    pub fn for_rank(rank: usize) -> Self {
        match rank {
            1..=RANKED_GLYPHS => Glyph::Ranked(rank as u8),
            _ => Glyph::Branch,
        }
    }

    /// The glyph continuing this cell on the second child's lines.
    fn continued(self) -> Self {
        match self {
            Glyph::Ranked(_) | Glyph::Branch => Glyph::Vertical,
            Glyph::Corner => Glyph::Blank,
            other => other,
        }
    }

    /// Rendered character.
    pub fn as_char(self) -> char {
        match self {
            Glyph::Ranked(r) => RANKED
                .get(usize::from(r).wrapping_sub(1))
                .copied()
                .unwrap_or('┬'),
            Glyph::Branch => '┬',
            Glyph::Vertical => '│',
            Glyph::Corner => '└',
            Glyph::Blank => '\u{3000}',
        }
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One rendered leaf line: `prefix + index + "." + label`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine<'a> {
    /// Connector glyphs, outermost first.
    pub prefix: Vec<Glyph>,
    /// Leaf (question) index.
    pub leaf: usize,
    /// Leaf label (question text).
    pub label: &'a str,
}

impl fmt::Display for TreeLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for glyph in &self.prefix {
            write!(f, "{glyph}")?;
        }
        write!(f, "{}.{}", self.leaf, self.label)
    }
}

/// Renders a [`MergeTree`] with a label per leaf.
#[derive(Debug, Clone, Copy)]
pub struct TextDendrogram<'a, S> {
    pub(crate) tree: &'a MergeTree,
    pub(crate) labels: &'a [S],
}

impl<'a, S: AsRef<str>> TextDendrogram<'a, S> {
    /// Pair a tree with one label per leaf.
    pub fn new(tree: &'a MergeTree, labels: &'a [S]) -> Result<Self> {
        if labels.len() != tree.n_leaves() {
            return Err(Error::DimensionMismatch {
                expected: tree.n_leaves(),
                found: labels.len(),
            });
        }
        Ok(Self { tree, labels })
    }

    /// Render the whole tree, one line per leaf.
    pub fn render(&self) -> Vec<TreeLine<'a>> {
        let mut lines = Vec::with_capacity(self.tree.n_leaves());
        self.render_node(self.tree.root(), Vec::new(), &mut lines);
        lines
    }

    /// Render the subtree under `node` starting from an empty prefix.
    pub fn render_subtree(&self, node: usize) -> Result<Vec<TreeLine<'a>>> {
        self.tree.check_node(node)?;
        let mut lines = Vec::new();
        self.render_node(node, Vec::new(), &mut lines);
        Ok(lines)
    }

    /// Render to text lines.
    pub fn lines(&self) -> Vec<String> {
        self.render().iter().map(ToString::to_string).collect()
    }

    fn render_node(&self, node: usize, prefix: Vec<Glyph>, out: &mut Vec<TreeLine<'a>>) {
        let Some([first, second]) = self.tree.children(node) else {
            let labels: &'a [S] = self.labels;
            out.push(TreeLine {
                prefix,
                leaf: node,
                label: labels[node].as_ref(),
            });
            return;
        };

        let rank = 2 * self.tree.n_leaves() - node - 1;
        let mut continued: Vec<Glyph> = prefix.iter().map(|g| g.continued()).collect();
        continued.push(Glyph::Corner);

        let mut branched = prefix;
        branched.push(Glyph::for_rank(rank));

        self.render_node(first, branched, out);
        self.render_node(second, continued, out);
    }
}
