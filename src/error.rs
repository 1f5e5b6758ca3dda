use core::fmt;

/// Result alias for `quizscatter`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the question, distance and hierarchy primitives.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Fewer items than clustering needs (at least two).
    DegenerateInput {
        /// Number of items supplied.
        n_items: usize,
    },

    /// Vector or matrix dimension mismatch.
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// Shape mismatch (string description).
    ShapeMismatch {
        /// Expected shape description.
        expected: String,
        /// Actual shape description.
        actual: String,
    },

    /// A merge tree violates the full-binary-tree invariants.
    InvalidMergeTree {
        /// Offending node id.
        node: usize,
        /// What is wrong with it.
        message: String,
    },

    /// A dissimilarity handed to clustering is NaN or infinite.
    NonFiniteDistance {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        col: usize,
    },

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// Malformed line in an input file.
    Parse {
        /// 1-based line number.
        line: usize,
        /// Error message.
        message: String,
    },

    /// The external tokenizer failed.
    Tokenizer(String),

    /// I/O failure (stringified so the error stays `Clone`).
    Io(String),

    /// Generic error with message.
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DegenerateInput { n_items } => {
                write!(f, "need at least 2 questions to cluster, got {n_items}")
            }
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::ShapeMismatch { expected, actual } => {
                write!(f, "shape mismatch: expected {expected}, actual {actual}")
            }
            Error::InvalidMergeTree { node, message } => {
                write!(f, "invalid merge tree at node {node}: {message}")
            }
            Error::NonFiniteDistance { row, col } => {
                write!(f, "non-finite distance between questions {row} and {col}")
            }
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
            Error::Parse { line, message } => write!(f, "line {line}: {message}"),
            Error::Tokenizer(msg) => write!(f, "tokenizer failed: {msg}"),
            Error::Io(msg) => write!(f, "i/o error: {msg}"),
            Error::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}
