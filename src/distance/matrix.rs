//! Symmetric question distance matrix.

use ndarray::Array2;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::PairwiseDistance;
use crate::error::{Error, Result};
use crate::question::QuestionRepresentation;

/// Square, symmetric, zero-diagonal matrix of question dissimilarities.
///
/// Indexed by question position in input order. Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    cells: Array2<f64>,
}

impl DistanceMatrix {
    /// Evaluate `metric` on every unordered pair of questions.
    ///
    /// Each off-diagonal cell is computed once, as
    /// `metric.distance(reps[max(i, j)], reps[min(i, j)])`, and mirrored.
    /// With the `parallel` feature the pairs are evaluated on the rayon pool.
    pub fn build(reps: &[QuestionRepresentation], metric: &PairwiseDistance) -> Result<Self> {
        let n = reps.len();
        let mut dims = reps.iter().filter_map(QuestionRepresentation::dim);
        if let Some(expected) = dims.next() {
            if let Some(found) = dims.find(|&d| d != expected) {
                return Err(Error::DimensionMismatch { expected, found });
            }
        }

        let pairs: Vec<(usize, usize)> = (0..n)
            .flat_map(|row| (row + 1..n).map(move |col| (row, col)))
            .collect();

        #[cfg(feature = "parallel")]
        let values: Vec<f64> = pairs
            .par_iter()
            .map(|&(i, j)| metric.distance(&reps[j], &reps[i]))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let values: Vec<f64> = pairs
            .iter()
            .map(|&(i, j)| metric.distance(&reps[j], &reps[i]))
            .collect();

        let mut cells = Array2::zeros((n, n));
        for (&(i, j), &d) in pairs.iter().zip(values.iter()) {
            cells[[i, j]] = d;
            cells[[j, i]] = d;
        }
        log::debug!("built {n}x{n} distance matrix ({} pairs)", pairs.len());
        Ok(Self { cells })
    }

    /// Wrap a precomputed matrix. It must be square; symmetry and the zero
    /// diagonal are the caller's responsibility (see [`Self::is_well_formed`]).
    pub fn from_array(cells: Array2<f64>) -> Result<Self> {
        let (rows, cols) = cells.dim();
        if rows != cols {
            return Err(Error::ShapeMismatch {
                expected: format!("{rows}x{rows}"),
                actual: format!("{rows}x{cols}"),
            });
        }
        Ok(Self { cells })
    }

    /// Number of questions.
    pub fn len(&self) -> usize {
        self.cells.nrows()
    }

    /// True if there are no questions.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Distance between questions `i` and `j`.
    ///
    /// # Panics
    ///
    /// If either index is out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.cells[[i, j]]
    }

    /// The underlying array.
    pub fn as_array(&self) -> &Array2<f64> {
        &self.cells
    }

    /// Upper triangle in row-major order, length `n(n-1)/2`.
    ///
    /// This is the condensed layout clustering routines consume.
    pub fn condensed(&self) -> Vec<f64> {
        let n = self.len();
        let mut out = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for row in 0..n.saturating_sub(1) {
            for col in (row + 1)..n {
                out.push(self.cells[[row, col]]);
            }
        }
        out
    }

    /// Symmetric with an exactly-zero diagonal. NaN cells count as
    /// symmetric when mirrored by NaN.
    pub fn is_well_formed(&self) -> bool {
        let n = self.len();
        (0..n).all(|i| {
            self.cells[[i, i]] == 0.0
                && (i + 1..n).all(|j| {
                    let (a, b) = (self.cells[[i, j]], self.cells[[j, i]]);
                    a == b || (a.is_nan() && b.is_nan())
                })
        })
    }

    /// Smallest off-diagonal distance, if any (NaN cells skipped).
    pub fn min_off_diagonal(&self) -> Option<f64> {
        self.condensed()
            .into_iter()
            .filter(|d| !d.is_nan())
            .min_by(f64::total_cmp)
    }
}
