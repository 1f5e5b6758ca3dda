//! Agglomerative clustering of questions.
//!
//! Bottom-up: start with each question as its own cluster and repeatedly
//! merge the two closest clusters until one remains. The merge history is a
//! [`MergeTree`](crate::hierarchy::MergeTree).
//!
//! **Linkage methods** determine "distance between clusters":
//!
//! | Linkage | Distance | Effect |
//! |---------|----------|--------|
//! | Single | min(pairwise) | Chaining; elongated clusters |
//! | Complete | max(pairwise) | Compact, spherical clusters |
//! | Average | mean(pairwise) | Balanced compromise |
//! | Weighted | mean of the two merged clusters | WPGMA |
//! | Ward | Variance increase | Minimizes within-cluster variance |
//! | Centroid | centroid distance | UPGMC |
//! | Median | midpoint distance | WPGMC |
//!
//! Ward is the default. It keeps the order of negative distances; centroid
//! and median linkage do not.

mod hierarchical;
mod ward;

pub use hierarchical::{HierarchicalClustering, Linkage};
