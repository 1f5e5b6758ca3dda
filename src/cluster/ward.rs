//! Ward linkage on signed dissimilarities.
//!
//! Question distances go negative when a question has few word pairs, and
//! the most negative pair must merge first. kodama runs Ward on squared
//! dissimilarities, which would reverse that order, so Ward is evaluated
//! here with the Lance–Williams recurrence applied to the values as given:
//!
//! ```text
//! d(k, i∪j) = ((nᵢ + nₖ)·d(k,i) + (nⱼ + nₖ)·d(k,j) − nₖ·d(i,j)) / (nᵢ + nⱼ + nₖ)
//! ```
//!
//! The coefficients sum to one with a non-positive β, so the update is
//! reducible for any sign of input and a nearest-neighbour chain finds the
//! same merges as the greedy algorithm in O(n²).

use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};
use crate::hierarchy::Merge;

/// Merge steps of Ward linkage over `distances`, in ascending dissimilarity.
///
/// Children carry SciPy-style labels: leaves `0..n`, merge `i` is `n + i`.
pub(crate) fn ward_signed(distances: &DistanceMatrix) -> Result<Vec<Merge>> {
    let n = distances.len();
    if n < 2 {
        return Err(Error::DegenerateInput { n_items: n });
    }

    let mut d = distances.as_array().to_owned();
    // size[slot] == 0 marks a slot absorbed by an earlier merge.
    let mut size = vec![1usize; n];
    let mut chain: Vec<usize> = Vec::with_capacity(n);
    // (slot_x, slot_y, dissimilarity); the merged cluster lives on in slot_y.
    let mut steps: Vec<(usize, usize, f64)> = Vec::with_capacity(n - 1);

    for _ in 0..n - 1 {
        if chain.is_empty() {
            let first = size.iter().position(|&s| s > 0);
            chain.extend(first);
        }

        let (x, y) = loop {
            let x = chain[chain.len() - 1];
            let previous = chain.len().checked_sub(2).map(|i| chain[i]);

            // Prefer the previous chain element on ties so the chain cannot cycle.
            let mut nearest = previous;
            for i in (0..n).filter(|&i| i != x && size[i] > 0) {
                match nearest {
                    Some(b) if d[[x, i]] >= d[[x, b]] || d[[x, i]].is_nan() => {}
                    _ => nearest = Some(i),
                }
            }
            let y = nearest.ok_or(Error::DegenerateInput { n_items: 1 })?;

            if previous == Some(y) {
                chain.truncate(chain.len() - 2);
                break (x.min(y), x.max(y));
            }
            chain.push(y);
        };

        let dxy = d[[x, y]];
        let (nx, ny) = (size[x] as f64, size[y] as f64);
        for i in (0..n).filter(|&i| i != x && i != y && size[i] > 0) {
            let ni = size[i] as f64;
            let updated =
                ((ni + nx) * d[[x, i]] + (ni + ny) * d[[y, i]] - ni * dxy) / (nx + ny + ni);
            d[[i, y]] = updated;
            d[[y, i]] = updated;
        }
        size[y] += size[x];
        size[x] = 0;
        steps.push((x, y, dxy));
    }

    // The chain finds merges out of height order; restore it, keeping ties stable.
    steps.sort_by(|a, b| a.2.total_cmp(&b.2));
    Ok(relabel(n, &steps))
}

/// Rewrite slot-indexed steps into cluster ids with a union-find.
fn relabel(n: usize, steps: &[(usize, usize, f64)]) -> Vec<Merge> {
    fn find(parent: &mut [usize], i: usize) -> usize {
        if parent[i] != i {
            parent[i] = find(parent, parent[i]);
        }
        parent[i]
    }

    let mut parent: Vec<usize> = (0..2 * n - 1).collect();
    let mut size = vec![1usize; 2 * n - 1];

    steps
        .iter()
        .enumerate()
        .map(|(i, &(x, y, dissimilarity))| {
            let a = find(&mut parent, x);
            let b = find(&mut parent, y);
            let node = n + i;
            parent[a] = node;
            parent[b] = node;
            size[node] = size[a] + size[b];
            Merge {
                children: [a.min(b), a.max(b)],
                dissimilarity,
                size: size[node],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::MergeTree;
    use ndarray::{arr2, Array2};
    use proptest::prelude::*;

    fn children(merges: &[Merge]) -> Vec<[usize; 2]> {
        merges.iter().map(|m| m.children).collect()
    }

    #[test]
    fn test_most_negative_pairs_merge_first() {
        let m = DistanceMatrix::from_array(arr2(&[
            [0.0, -4.87, -1.2, -1.2],
            [-4.87, 0.0, -1.2, -1.2],
            [-1.2, -1.2, 0.0, -4.87],
            [-1.2, -1.2, -4.87, 0.0],
        ]))
        .unwrap();

        let merges = ward_signed(&m).unwrap();
        assert_eq!(children(&merges), vec![[0, 1], [2, 3], [4, 5]]);
        assert_eq!(merges[0].dissimilarity, -4.87);
        assert_eq!(merges[1].dissimilarity, -4.87);
        assert_eq!(merges[2].size, 4);
    }

    #[test]
    fn test_lance_williams_update() {
        let m = DistanceMatrix::from_array(arr2(&[
            [0.0, 1.0, 4.0],
            [1.0, 0.0, 6.0],
            [4.0, 6.0, 0.0],
        ]))
        .unwrap();

        let merges = ward_signed(&m).unwrap();
        assert_eq!(children(&merges), vec![[0, 1], [2, 3]]);
        // (2·4 + 2·6 − 1) / 3
        assert!((merges[1].dissimilarity - 19.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_late_chain_merge_is_relabelled() {
        // The chain starting at 0 closes (0,1) before the tighter (2,3).
        let m = DistanceMatrix::from_array(arr2(&[
            [0.0, 3.0, 9.0, 9.0],
            [3.0, 0.0, 9.0, 9.0],
            [9.0, 9.0, 0.0, 1.0],
            [9.0, 9.0, 1.0, 0.0],
        ]))
        .unwrap();

        let merges = ward_signed(&m).unwrap();
        assert_eq!(children(&merges), vec![[2, 3], [0, 1], [4, 5]]);
        assert_eq!(merges[1].dissimilarity, 3.0);
        assert!(MergeTree::new(4, merges).is_ok());
    }

    fn arb_matrix() -> impl Strategy<Value = DistanceMatrix> {
        (2usize..12).prop_flat_map(|n| {
            prop::collection::vec(-10.0f64..10.0, n * n).prop_map(move |raw| {
                let mut cells = Array2::zeros((n, n));
                for i in 0..n {
                    for j in (i + 1)..n {
                        cells[[i, j]] = raw[i * n + j];
                        cells[[j, i]] = raw[i * n + j];
                    }
                }
                DistanceMatrix::from_array(cells).unwrap()
            })
        })
    }

    proptest! {
        #[test]
        fn prop_valid_monotone_tree(m in arb_matrix()) {
            let n = m.len();
            let merges = ward_signed(&m).unwrap();

            prop_assert_eq!(merges[0].dissimilarity, m.min_off_diagonal().unwrap());
            for w in merges.windows(2) {
                prop_assert!(w[0].dissimilarity <= w[1].dissimilarity);
            }
            let tree = MergeTree::new(n, merges).unwrap();
            prop_assert_eq!(tree.leaves(tree.root()).unwrap().len(), n);
        }
    }
}
