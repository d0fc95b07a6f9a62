//! Term-weight vectors.
//!
//! One abstraction over the two layouts the weighting engine produces: dense
//! arrays aligned to vocabulary order and sparse maps keyed by token. Both
//! satisfy the same similarity interface and score identically.

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum TermVector {
    /// Weights aligned to vocabulary order; length == vocabulary size.
    Dense(Vec<f64>),
    /// Nonzero weights keyed by token; keys are a subset of the vocabulary.
    Sparse(HashMap<String, f64>),
}

impl TermVector {
    /// Inner product. With L2-normalized inputs this *is* the cosine
    /// similarity; otherwise it is an unnormalized inner product and may
    /// exceed [-1, 1].
    pub fn dot(&self, other: &TermVector) -> f64 {
        match (self, other) {
            (TermVector::Dense(a), TermVector::Dense(b)) => {
                a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
            }
            (TermVector::Sparse(a), TermVector::Sparse(b)) => {
                // Iterate the smaller map; only shared keys contribute.
                let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
                small
                    .iter()
                    .filter_map(|(token, v)| large.get(token).map(|w| v * w))
                    .sum()
            }
            // One vectorization pass always yields a single representation;
            // mixed pairs share no comparable coordinates.
            _ => 0.0,
        }
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        match self {
            TermVector::Dense(values) => values.iter().map(|v| v * v).sum::<f64>().sqrt(),
            TermVector::Sparse(entries) => entries.values().map(|v| v * v).sum::<f64>().sqrt(),
        }
    }

    /// Scale to unit length. A zero-norm vector is left all-zero.
    pub fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm == 0.0 {
            return;
        }
        match self {
            TermVector::Dense(values) => {
                for v in values.iter_mut() {
                    *v /= norm;
                }
            }
            TermVector::Sparse(entries) => {
                for v in entries.values_mut() {
                    *v /= norm;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sparse(entries: &[(&str, f64)]) -> TermVector {
        TermVector::Sparse(
            entries
                .iter()
                .map(|(token, weight)| (token.to_string(), *weight))
                .collect(),
        )
    }

    #[test]
    fn test_dense_dot_is_index_aligned() {
        let a = TermVector::Dense(vec![1.0, 2.0, 0.0]);
        let b = TermVector::Dense(vec![3.0, 0.5, 4.0]);
        assert_eq!(a.dot(&b), 4.0);
    }

    #[test]
    fn test_sparse_dot_uses_key_intersection() {
        let a = sparse(&[("cat", 1.0), ("sat", 2.0)]);
        let b = sparse(&[("sat", 0.5), ("dog", 4.0)]);
        assert_eq!(a.dot(&b), 1.0);
        // Symmetric regardless of which map is smaller.
        let c = sparse(&[("sat", 0.5), ("dog", 4.0), ("ran", 1.0), ("fox", 1.0)]);
        assert_eq!(a.dot(&c), c.dot(&a));
    }

    #[test]
    fn test_sparse_dot_disjoint_is_zero() {
        let a = sparse(&[("cat", 1.0)]);
        let b = sparse(&[("dog", 1.0)]);
        assert_eq!(a.dot(&b), 0.0);
    }

    #[test]
    fn test_mixed_representations_do_not_meet() {
        let a = TermVector::Dense(vec![1.0]);
        let b = sparse(&[("cat", 1.0)]);
        assert_eq!(a.dot(&b), 0.0);
    }

    #[test]
    fn test_norm() {
        assert_eq!(TermVector::Dense(vec![3.0, 4.0]).norm(), 5.0);
        assert_eq!(sparse(&[("a", 3.0), ("b", 4.0)]).norm(), 5.0);
    }

    #[test]
    fn test_l2_normalized_self_dot_is_one() {
        let mut dense = TermVector::Dense(vec![0.3, 1.7, 2.2]);
        dense.l2_normalize();
        assert!((dense.dot(&dense) - 1.0).abs() < 1e-9);

        let mut entries = sparse(&[("cat", 0.3), ("sat", 1.7), ("mat", 2.2)]);
        entries.l2_normalize();
        assert!((entries.dot(&entries) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_norm_vector_stays_zero() {
        let mut dense = TermVector::Dense(vec![0.0, 0.0]);
        dense.l2_normalize();
        assert_eq!(dense, TermVector::Dense(vec![0.0, 0.0]));

        let mut empty = sparse(&[]);
        empty.l2_normalize();
        assert_eq!(empty.norm(), 0.0);
    }
}
