//! TF-IDF weighting over a combined corpus+query token list.
//!
//! The query's tokens occupy the final combined-list slot: they count toward
//! document frequency and the total text count N. That convention is part of
//! the scoring contract (test fixtures encode it) and must not be "corrected"
//! to corpus-only IDF.
//!
//! One `improved_idf` flag switches both formulas together: raw TF
//! (`count/total`) with standard IDF (`ln(N/df)`), or log-dampened TF
//! (`ln(1+count)`) with smoothed IDF (`ln((N+1)/(df+1)) + 1`).

use crate::vector::TermVector;
use std::collections::{HashMap, HashSet};

/// Dense vectors are only built while the full matrix stays under this many
/// cells; larger inputs switch to sparse maps, bounding memory to the number
/// of nonzero weights per text.
const DENSE_CELL_BUDGET: usize = 1 << 14;

/// Weighting options resolved from the algorithm profile.
#[derive(Debug, Clone, Copy)]
pub struct WeightingOptions {
    /// Log-dampened TF and smoothed IDF when set; raw TF and standard IDF
    /// otherwise.
    pub improved_idf: bool,
    pub l2_normalize: bool,
}

/// Output of one vectorization pass. Lives only within one search call;
/// nothing here is cached.
#[derive(Debug)]
pub struct TfidfModel {
    /// Unique tokens in first-occurrence order across corpus then query.
    pub vocabulary: Vec<String>,
    /// One vector per corpus document, in input order.
    pub doc_vectors: Vec<TermVector>,
    /// Vector for the final combined-list slot.
    pub query_vector: TermVector,
}

/// Build TF-IDF vectors for every document plus the query.
pub fn vectorize(
    doc_tokens: &[Vec<String>],
    query_tokens: &[String],
    options: WeightingOptions,
) -> TfidfModel {
    let combined: Vec<&[String]> = doc_tokens
        .iter()
        .map(Vec::as_slice)
        .chain(std::iter::once(query_tokens))
        .collect();

    let vocabulary = build_vocabulary(&combined);
    let idf = inverse_document_frequencies(&combined, &vocabulary, options.improved_idf);
    let index_of: HashMap<&str, usize> = vocabulary
        .iter()
        .enumerate()
        .map(|(slot, token)| (token.as_str(), slot))
        .collect();

    let dense = combined.len() * vocabulary.len() <= DENSE_CELL_BUDGET;
    let mut vectors: Vec<TermVector> = combined
        .iter()
        .map(|tokens| build_vector(tokens, &index_of, &idf, vocabulary.len(), dense, options))
        .collect();

    // The query is always the final slot, so the pop cannot miss.
    let query_vector = vectors
        .pop()
        .unwrap_or_else(|| TermVector::Sparse(HashMap::new()));

    TfidfModel {
        vocabulary,
        doc_vectors: vectors,
        query_vector,
    }
}

/// Unique tokens in first-occurrence order across the combined list.
fn build_vocabulary(texts: &[&[String]]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut vocabulary = Vec::new();
    for tokens in texts {
        for token in *tokens {
            if seen.insert(token.as_str()) {
                vocabulary.push(token.clone());
            }
        }
    }
    vocabulary
}

/// Term frequency per token of one text. An empty text yields an empty map,
/// so the raw-TF division never sees a zero denominator.
fn term_frequencies(tokens: &[String], log_dampened: bool) -> HashMap<&str, f64> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }
    let total = tokens.len() as f64;
    counts
        .into_iter()
        .map(|(token, count)| {
            let tf = if log_dampened {
                (1.0 + count as f64).ln()
            } else {
                count as f64 / total
            };
            (token, tf)
        })
        .collect()
}

/// Standard IDF. Zero when a term appears in every text.
fn standard_idf(text_count: usize, df: usize) -> f64 {
    (text_count as f64 / df as f64).ln()
}

/// Smoothed IDF. Finite and >= 1 for any df in [1, N].
fn smoothed_idf(text_count: usize, df: usize) -> f64 {
    ((text_count as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0
}

/// IDF per vocabulary slot. Document frequency counts every combined-list
/// text containing the term at least once, the query included.
fn inverse_document_frequencies(
    texts: &[&[String]],
    vocabulary: &[String],
    smoothed: bool,
) -> Vec<f64> {
    let mut df: HashMap<&str, usize> = HashMap::new();
    for tokens in texts {
        let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
        for token in unique {
            *df.entry(token).or_insert(0) += 1;
        }
    }

    vocabulary
        .iter()
        .map(|token| {
            let df_value = df.get(token.as_str()).copied().unwrap_or(1);
            if smoothed {
                smoothed_idf(texts.len(), df_value)
            } else {
                standard_idf(texts.len(), df_value)
            }
        })
        .collect()
}

fn build_vector(
    tokens: &[String],
    index_of: &HashMap<&str, usize>,
    idf: &[f64],
    vocab_len: usize,
    dense: bool,
    options: WeightingOptions,
) -> TermVector {
    let tf = term_frequencies(tokens, options.improved_idf);

    let mut vector = if dense {
        let mut values = vec![0.0; vocab_len];
        for (token, tf_value) in &tf {
            if let Some(&slot) = index_of.get(*token) {
                let weight = tf_value * idf[slot];
                if weight > 0.0 {
                    values[slot] = weight;
                }
            }
        }
        TermVector::Dense(values)
    } else {
        let entries = tf
            .iter()
            .filter_map(|(token, tf_value)| {
                let slot = *index_of.get(*token)?;
                let weight = tf_value * idf[slot];
                (weight > 0.0).then(|| ((*token).to_string(), weight))
            })
            .collect();
        TermVector::Sparse(entries)
    };

    if options.l2_normalize {
        vector.l2_normalize();
    }
    vector
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    const IMPROVED: WeightingOptions = WeightingOptions {
        improved_idf: true,
        l2_normalize: true,
    };

    // ── vocabulary ───────────────────────────────────────────────

    #[test]
    fn test_vocabulary_first_occurrence_order() {
        let docs = vec![tokens(&["b", "a", "b"]), tokens(&["c", "a"])];
        let query = tokens(&["d", "c"]);
        let model = vectorize(&docs, &query, IMPROVED);
        assert_eq!(model.vocabulary, vec!["b", "a", "c", "d"]);
    }

    // ── TF ───────────────────────────────────────────────────────

    #[test]
    fn test_raw_tf_is_count_over_total() {
        let toks = tokens(&["a", "a", "b"]);
        let tf = term_frequencies(&toks, false);
        assert!((tf["a"] - 2.0 / 3.0).abs() < 1e-12);
        assert!((tf["b"] - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_log_tf_dampens_counts() {
        let toks = tokens(&["a", "a", "a", "b"]);
        let tf = term_frequencies(&toks, true);
        assert!((tf["a"] - 4.0_f64.ln()).abs() < 1e-12);
        assert!((tf["b"] - 2.0_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_empty_text_has_empty_tf() {
        assert!(term_frequencies(&[], false).is_empty());
    }

    // ── IDF ──────────────────────────────────────────────────────

    #[test]
    fn test_standard_idf_zero_when_term_everywhere() {
        assert_eq!(standard_idf(4, 4), 0.0);
    }

    #[test]
    fn test_smoothed_idf_finite_and_nonnegative() {
        for n in 1..=20 {
            for df in 1..=n {
                let idf = smoothed_idf(n, df);
                assert!(idf.is_finite());
                assert!(idf >= 0.0, "smoothed_idf({n}, {df}) = {idf}");
            }
        }
    }

    #[test]
    fn test_idf_monotonically_nonincreasing_in_df() {
        for n in 2..=20 {
            for df in 1..n {
                assert!(standard_idf(n, df) >= standard_idf(n, df + 1));
                assert!(smoothed_idf(n, df) >= smoothed_idf(n, df + 1));
            }
        }
    }

    #[test]
    fn test_document_frequency_counts_the_query() {
        // One document and a query sharing the single term: df == N == 2,
        // so standard IDF zeroes the term out of both vectors entirely.
        let docs = vec![tokens(&["cat"])];
        let query = tokens(&["cat"]);
        let model = vectorize(
            &docs,
            &query,
            WeightingOptions {
                improved_idf: false,
                l2_normalize: false,
            },
        );
        assert_eq!(model.query_vector.dot(&model.doc_vectors[0]), 0.0);

        // The smoothed scheme keeps it alive.
        let model = vectorize(&docs, &query, IMPROVED);
        assert!(model.query_vector.dot(&model.doc_vectors[0]) > 0.9);
    }

    // ── vectors ──────────────────────────────────────────────────

    #[test]
    fn test_small_corpus_uses_dense_vectors() {
        let docs = vec![tokens(&["cat", "sat"]), tokens(&["dog"])];
        let model = vectorize(&docs, &tokens(&["cat"]), IMPROVED);
        assert!(matches!(model.query_vector, TermVector::Dense(_)));
        if let TermVector::Dense(values) = &model.doc_vectors[0] {
            assert_eq!(values.len(), model.vocabulary.len());
        }
    }

    #[test]
    fn test_large_corpus_uses_sparse_vectors() {
        // 200 single-token documents push texts x vocab past the dense
        // cell budget.
        let docs: Vec<Vec<String>> = (0..200).map(|i| vec![format!("term{i}")]).collect();
        let model = vectorize(&docs, &tokens(&["term0"]), IMPROVED);
        assert!(matches!(model.query_vector, TermVector::Sparse(_)));
        // Sparse self-similarity still normalizes to 1.
        let first = &model.doc_vectors[0];
        assert!((first.dot(first) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_dense_and_sparse_score_identically() {
        let docs = vec![
            tokens(&["cat", "sat", "mat"]),
            tokens(&["dog", "ran"]),
            tokens(&["cat", "cat", "dog"]),
        ];
        let query = tokens(&["cat", "dog"]);

        let combined: Vec<&[String]> = docs
            .iter()
            .map(Vec::as_slice)
            .chain(std::iter::once(query.as_slice()))
            .collect();
        let vocabulary = build_vocabulary(&combined);
        let idf = inverse_document_frequencies(&combined, &vocabulary, true);
        let index_of: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(slot, token)| (token.as_str(), slot))
            .collect();

        for text in &combined {
            let dense = build_vector(text, &index_of, &idf, vocabulary.len(), true, IMPROVED);
            let sparse = build_vector(text, &index_of, &idf, vocabulary.len(), false, IMPROVED);
            for other in &combined {
                let dense_other =
                    build_vector(other, &index_of, &idf, vocabulary.len(), true, IMPROVED);
                let sparse_other =
                    build_vector(other, &index_of, &idf, vocabulary.len(), false, IMPROVED);
                assert!((dense.dot(&dense_other) - sparse.dot(&sparse_other)).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_self_similarity_is_one_with_l2() {
        let docs = vec![tokens(&["the", "cat", "sat"]), tokens(&["dog"])];
        let model = vectorize(&docs, &tokens(&["the", "cat", "sat"]), IMPROVED);
        assert!((model.query_vector.dot(&model.doc_vectors[0]) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_document_yields_zero_vector() {
        let docs = vec![tokens(&[]), tokens(&["cat"])];
        let model = vectorize(&docs, &tokens(&["cat"]), IMPROVED);
        assert_eq!(model.doc_vectors[0].norm(), 0.0);
        assert_eq!(model.query_vector.dot(&model.doc_vectors[0]), 0.0);
    }

    #[test]
    fn test_without_l2_dot_is_unbounded() {
        let docs = vec![tokens(&["cat", "cat", "cat", "cat"])];
        let query = tokens(&["cat", "cat", "cat", "cat"]);
        let model = vectorize(
            &docs,
            &query,
            WeightingOptions {
                improved_idf: true,
                l2_normalize: false,
            },
        );
        assert!(model.query_vector.dot(&model.doc_vectors[0]) > 1.0);
    }
}
