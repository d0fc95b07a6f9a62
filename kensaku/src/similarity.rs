//! Set- and substring-based similarity measures.
//!
//! Cosine similarity lives on `TermVector::dot`; these are the two measures
//! that work on raw tokens and raw text.

use std::collections::HashSet;

/// Jaccard similarity: |intersection| / |union| over deduplicated tokens.
/// Zero when both sets are empty.
pub fn jaccard_similarity(a: &[String], b: &[String]) -> f64 {
    let set_a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let set_b: HashSet<&str> = b.iter().map(String::as_str).collect();

    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = set_a.intersection(&set_b).count();
    intersection as f64 / union as f64
}

/// Literal-substring score.
///
/// 1.0 when the whole query appears in the text (case-insensitive);
/// otherwise the fraction of query words each found inside some text word;
/// 0 for an empty query.
pub fn partial_match_score(text: &str, query: &str) -> f64 {
    let query_lower = query.to_lowercase();
    let query_words: Vec<&str> = query_lower.split_whitespace().collect();
    if query_words.is_empty() {
        return 0.0;
    }

    let text_lower = text.to_lowercase();
    if text_lower.contains(&query_lower) {
        return 1.0;
    }

    let text_words: Vec<&str> = text_lower.split_whitespace().collect();
    let matched = query_words
        .iter()
        .filter(|query_word| text_words.iter().any(|text_word| text_word.contains(*query_word)))
        .count();
    matched as f64 / query_words.len() as f64
}
