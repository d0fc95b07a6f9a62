//! Result ranking: threshold filter, descending sort, top-N truncation.

use crate::interface::SearchHit;

/// Drop hits at or below `threshold`, sort the rest by descending score and
/// keep the best `top_n`.
///
/// The sort is stable, so equal scores keep corpus order and repeated runs
/// over identical input produce identical output.
pub fn filter_and_rank(hits: Vec<SearchHit>, threshold: f64, top_n: usize) -> Vec<SearchHit> {
    let mut ranked: Vec<SearchHit> = hits
        .into_iter()
        .filter(|hit| hit.score > threshold)
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(top_n);
    ranked
}
