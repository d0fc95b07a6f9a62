//! Public search types.
//!
//! Source of truth for everything callers see: algorithm identifiers, ranked
//! hits, diagnostics, and the error taxonomy.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// ALGORITHMS
// ═══════════════════════════════════════════════════════════════════════════════

/// The five selectable ranking algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Literal substring / per-word partial matching.
    Substring,
    /// Set overlap over basic tokens.
    Jaccard,
    /// TF-IDF over basic tokens.
    TfidfBasic,
    /// TF-IDF over script-aware tokens, moderate script weights.
    TfidfAdvanced,
    /// TF-IDF over script-aware tokens, aggressive script weights.
    TfidfUltra,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Substring,
        Algorithm::Jaccard,
        Algorithm::TfidfBasic,
        Algorithm::TfidfAdvanced,
        Algorithm::TfidfUltra,
    ];

    /// The CLI-facing identifier.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Substring => "substring",
            Algorithm::Jaccard => "jaccard",
            Algorithm::TfidfBasic => "tfidf_basic",
            Algorithm::TfidfAdvanced => "tfidf_advanced",
            Algorithm::TfidfUltra => "tfidf_ultra",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == s)
            .ok_or_else(|| SearchError::UnknownAlgorithm(s.to_string()))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// RESULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// One ranked result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    /// 1-based position of the document in the corpus.
    pub index: usize,
    pub score: f64,
    /// The original document text, unmodified.
    pub text: String,
}

/// Ranked hits plus per-invocation diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResponse {
    /// Descending by score; ties keep corpus order.
    pub hits: Vec<SearchHit>,
    pub algorithm: Algorithm,
    /// Vocabulary size for the TF-IDF variants; the unique query-token count
    /// for Jaccard; the query word count for substring.
    pub vocab_size: usize,
    /// Wall-clock time for the whole invocation.
    pub elapsed: Duration,
    /// Tokenization + vectorization time; TF-IDF variants only.
    pub preprocessing: Option<Duration>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// ERRORS
// ═══════════════════════════════════════════════════════════════════════════════

/// Failures detected before any computation runs.
///
/// `UnknownAlgorithm` and `InvalidTopN` are configuration errors;
/// `EmptyCorpus` and `EmptyQuery` are input errors. Computation itself does
/// not fail: degenerate zero-magnitude vectors score zero and fall to the
/// ranking threshold instead of raising.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("unknown algorithm \"{0}\" (expected substring, jaccard, tfidf_basic, tfidf_advanced or tfidf_ultra)")]
    UnknownAlgorithm(String),
    #[error("top-n must be at least 1, got {0}")]
    InvalidTopN(usize),
    #[error("corpus contains no documents")]
    EmptyCorpus,
    #[error("query is empty or whitespace-only")]
    EmptyQuery,
}

pub type SearchResult<T> = Result<T, SearchError>;
