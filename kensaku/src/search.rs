//! Search orchestration.
//!
//! Binds an algorithm profile to tokenizer, weighting, similarity and
//! ranking, and runs the per-invocation pipeline: validate, tokenize,
//! vectorize, score, sort, truncate. Nothing is cached across calls: every
//! invocation re-tokenizes its input and rebuilds the vocabulary from
//! scratch, and any precondition failure aborts the whole call with a typed
//! error rather than a partial result.

use crate::corpus::Document;
use crate::interface::{Algorithm, SearchError, SearchHit, SearchResponse, SearchResult};
use crate::ranking::filter_and_rank;
use crate::similarity::{jaccard_similarity, partial_match_score};
use crate::stopwords::StopwordConfig;
use crate::tokenizer::{Tokenizer, TokenizerVariant};
use crate::weighting::{self, WeightingOptions};
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// TF-IDF scores at or below this are noise from near-orthogonal vectors
/// and are filtered out before ranking.
const TFIDF_SCORE_FLOOR: f64 = 0.001;

/// Resolved per-profile options with named fields. Built once per profile as
/// a constant, never merged per call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlgorithmConfig {
    pub tokenizer: TokenizerVariant,
    pub use_stopwords: bool,
    /// Repetition multiplier for English words (advanced tokenizer).
    pub english_weight: f64,
    /// Repetition multiplier for katakana runs (advanced tokenizer).
    pub katakana_weight: f64,
    /// Log-dampened TF + smoothed IDF when set; raw TF + standard IDF
    /// otherwise.
    pub improved_idf: bool,
    pub l2_normalize: bool,
}

impl AlgorithmConfig {
    /// TF-IDF over basic tokens. The weighting defaults match the other
    /// profiles; only the tokenizer differs.
    pub const TFIDF_BASIC: AlgorithmConfig = AlgorithmConfig {
        tokenizer: TokenizerVariant::Basic,
        use_stopwords: false,
        english_weight: 1.0,
        katakana_weight: 1.0,
        improved_idf: true,
        l2_normalize: true,
    };

    /// Script-aware tokens with moderate weights: English x1.2 (one
    /// occurrence after rounding), katakana x1.5 (two).
    pub const TFIDF_ADVANCED: AlgorithmConfig = AlgorithmConfig {
        tokenizer: TokenizerVariant::Advanced,
        use_stopwords: true,
        english_weight: 1.2,
        katakana_weight: 1.5,
        improved_idf: true,
        l2_normalize: true,
    };

    /// Script-aware tokens with aggressive weights: English x1.5, katakana
    /// x2.0 (both two occurrences after rounding).
    pub const TFIDF_ULTRA: AlgorithmConfig = AlgorithmConfig {
        tokenizer: TokenizerVariant::Advanced,
        use_stopwords: true,
        english_weight: 1.5,
        katakana_weight: 2.0,
        improved_idf: true,
        l2_normalize: true,
    };
}

/// Scores plus the ranking/diagnostic parameters of one algorithm run.
struct Scored {
    hits: Vec<SearchHit>,
    threshold: f64,
    vocab_size: usize,
    preprocessing: Option<Duration>,
}

/// Multilingual lexical search over an in-memory corpus.
///
/// Single-threaded and synchronous; one call runs to completion or fails
/// outright. Holds nothing but the immutable stopword configuration.
pub struct SearchEngine {
    stopwords: StopwordConfig,
}

impl SearchEngine {
    /// Engine with the built-in English/Japanese stopword sets.
    pub fn new() -> Self {
        Self {
            stopwords: StopwordConfig::default_sets().clone(),
        }
    }

    /// Engine with caller-provided stopword sets.
    pub fn with_stopwords(stopwords: StopwordConfig) -> Self {
        Self { stopwords }
    }

    /// Rank `documents` against `query` and return the best `top_n` hits.
    pub fn search(
        &self,
        documents: &[Document],
        query: &str,
        algorithm: Algorithm,
        top_n: usize,
    ) -> SearchResult<SearchResponse> {
        let started = Instant::now();

        if top_n == 0 {
            return Err(SearchError::InvalidTopN(top_n));
        }
        if documents.is_empty() {
            return Err(SearchError::EmptyCorpus);
        }
        if query.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let scored = match algorithm {
            Algorithm::Substring => self.score_substring(documents, query),
            Algorithm::Jaccard => self.score_jaccard(documents, query),
            Algorithm::TfidfBasic => {
                self.score_tfidf(documents, query, &AlgorithmConfig::TFIDF_BASIC)
            }
            Algorithm::TfidfAdvanced => {
                self.score_tfidf(documents, query, &AlgorithmConfig::TFIDF_ADVANCED)
            }
            Algorithm::TfidfUltra => {
                self.score_tfidf(documents, query, &AlgorithmConfig::TFIDF_ULTRA)
            }
        };

        let hits = filter_and_rank(scored.hits, scored.threshold, top_n);

        #[cfg(feature = "perf-log")]
        eprintln!(
            "[perf] algorithm={} elapsed={:.1}ms hits={}/{} vocab={}",
            algorithm,
            started.elapsed().as_secs_f64() * 1000.0,
            hits.len(),
            documents.len(),
            scored.vocab_size,
        );

        Ok(SearchResponse {
            hits,
            algorithm,
            vocab_size: scored.vocab_size,
            elapsed: started.elapsed(),
            preprocessing: scored.preprocessing,
        })
    }

    /// Literal substring matching. Reports the query word count as the
    /// vocabulary size; only exact-zero scores are filtered.
    fn score_substring(&self, documents: &[Document], query: &str) -> Scored {
        let hits = documents
            .iter()
            .enumerate()
            .map(|(i, doc)| SearchHit {
                index: i + 1,
                score: partial_match_score(&doc.text, query),
                text: doc.text.clone(),
            })
            .collect();

        Scored {
            hits,
            threshold: 0.0,
            vocab_size: query.split_whitespace().count(),
            preprocessing: None,
        }
    }

    /// Jaccard set overlap over basic tokens. Reports the unique query-token
    /// count as the vocabulary size.
    fn score_jaccard(&self, documents: &[Document], query: &str) -> Scored {
        let tokenizer = Tokenizer::new(
            TokenizerVariant::Basic,
            &self.stopwords,
            false,
            1.0,
            1.0,
        );
        let query_tokens = tokenizer.tokenize(query);
        let vocab_size = query_tokens
            .iter()
            .map(String::as_str)
            .collect::<HashSet<_>>()
            .len();

        let hits = documents
            .iter()
            .enumerate()
            .map(|(i, doc)| SearchHit {
                index: i + 1,
                score: jaccard_similarity(&query_tokens, &tokenizer.tokenize(&doc.text)),
                text: doc.text.clone(),
            })
            .collect();

        Scored {
            hits,
            threshold: 0.0,
            vocab_size,
            preprocessing: None,
        }
    }

    /// TF-IDF cosine scoring with the given profile.
    fn score_tfidf(
        &self,
        documents: &[Document],
        query: &str,
        config: &AlgorithmConfig,
    ) -> Scored {
        let preprocessing_started = Instant::now();

        let tokenizer = Tokenizer::new(
            config.tokenizer,
            &self.stopwords,
            config.use_stopwords,
            config.english_weight,
            config.katakana_weight,
        );
        let doc_tokens: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| tokenizer.tokenize(&doc.text))
            .collect();
        let query_tokens = tokenizer.tokenize(query);

        let model = weighting::vectorize(
            &doc_tokens,
            &query_tokens,
            WeightingOptions {
                improved_idf: config.improved_idf,
                l2_normalize: config.l2_normalize,
            },
        );
        let preprocessing = preprocessing_started.elapsed();

        #[cfg(feature = "perf-log")]
        eprintln!(
            "[perf] preprocessing={:.1}ms vocab={} docs={}",
            preprocessing.as_secs_f64() * 1000.0,
            model.vocabulary.len(),
            documents.len(),
        );

        let hits = documents
            .iter()
            .enumerate()
            .map(|(i, doc)| SearchHit {
                index: i + 1,
                score: model.query_vector.dot(&model.doc_vectors[i]),
                text: doc.text.clone(),
            })
            .collect();

        Scored {
            hits,
            threshold: TFIDF_SCORE_FLOOR,
            vocab_size: model.vocabulary.len(),
            preprocessing: Some(preprocessing),
        }
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn documents(texts: &[&str]) -> Vec<Document> {
        texts.iter().map(|t| Document::new(*t)).collect()
    }

    // ── validation ───────────────────────────────────────────────

    #[test]
    fn test_zero_top_n_is_a_configuration_error() {
        let engine = SearchEngine::new();
        let err = engine
            .search(&documents(&["cat"]), "cat", Algorithm::Jaccard, 0)
            .unwrap_err();
        assert_eq!(err, SearchError::InvalidTopN(0));
    }

    #[test]
    fn test_empty_corpus_is_an_input_error() {
        let engine = SearchEngine::new();
        let err = engine
            .search(&[], "cat", Algorithm::TfidfUltra, 5)
            .unwrap_err();
        assert_eq!(err, SearchError::EmptyCorpus);
    }

    #[test]
    fn test_whitespace_query_is_an_input_error() {
        let engine = SearchEngine::new();
        let err = engine
            .search(&documents(&["cat"]), "  \t ", Algorithm::Substring, 5)
            .unwrap_err();
        assert_eq!(err, SearchError::EmptyQuery);
    }

    // ── profiles ─────────────────────────────────────────────────

    #[test]
    fn test_profile_constants() {
        assert_eq!(
            AlgorithmConfig::TFIDF_BASIC.tokenizer,
            TokenizerVariant::Basic
        );
        assert!(AlgorithmConfig::TFIDF_ADVANCED.use_stopwords);
        assert_eq!(AlgorithmConfig::TFIDF_ULTRA.katakana_weight, 2.0);
        // All three share the weighting defaults.
        for config in [
            AlgorithmConfig::TFIDF_BASIC,
            AlgorithmConfig::TFIDF_ADVANCED,
            AlgorithmConfig::TFIDF_ULTRA,
        ] {
            assert!(config.improved_idf);
            assert!(config.l2_normalize);
        }
    }

    // ── scoring dispatch ─────────────────────────────────────────

    #[test]
    fn test_substring_reports_query_word_count_as_vocab() {
        let engine = SearchEngine::new();
        let response = engine
            .search(&documents(&["cat sat"]), "cat sat", Algorithm::Substring, 5)
            .unwrap();
        assert_eq!(response.vocab_size, 2);
        assert!(response.preprocessing.is_none());
    }

    #[test]
    fn test_jaccard_reports_unique_query_tokens_as_vocab() {
        let engine = SearchEngine::new();
        let response = engine
            .search(&documents(&["cat"]), "cat cat sat", Algorithm::Jaccard, 5)
            .unwrap();
        assert_eq!(response.vocab_size, 2);
    }

    #[test]
    fn test_tfidf_reports_vocabulary_and_preprocessing() {
        let engine = SearchEngine::new();
        let response = engine
            .search(
                &documents(&["cat sat", "dog ran"]),
                "cat",
                Algorithm::TfidfBasic,
                5,
            )
            .unwrap();
        // Vocabulary spans the corpus and the query: cat, sat, dog, ran.
        assert_eq!(response.vocab_size, 4);
        assert!(response.preprocessing.is_some());
    }

    #[test]
    fn test_tfidf_noise_floor_excludes_unrelated_documents() {
        let engine = SearchEngine::new();
        let response = engine
            .search(
                &documents(&["the cat sat", "a dog ran", "the cat sat on the mat"]),
                "cat sat",
                Algorithm::TfidfBasic,
                10,
            )
            .unwrap();
        let indexes: Vec<usize> = response.hits.iter().map(|h| h.index).collect();
        assert!(indexes.contains(&1));
        assert!(indexes.contains(&3));
        assert!(!indexes.contains(&2), "orthogonal document must fall below the noise floor");
    }
}
