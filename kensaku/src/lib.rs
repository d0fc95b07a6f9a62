//! kensaku: multilingual (English + Japanese) lexical search.
//!
//! Ranks short text records against a free-text query with five selectable
//! algorithms: literal substring matching, Jaccard set overlap, and three
//! TF-IDF profiles that differ in tokenizer and script weighting. Everything
//! is computed in memory within one call; there is no persistent index and
//! no state shared across calls.

pub mod corpus;
pub mod interface;
pub mod ranking;
pub mod search;
pub mod similarity;
pub mod stopwords;
pub mod tokenizer;
pub mod vector;
pub mod weighting;

pub use corpus::{Corpus, CorpusError, Document};
pub use interface::*;
pub use search::{AlgorithmConfig, SearchEngine};
pub use stopwords::StopwordConfig;
