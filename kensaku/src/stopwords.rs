//! Immutable stopword configuration.
//!
//! Two language-tagged exclusion sets, built once and handed to the search
//! engine at construction. Nothing mutates these at runtime; callers that
//! need different sets construct their own `StopwordConfig`.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// English function words dropped by the advanced tokenizer.
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of",
    "with", "by", "is", "are", "was", "were", "be", "been", "have", "has",
    "had", "do", "does", "did",
];

/// Japanese particles and copulas dropped from kanji runs and n-grams.
pub const JAPANESE_STOPWORDS: &[&str] = &[
    "の", "に", "は", "を", "が", "で", "て", "と", "だ", "である", "です",
    "ます", "から", "まで", "より", "など", "また", "ただし", "しかし",
    "そして", "それ", "これ",
];

static DEFAULT_CONFIG: Lazy<StopwordConfig> = Lazy::new(|| {
    StopwordConfig::new(
        ENGLISH_STOPWORDS.iter().copied(),
        JAPANESE_STOPWORDS.iter().copied(),
    )
});

/// Per-language stopword sets.
#[derive(Debug, Clone)]
pub struct StopwordConfig {
    english: HashSet<String>,
    japanese: HashSet<String>,
}

impl StopwordConfig {
    pub fn new(
        english: impl IntoIterator<Item = impl Into<String>>,
        japanese: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            english: english.into_iter().map(Into::into).collect(),
            japanese: japanese.into_iter().map(Into::into).collect(),
        }
    }

    /// The built-in sets used by `SearchEngine::new`.
    pub fn default_sets() -> &'static StopwordConfig {
        &DEFAULT_CONFIG
    }

    /// Whether `word` (already lowercased) is an English stopword.
    pub fn is_english(&self, word: &str) -> bool {
        self.english.contains(word)
    }

    /// Whether `token` is a Japanese stopword.
    pub fn is_japanese(&self, token: &str) -> bool {
        self.japanese.contains(token)
    }
}
