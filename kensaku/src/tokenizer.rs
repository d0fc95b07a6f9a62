//! Script-aware tokenization for mixed English/Japanese text.
//!
//! Two variants share one cleaning pass and emit a flat token stream:
//!
//! - *Basic*: lowercased ASCII letter-runs plus character 2/3-grams over the
//!   non-alphanumeric residual. No stopword filtering.
//! - *Advanced*: English words, digit runs, katakana runs, kanji runs, then
//!   character 2/3/4-grams over the Japanese residual. English and katakana
//!   tokens are repeated according to the profile's script weights, which
//!   inflates their raw counts before IDF multiplication.
//!
//! Repetition counts come from `round_half_up`, so a weight of 1.2 means one
//! occurrence and 1.5 means two. The n-gram windows are purely
//! character-positional: the residual is the concatenation of every
//! non-stripped character, so a window may span what was a word boundary in
//! the source text.

use crate::stopwords::StopwordConfig;

/// Tokenizer variant selected by the algorithm profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizerVariant {
    Basic,
    Advanced,
}

/// n-gram window lengths per variant.
const BASIC_NGRAM_LENGTHS: std::ops::RangeInclusive<usize> = 2..=3;
const ADVANCED_NGRAM_LENGTHS: std::ops::RangeInclusive<usize> = 2..=4;

/// Minimum length for an advanced-variant English word.
const ADVANCED_MIN_WORD_LEN: usize = 2;
/// Minimum length for a katakana run.
const MIN_KATAKANA_RUN: usize = 2;

/// Round to the nearest integer with halves rounding up, clamped at zero.
///
/// Spelled out rather than delegated to `f64::round` so the repetition
/// counts derived from script weights stay fixed across platforms and
/// rounding conventions: 1.2 -> 1, 1.5 -> 2, 2.0 -> 2.
pub fn round_half_up(value: f64) -> usize {
    (value + 0.5).floor().max(0.0) as usize
}

fn is_hiragana(c: char) -> bool {
    ('\u{3041}'..='\u{3093}').contains(&c)
}

/// The katakana run class: ァ..ヶ plus the prolonged sound mark ー.
/// The rare voiced forms ヷ..ヺ survive cleaning but break runs.
fn is_katakana(c: char) -> bool {
    ('\u{30A1}'..='\u{30F6}').contains(&c) || c == 'ー'
}

fn is_rare_katakana(c: char) -> bool {
    ('\u{30F7}'..='\u{30FA}').contains(&c)
}

fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FA5}').contains(&c)
}

fn is_japanese_punct(c: char) -> bool {
    matches!(c, '、' | '。' | '！' | '？')
}

fn is_ascii_punct(c: char) -> bool {
    matches!(c, '.' | ',' | '!' | '?')
}

/// Reduce text to the allowed character set (ASCII alphanumerics, the
/// Japanese scripts, both punctuation sets, whitespace), collapse whitespace
/// runs to a single space and trim.
pub(crate) fn clean(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        let keep = c.is_ascii_alphanumeric()
            || is_hiragana(c)
            || is_katakana(c)
            || is_rare_katakana(c)
            || is_kanji(c)
            || is_japanese_punct(c)
            || is_ascii_punct(c)
            || c.is_whitespace();
        if !keep {
            continue;
        }
        if c.is_whitespace() {
            if !out.ends_with(' ') {
                out.push(' ');
            }
        } else {
            out.push(c);
        }
    }
    out.trim().to_string()
}

/// Maximal ASCII-letter runs of at least `min_len` characters, lowercased.
/// A run glued to an ASCII digit ("abc123") is not a standalone word.
fn english_words(chars: &[char], min_len: usize) -> Vec<String> {
    let mut words = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_ascii_alphabetic() {
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && chars[i].is_ascii_alphabetic() {
            i += 1;
        }
        let free_before = start == 0 || !chars[start - 1].is_ascii_digit();
        let free_after = i == chars.len() || !chars[i].is_ascii_digit();
        if i - start >= min_len && free_before && free_after {
            words.push(chars[start..i].iter().collect::<String>().to_ascii_lowercase());
        }
    }
    words
}

/// Maximal ASCII-digit runs. Always standalone tokens, even when glued to
/// letters: years and version numbers matter.
fn digit_runs(chars: &[char]) -> Vec<String> {
    script_runs(chars, |c| c.is_ascii_digit(), 1)
}

/// Maximal runs of characters satisfying `class`, at least `min_len` long.
fn script_runs(chars: &[char], class: impl Fn(char) -> bool, min_len: usize) -> Vec<String> {
    let mut runs = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if !class(chars[i]) {
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && class(chars[i]) {
            i += 1;
        }
        if i - start >= min_len {
            runs.push(chars[start..i].iter().collect());
        }
    }
    runs
}

/// Script-aware tokenizer bound to one algorithm profile.
///
/// Repetition counts are resolved once at construction from the profile's
/// script weights.
pub struct Tokenizer<'a> {
    variant: TokenizerVariant,
    stopwords: &'a StopwordConfig,
    use_stopwords: bool,
    english_repeat: usize,
    katakana_repeat: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(
        variant: TokenizerVariant,
        stopwords: &'a StopwordConfig,
        use_stopwords: bool,
        english_weight: f64,
        katakana_weight: f64,
    ) -> Self {
        Self {
            variant,
            stopwords,
            use_stopwords,
            english_repeat: round_half_up(english_weight),
            katakana_repeat: round_half_up(katakana_weight),
        }
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        match self.variant {
            TokenizerVariant::Basic => self.tokenize_basic(text),
            TokenizerVariant::Advanced => self.tokenize_advanced(text),
        }
    }

    /// Lowercased letter-runs, then 2/3-grams over whatever is neither ASCII
    /// alphanumeric nor whitespace. Punctuation survives into the residual.
    fn tokenize_basic(&self, text: &str) -> Vec<String> {
        let cleaned = clean(text);
        let chars: Vec<char> = cleaned.chars().collect();

        let mut tokens = english_words(&chars, 1);

        let residual: Vec<char> = chars
            .iter()
            .copied()
            .filter(|&c| !c.is_ascii_alphanumeric() && !c.is_whitespace())
            .collect();
        for n in BASIC_NGRAM_LENGTHS {
            if residual.len() < n {
                continue;
            }
            for i in 0..=residual.len() - n {
                tokens.push(residual[i..i + n].iter().collect());
            }
        }

        tokens
    }

    /// English words, digit runs, katakana runs, kanji runs, then 2/3/4-grams
    /// over the Japanese residual, in that order.
    fn tokenize_advanced(&self, text: &str) -> Vec<String> {
        let cleaned = clean(text);
        let chars: Vec<char> = cleaned.chars().collect();
        let mut tokens = Vec::new();

        for word in english_words(&chars, ADVANCED_MIN_WORD_LEN) {
            if self.use_stopwords && self.stopwords.is_english(&word) {
                continue;
            }
            for _ in 0..self.english_repeat {
                tokens.push(word.clone());
            }
        }

        tokens.extend(digit_runs(&chars));

        for run in script_runs(&chars, is_katakana, MIN_KATAKANA_RUN) {
            for _ in 0..self.katakana_repeat {
                tokens.push(run.clone());
            }
        }

        // Katakana runs are never stopword-filtered; kanji runs are.
        for run in script_runs(&chars, is_kanji, 1) {
            if self.use_stopwords && self.stopwords.is_japanese(&run) {
                continue;
            }
            tokens.push(run);
        }

        let residual: Vec<char> = chars
            .iter()
            .copied()
            .filter(|&c| {
                !c.is_ascii_alphanumeric()
                    && !c.is_whitespace()
                    && !is_ascii_punct(c)
                    && !is_japanese_punct(c)
            })
            .collect();
        for n in ADVANCED_NGRAM_LENGTHS {
            if residual.len() < n {
                continue;
            }
            for i in 0..=residual.len() - n {
                let gram: String = residual[i..i + n].iter().collect();
                if self.use_stopwords && self.stopwords.is_japanese(&gram) {
                    continue;
                }
                tokens.push(gram);
            }
        }

        tokens
    }
}
