//! Corpus loading.
//!
//! Owns the documents for the load lifetime. Failures here belong to this
//! layer and never surface through the search engine's contract.

use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("corpus contains no documents")]
    NoDocuments,
}

pub type CorpusResult<T> = Result<T, CorpusError>;

/// One searchable text record. Its identity is its position: hits refer to
/// documents by 1-based corpus index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub text: String,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// An ordered, immutable set of documents loaded from one source.
#[derive(Debug, Clone)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    /// Load a corpus file: one document per non-blank line.
    pub fn load<P: AsRef<Path>>(path: P) -> CorpusResult<Self> {
        Self::from_text(&fs::read_to_string(path)?)
    }

    /// Split raw text into one document per non-blank line.
    pub fn from_text(raw: &str) -> CorpusResult<Self> {
        let documents: Vec<Document> = raw
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(Document::new)
            .collect();
        if documents.is_empty() {
            return Err(CorpusError::NoDocuments);
        }
        Ok(Self { documents })
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
