use std::collections::BTreeSet;

use super::normalizer::{normalize, searchable, TokenSet};

/// Extracted document text prepared once per analysis.
#[derive(Debug, Clone)]
pub struct DocumentText {
    searchable: String,
    tokens: TokenSet,
    vocabulary: BTreeSet<String>,
}

impl DocumentText {
    /// Normalize `text`, keeping at most `max_tokens` tokens for similarity work.
    pub fn new(text: &str, max_tokens: usize) -> Self {
        let mut tokens = normalize(text);
        if tokens.len() > max_tokens {
            tracing::debug!(
                tokens = tokens.len(),
                cap = max_tokens,
                "truncating document token stream"
            );
            tokens.truncate(max_tokens);
        }
        let vocabulary = tokens.tokens().iter().cloned().collect();

        Self {
            searchable: searchable(text),
            tokens,
            vocabulary,
        }
    }

    pub fn searchable(&self) -> &str {
        &self.searchable
    }

    pub fn tokens(&self) -> &TokenSet {
        &self.tokens
    }

    pub fn vocabulary(&self) -> &BTreeSet<String> {
        &self.vocabulary
    }

    pub fn is_blank(&self) -> bool {
        self.searchable.is_empty()
    }

    /// Case- and whitespace-insensitive literal lookup. Blank phrases never match.
    pub fn contains_phrase(&self, phrase: &str) -> bool {
        let needle = searchable(phrase);
        !needle.is_empty() && self.searchable.contains(&needle)
    }

    pub fn contains_stem(&self, stem: &str) -> bool {
        self.vocabulary.contains(stem)
    }
}
