use std::collections::BTreeSet;

/// Function words dropped before scoring. Kept sorted for `binary_search`.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "at", "be", "been", "but", "by", "could", "did", "do", "does", "for",
    "from", "had", "has", "have", "in", "into", "is", "its", "of", "on", "or", "should", "that",
    "the", "their", "these", "this", "those", "to", "was", "were", "will", "with", "would",
];

/// Suffixes tried longest-first; only the first applicable one is stripped.
const SUFFIXES: &[&str] = &[
    "ative", "itive", "tion", "sion", "ness", "ment", "able", "ible", "ical", "ious", "ing", "est",
    "ity", "ial", "ous", "ive", "ies", "ism", "ist", "ize", "ise", "ed", "er", "ly", "al", "ic",
    "es", "s",
];

const MIN_TOKEN_CHARS: usize = 3;

/// Ordered sequence of stemmed, stopword-filtered tokens derived from a text.
///
/// Duplicates are preserved; [`TokenSet::unique`] gives the deduplicated view used for set
/// comparisons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    tokens: Vec<String>,
}

impl TokenSet {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|candidate| candidate == token)
    }

    pub fn unique(&self) -> BTreeSet<&str> {
        self.tokens.iter().map(String::as_str).collect()
    }

    /// Drop tokens beyond `cap`, bounding pairwise comparisons on very long documents.
    pub fn truncate(&mut self, cap: usize) {
        self.tokens.truncate(cap);
    }

    pub fn extend(&mut self, other: TokenSet) {
        self.tokens.extend(other.tokens);
    }
}

impl FromIterator<String> for TokenSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

/// Lowercase, strip punctuation, drop short and stop words, then stem what remains.
pub fn normalize(text: &str) -> TokenSet {
    let lowered = text.to_lowercase();
    let cleaned: String = lowered
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|word| word.chars().count() >= MIN_TOKEN_CHARS && !is_stop_word(word))
        .map(stem)
        .collect()
}

/// Strip the longest known suffix whose removal still leaves three characters.
pub fn stem(word: &str) -> String {
    let length = word.chars().count();
    for suffix in SUFFIXES {
        if word.ends_with(suffix) && length >= suffix.len() + MIN_TOKEN_CHARS {
            return word[..word.len() - suffix.len()].to_string();
        }
    }
    word.to_string()
}

/// Lowercased text with whitespace runs collapsed, used for literal phrase lookups.
pub fn searchable(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.binary_search(&word).is_ok()
}
