use std::collections::BTreeSet;

use super::document::DocumentText;
use super::normalizer::{normalize, searchable, TokenSet};

const TOKEN_OVERLAP_RATIO: f64 = 0.7;
const FUZZY_TOKEN_MIN_CHARS: usize = 4;

/// Whether a single criterion phrase is evidenced by the text.
///
/// `full_text` must already be lowercased (see [`searchable`]). A phrase is met by a literal
/// occurrence, by 70% of its tokens appearing among the text tokens, or by any of its longer
/// tokens overlapping a longer text token as a substring.
pub fn phrase_met(
    full_text: &str,
    text_tokens: &BTreeSet<String>,
    phrase: &str,
    phrase_tokens: &TokenSet,
) -> bool {
    let needle = searchable(phrase);
    if needle.is_empty() {
        return false;
    }
    if full_text.contains(&needle) {
        return true;
    }

    let wanted = phrase_tokens.unique();
    if wanted.is_empty() {
        return false;
    }

    let present = wanted
        .iter()
        .filter(|token| text_tokens.contains(**token))
        .count();
    if present as f64 / wanted.len() as f64 >= TOKEN_OVERLAP_RATIO {
        return true;
    }

    wanted
        .iter()
        .filter(|token| token.chars().count() >= FUZZY_TOKEN_MIN_CHARS)
        .any(|token| {
            text_tokens
                .iter()
                .filter(|candidate| candidate.chars().count() >= FUZZY_TOKEN_MIN_CHARS)
                .any(|candidate| candidate.contains(*token) || token.contains(candidate.as_str()))
        })
}

/// Checks a phrase against a prepared document.
pub fn criterion_met(document: &DocumentText, phrase: &str) -> bool {
    phrase_met(
        document.searchable(),
        document.vocabulary(),
        phrase,
        &normalize(phrase),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(text: &str) -> DocumentText {
        DocumentText::new(text, 1_000)
    }

    #[test]
    fn literal_occurrence_meets_phrase() {
        let doc = document("We foster intercultural understanding among students.");
        assert!(criterion_met(&doc, "Intercultural Understanding"));
    }

    #[test]
    fn token_overlap_meets_phrase() {
        let doc = document("Students engaged with the local community through service.");
        assert!(criterion_met(&doc, "service to the community"));
    }

    #[test]
    fn fuzzy_token_substring_meets_phrase() {
        let doc = document("The office published sustainability reports.");
        assert!(criterion_met(&doc, "sustainable campus"));
    }

    #[test]
    fn unrelated_phrase_is_not_met() {
        let doc = document("Annual budget summary for the finance office.");
        assert!(!criterion_met(&doc, "intercultural understanding"));
        assert!(!criterion_met(&doc, ""));
    }

    #[test]
    fn empty_text_meets_nothing() {
        let doc = document("");
        assert!(!criterion_met(&doc, "global citizenship"));
    }
}
