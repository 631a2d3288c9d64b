use std::collections::BTreeSet;

use strsim::levenshtein;

use super::normalizer::{normalize, TokenSet};

const PARTIAL_MATCH_WEIGHT: f64 = 0.8;
const BROAD_OVERLAP_RATIO: f64 = 0.1;
const BROAD_OVERLAP_BOOST: f64 = 1.3;

const SUBSTRING_MIN_CHARS: usize = 3;
const EDIT_DISTANCE_MIN_CHARS: usize = 4;
const MIN_LENGTH_RATIO: f64 = 0.75;
const MAX_EDIT_FRACTION: f64 = 0.25;

/// Stemmed sub-tokens of every keyword phrase, ready for [`jaccard`].
pub fn keyword_tokens<S: AsRef<str>>(keywords: &[S]) -> TokenSet {
    let mut tokens = TokenSet::default();
    for keyword in keywords {
        tokens.extend(normalize(keyword.as_ref()));
    }
    tokens
}

/// Fuzzy Jaccard similarity in `[0, 1]`.
///
/// Exact overlap counts fully; tokens without an exact partner but with a fuzzy partner on
/// the other side count at 0.8. Broad overlap (more than 10% of the union matched) earns a
/// 1.3x boost before the ratio is capped. Either side being empty yields 0.
pub fn jaccard(a: &TokenSet, b: &TokenSet) -> f64 {
    let left = a.unique();
    let right = b.unique();
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }

    let exact = left.intersection(&right).count();
    let partial = fuzzy_only(&left, &right) + fuzzy_only(&right, &left);
    let union = left.union(&right).count();

    let mut total = exact as f64 + PARTIAL_MATCH_WEIGHT * partial as f64;
    let matched_ratio = (exact + partial) as f64 / union as f64;
    if matched_ratio > BROAD_OVERLAP_RATIO {
        total *= BROAD_OVERLAP_BOOST;
    }

    (total / union as f64).min(1.0)
}

/// Tokens of `side` absent from `other` that still fuzzily match one of its tokens.
fn fuzzy_only(side: &BTreeSet<&str>, other: &BTreeSet<&str>) -> usize {
    side.iter()
        .filter(|token| !other.contains(*token))
        .filter(|token| other.iter().any(|candidate| is_partial_match(token, candidate)))
        .count()
}

/// Substring containment, or near-equal length within a 25% edit budget.
pub fn is_partial_match(a: &str, b: &str) -> bool {
    let len_a = a.chars().count();
    let len_b = b.chars().count();

    if len_a >= SUBSTRING_MIN_CHARS
        && len_b >= SUBSTRING_MIN_CHARS
        && (a.contains(b) || b.contains(a))
    {
        return true;
    }

    let shorter = len_a.min(len_b);
    let longer = len_a.max(len_b);
    if shorter < EDIT_DISTANCE_MIN_CHARS || (shorter as f64 / longer as f64) < MIN_LENGTH_RATIO {
        return false;
    }

    let budget = (shorter as f64 * MAX_EDIT_FRACTION).floor() as usize;
    levenshtein(a, b) <= budget
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(values: &[&str]) -> TokenSet {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn empty_sets_have_no_similarity() {
        let empty = TokenSet::default();
        let some = tokens(&["community"]);
        assert_eq!(jaccard(&empty, &empty), 0.0);
        assert_eq!(jaccard(&empty, &some), 0.0);
        assert_eq!(jaccard(&some, &empty), 0.0);
    }

    #[test]
    fn identical_sets_are_fully_similar() {
        let set = tokens(&["global", "citizenship", "award"]);
        assert_eq!(jaccard(&set, &set), 1.0);
    }

    #[test]
    fn broad_overlap_earns_boost() {
        let a = tokens(&["community", "engagement", "river", "mountain"]);
        let b = tokens(&["community", "harbor"]);
        let score = jaccard(&a, &b);
        assert!((score - 0.26).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn similarity_is_symmetric_with_fuzzy_matches() {
        let a = tokens(&["organisa", "leadership", "program", "river"]);
        let b = tokens(&["organiza", "leader", "curriculum"]);
        assert_eq!(jaccard(&a, &b), jaccard(&b, &a));
        assert!(jaccard(&a, &b) > 0.0);
    }

    #[test]
    fn duplicates_do_not_change_the_score() {
        let a = tokens(&["mobility", "mobility", "exchange"]);
        let b = tokens(&["exchange", "student"]);
        let deduped = tokens(&["mobility", "exchange"]);
        assert_eq!(jaccard(&a, &b), jaccard(&deduped, &b));
    }

    #[test]
    fn partial_match_rules() {
        assert!(is_partial_match("leader", "leadership"));
        assert!(is_partial_match("organisa", "organiza"));
        assert!(!is_partial_match("zeta", "omega"));
        assert!(!is_partial_match("ab", "abc"));
        assert!(!is_partial_match("engagement", "harbor"));
    }

    #[test]
    fn keyword_phrases_expand_into_stemmed_sub_tokens() {
        let expanded = keyword_tokens(&["Global Citizenship", "community engagement"]);
        assert_eq!(
            expanded.tokens(),
            ["glob", "citizenship", "commun", "engage"]
        );
    }
}
