//! Fuzzy text matching for mealfinder.
//!
//! This crate provides:
//! - Unicode-aware normalization and tokenization
//! - Levenshtein edit distance
//! - Similarity ratios scaled to 0-100 (plain, token-sort, token-set)
//! - Best-match selection over a list of phrases

mod fuzzy;
mod normalize;

pub use fuzzy::{levenshtein_distance, ratio, token_set_ratio, token_sort_ratio};
pub use normalize::{contains_ignore_case, normalize, tokens};

/// Best phrase found for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PhraseMatch {
    /// Index of the phrase in the searched list
    pub index: usize,
    /// Similarity score (0-100, higher is better)
    pub score: u8,
}

/// Find the phrase most similar to `query`.
///
/// Ties keep the earliest phrase, so the result is stable for a fixed
/// phrase order. Returns `None` only when `phrases` is empty.
///
/// # Example
/// ```
/// use mealfinder_search::{best_match, ratio};
///
/// let found = best_match("lean bulk", ["cutting", "lean bulk"], ratio).unwrap();
/// assert_eq!(found.index, 1);
/// assert_eq!(found.score, 100);
/// ```
pub fn best_match<'a, I, F>(query: &str, phrases: I, scorer: F) -> Option<PhraseMatch>
where
    I: IntoIterator<Item = &'a str>,
    F: Fn(&str, &str) -> u8,
{
    let mut best: Option<PhraseMatch> = None;

    for (index, phrase) in phrases.into_iter().enumerate() {
        let score = scorer(query, phrase);
        if best.is_none_or(|b| score > b.score) {
            best = Some(PhraseMatch { index, score });
        }
        if score == 100 {
            break;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_match_empty() {
        assert!(best_match("keto", std::iter::empty(), ratio).is_none());
    }

    #[test]
    fn test_best_match_prefers_earliest_tie() {
        let found = best_match("ab", ["ax", "xb"], ratio).unwrap();
        assert_eq!(found.index, 0);
        assert_eq!(found.score, 50);
    }

    #[test]
    fn test_best_match_picks_highest() {
        let found = best_match("ketto", ["balanced", "keto", "cut"], ratio).unwrap();
        assert_eq!(found.index, 1);
    }
}
