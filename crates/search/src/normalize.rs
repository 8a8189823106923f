//! Text normalization.

use unicode_segmentation::UnicodeSegmentation;

/// Normalize free text for matching.
///
/// Lowercases, treats `_` and `-` as word separators, drops punctuation and
/// collapses whitespace to single spaces. Input made only of punctuation
/// normalizes to an empty string.
///
/// # Example
/// ```
/// use mealfinder_search::normalize;
///
/// assert_eq!(normalize("  Muscle_Gain!! "), "muscle gain");
/// ```
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase().replace(['_', '-'], " ");
    tokens(&lowered).join(" ")
}

/// Split text into Unicode words, dropping punctuation and whitespace.
pub fn tokens(text: &str) -> Vec<&str> {
    text.unicode_words().collect()
}

/// Case-insensitive substring check.
///
/// A blank `needle` never matches.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    if needle.is_empty() {
        return false;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize("  Lean Bulk  "), "lean bulk");
    }

    #[test]
    fn test_normalize_separators() {
        assert_eq!(normalize("weight_loss"), "weight loss");
        assert_eq!(normalize("low-carb"), "low carb");
    }

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(normalize("keto!!!"), "keto");
        assert_eq!(normalize("bulk, please."), "bulk please");
        assert_eq!(normalize("?!"), "");
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Thai PEANUT sauce", "peanut"));
        assert!(!contains_ignore_case("grilled salmon", "peanut"));
        assert!(!contains_ignore_case("anything", "   "));
    }
}
