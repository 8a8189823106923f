//! Edit-distance similarity metrics.
//!
//! All ratios take already-normalized input (see [`crate::normalize`]) and
//! return an integer similarity in `0..=100`.

use std::collections::BTreeSet;

/// Calculate Levenshtein edit distance between two strings.
///
/// # Arguments
/// * `a` - First string
/// * `b` - Second string
///
/// # Returns
/// Number of single-character edits needed to transform a into b
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 { return n; }
    if n == 0 { return m; }

    // Use two rows for space optimization
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Similarity of two strings from their edit distance.
///
/// Computed as `1 - distance / longest_length`, scaled to 0-100 and rounded.
/// Two empty strings are identical (100); one empty string against a
/// non-empty one scores 0.
pub fn ratio(a: &str, b: &str) -> u8 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 100;
    }

    let distance = levenshtein_distance(a, b);
    scale(1.0 - distance as f64 / longest as f64)
}

/// [`ratio`] after sorting the whitespace-separated tokens of both inputs.
///
/// Word order is ignored, so `"gain muscle"` and `"muscle gain"` score 100.
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Similarity over token sets.
///
/// Splits both inputs into the shared tokens and the leftovers of each side
/// and returns the best pairwise [`ratio`] of `shared`, `shared + left` and
/// `shared + right`. When every token of one input appears in the other the
/// score is 100, which makes this metric suited to phrases embedded in a
/// longer sentence.
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    let a_tokens: BTreeSet<&str> = a.split_whitespace().collect();
    let b_tokens: BTreeSet<&str> = b.split_whitespace().collect();

    let shared = join(a_tokens.intersection(&b_tokens).copied());
    let only_a = join(a_tokens.difference(&b_tokens).copied());
    let only_b = join(b_tokens.difference(&a_tokens).copied());

    let with_a = concat(&shared, &only_a);
    let with_b = concat(&shared, &only_b);

    if shared.is_empty() {
        return ratio(&with_a, &with_b);
    }

    ratio(&shared, &with_a)
        .max(ratio(&shared, &with_b))
        .max(ratio(&with_a, &with_b))
}

fn scale(similarity: f64) -> u8 {
    (similarity.clamp(0.0, 1.0) * 100.0).round() as u8
}

fn sorted_tokens(text: &str) -> String {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn join<'a>(tokens: impl Iterator<Item = &'a str>) -> String {
    tokens.collect::<Vec<_>>().join(" ")
}

fn concat(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => head.to_string(),
        _ => format!("{head} {tail}"),
    }
}
