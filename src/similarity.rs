//! Character-level similarity between a target sentence and a spoken attempt
//!
//! Both sides are normalized first, then compared with a single-row
//! Levenshtein distance over chars.

use tracing::debug;

use crate::normalize::normalize;

/// Levenshtein distance between the normalized forms of `a` and `b`
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = normalize(a).chars().collect();
    let b: Vec<char> = normalize(b).chars().collect();
    char_distance(&a, &b)
}

/// Single-row edit distance, unit costs for insert, delete and substitute
fn char_distance(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut row: Vec<usize> = (0..=b.len()).collect();

    for i in 1..=a.len() {
        let mut diag = row[0];
        row[0] = i;
        for j in 1..=b.len() {
            let above = row[j];
            row[j] = if a[i - 1] == b[j - 1] {
                diag
            } else {
                1 + diag.min(above).min(row[j - 1])
            };
            diag = above;
        }
    }

    row[b.len()]
}

/// Similarity of the hypothesis to the reference, in `[0, 100]`
///
/// Two texts that both normalize to nothing score 100.
pub fn similarity_percent(reference: &str, hypothesis: &str) -> f64 {
    let a: Vec<char> = normalize(reference).chars().collect();
    let b: Vec<char> = normalize(hypothesis).chars().collect();

    if a.is_empty() && b.is_empty() {
        return 100.0;
    }

    let distance = char_distance(&a, &b);
    let max_len = a.len().max(b.len()).max(1);
    let similarity = 1.0 - distance as f64 / max_len as f64;
    let percent = similarity.clamp(0.0, 1.0) * 100.0;

    debug!(
        "Similarity: distance {} over {} chars -> {:.1}%",
        distance, max_len, percent
    );

    percent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_basic() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
        assert_eq!(levenshtein("same", "same"), 0);
    }

    #[test]
    fn test_levenshtein_empty_sides() {
        assert_eq!(levenshtein("", "hello"), 5);
        assert_eq!(levenshtein("hello", ""), 5);
        assert_eq!(levenshtein("", ""), 0);
    }

    #[test]
    fn test_levenshtein_normalizes_first() {
        assert_eq!(levenshtein("Hello, World!", "hello world"), 0);
    }

    #[test]
    fn test_levenshtein_counts_chars_not_bytes() {
        assert_eq!(levenshtein("café", "cafe"), 1);
    }

    #[test]
    fn test_perfect_match() {
        assert_eq!(similarity_percent("Hello, world!", "hello world"), 100.0);
    }

    #[test]
    fn test_both_empty() {
        assert_eq!(similarity_percent("", ""), 100.0);
        assert_eq!(similarity_percent("?!", "  "), 100.0);
    }

    #[test]
    fn test_one_side_empty() {
        assert_eq!(similarity_percent("hello", ""), 0.0);
        assert_eq!(similarity_percent("", "hello"), 0.0);
    }

    #[test]
    fn test_total_mismatch() {
        let score = similarity_percent("cat", "dog");
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_partial_match() {
        // one substitution over 5 chars
        let score = similarity_percent("hello", "hallo");
        assert!((score - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            ("I like apples", "I liked apple"),
            ("good morning", "morning good"),
            ("", "something"),
        ];
        for (a, b) in pairs {
            assert_eq!(similarity_percent(a, b), similarity_percent(b, a));
        }
    }

    #[test]
    fn test_range() {
        let pairs = [
            ("a", "completely different sentence"),
            ("The quick brown fox", "the quick brown fox jumps"),
            ("x", "x"),
        ];
        for (a, b) in pairs {
            let score = similarity_percent(a, b);
            assert!((0.0..=100.0).contains(&score));
        }
    }
}
