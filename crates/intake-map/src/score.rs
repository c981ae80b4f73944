//! Similarity scoring on a 0-100 scale.

use rapidfuzz::distance::indel;

/// Character-level similarity of two strings, 0-100.
///
/// Indel-normalized similarity scaled to a percentage and rounded half to
/// even. Either side empty scores 0.
pub fn ratio(a: &str, b: &str) -> u8 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let similarity = indel::normalized_similarity(a.chars(), b.chars());
    (similarity * 100.0).round_ties_even().clamp(0.0, 100.0) as u8
}

/// Similarity after sorting the words of each side, 0-100.
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Best of [`ratio`] and [`token_sort_ratio`].
pub fn score(header: &str, alias: &str) -> u8 {
    ratio(header, alias).max(token_sort_ratio(header, alias))
}

/// Lowercase, keep ASCII word characters, split, sort, rejoin.
fn sorted_tokens(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(char::is_ascii)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect();
    let mut tokens: Vec<&str> = cleaned.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_100() {
        assert_eq!(ratio("qty", "qty"), 100);
        assert_eq!(score("lot id", "lot id"), 100);
    }

    #[test]
    fn empty_scores_zero() {
        assert_eq!(ratio("", "qty"), 0);
        assert_eq!(ratio("", ""), 0);
        assert_eq!(token_sort_ratio("!!", "qty"), 0);
    }

    #[test]
    fn token_order_is_ignored() {
        assert_eq!(token_sort_ratio("date invoice", "invoice date"), 100);
        assert!(ratio("date invoice", "invoice date") < 100);
        assert_eq!(score("date invoice", "invoice date"), 100);
    }

    #[test]
    fn punctuation_splits_tokens() {
        assert_eq!(sorted_tokens("Lot-ID / Batch"), "batch id lot");
        assert_eq!(sorted_tokens("lot_id"), "lot_id");
        assert_eq!(sorted_tokens("Café"), "caf");
    }

    #[test]
    fn threshold_boundary_strings() {
        // 2 * 3 / 10 and 2 * 5 / 17
        assert_eq!(ratio("abc", "abcdefg"), 60);
        assert_eq!(ratio("abcde", "abcdefghijkl"), 59);
    }
}
