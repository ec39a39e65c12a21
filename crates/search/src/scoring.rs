//! Tiered relevance scoring for palette candidates.
//!
//! Tiers, first match wins: empty query, exact, prefix, substring, subsequence.
//! Each tier's base is far enough above the next that realistic candidates
//! never cross tiers; within a tier shorter candidates and earlier matches win.

pub const EXACT_SCORE: f64 = 1000.0;
pub const PREFIX_BASE: f64 = 800.0;
pub const SUBSTRING_BASE: f64 = 600.0;
pub const SUBSEQUENCE_BASE: f64 = 400.0;

/// Trim and lowercase a raw query
#[must_use]
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Score a raw query against one candidate string.
///
/// Returns `None` when the candidate does not match at all.
#[must_use]
pub fn score_candidate(query: &str, candidate: &str) -> Option<f64> {
    score_normalized(&normalize_query(query), &candidate.to_lowercase())
}

/// Best score of a query across several candidates (title plus keywords).
///
/// `None` only when every candidate misses.
#[must_use]
pub fn score_candidates<'a>(
    query: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Option<f64> {
    let query = normalize_query(query);
    candidates
        .into_iter()
        .filter_map(|candidate| score_normalized(&query, &candidate.to_lowercase()))
        .fold(None, |best: Option<f64>, score| {
            Some(best.map_or(score, |best| best.max(score)))
        })
}

fn score_normalized(query: &str, candidate: &str) -> Option<f64> {
    if query.is_empty() {
        return Some(0.0);
    }

    if candidate == query {
        return Some(EXACT_SCORE);
    }

    if candidate.starts_with(query) {
        return Some(PREFIX_BASE - candidate.chars().count() as f64);
    }

    if let Some(byte_idx) = candidate.find(query) {
        let char_idx = candidate[..byte_idx].chars().count();
        return Some(SUBSTRING_BASE - char_idx as f64);
    }

    subsequence_penalty(query, candidate)
        .map(|penalty| (SUBSEQUENCE_BASE - penalty as f64).max(0.0))
}

/// Greedy left-to-right subsequence match, no backtracking.
///
/// The penalty is the number of candidate chars skipped between consecutive
/// matched query chars (and before the first one).
fn subsequence_penalty(query: &str, candidate: &str) -> Option<usize> {
    let haystack: Vec<char> = candidate.chars().collect();
    let mut cursor = 0;
    let mut penalty = 0;

    for needle in query.chars() {
        let offset = haystack.get(cursor..)?.iter().position(|&c| c == needle)?;
        penalty += offset;
        cursor += offset + 1;
    }

    Some(penalty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn tiers_are_strictly_ordered() {
        let exact = score_candidate("ab", "ab").unwrap();
        let prefix = score_candidate("ab", "abc").unwrap();
        let substring = score_candidate("ab", "xaby").unwrap();
        let subsequence = score_candidate("ab", "a_b_c").unwrap();

        assert_eq!(exact, 1000.0);
        assert_eq!(prefix, 797.0);
        assert_eq!(substring, 599.0);
        assert_eq!(subsequence, 399.0);
        assert!(exact > prefix && prefix > substring && substring > subsequence);
    }

    #[test]
    fn order_violation_is_no_match() {
        assert_eq!(score_candidate("cba", "abc"), None);
        assert_eq!(score_candidate("xyz", "help"), None);
    }

    #[test]
    fn empty_query_matches_everything_with_zero() {
        assert_eq!(score_candidate("", "Anything"), Some(0.0));
        assert_eq!(score_candidate("   ", "Zebra"), Some(0.0));
    }

    #[test]
    fn matching_is_case_insensitive_and_trimmed() {
        assert_eq!(score_candidate("  Create Issue ", "create issue"), Some(EXACT_SCORE));
        assert_eq!(score_candidate("CRE", "Create issue"), Some(800.0 - 12.0));
    }

    #[test]
    fn shorter_prefix_match_wins() {
        let short = score_candidate("set", "settings").unwrap();
        let long = score_candidate("set", "set status of issue").unwrap();
        assert!(short > long);
    }

    #[test]
    fn earlier_substring_wins() {
        let early = score_candidate("team", "a team").unwrap();
        let late = score_candidate("team", "switch team").unwrap();
        assert!(early > late);
    }

    #[test]
    fn subsequence_penalty_counts_gaps() {
        // g@0, t@3 skips 2, i@6 skips 2
        assert_eq!(score_candidate("gti", "go to issues"), Some(400.0 - 4.0));
    }

    #[test]
    fn subsequence_is_greedy_without_backtracking() {
        // Greedy takes the first 'a' and then needs 'b' after it.
        assert_eq!(score_candidate("ab", "a__b"), Some(400.0 - 2.0));
        assert_eq!(score_candidate("ba", "ab"), None);
    }

    #[test]
    fn subsequence_score_floors_at_zero() {
        let candidate = format!("a{}b", "_".repeat(500));
        assert_eq!(score_candidate("ab", &candidate), Some(0.0));
    }

    #[test]
    fn substring_index_counts_chars_not_bytes() {
        assert_eq!(score_candidate("ab", "ééab"), Some(600.0 - 2.0));
    }

    #[test]
    fn best_candidate_wins() {
        let score = score_candidates("new", ["Create issue", "new", "add"]);
        assert_eq!(score, Some(EXACT_SCORE));

        let none = score_candidates("zzz", ["Create issue", "new"]);
        assert_eq!(none, None);

        let empty = score_candidates("", ["Create issue"]);
        assert_eq!(empty, Some(0.0));
    }

    proptest! {
        #[test]
        fn tier_ordering_holds(
            query in "[a-z]{2,8}",
            tail in "[0-9]{1,20}",
            head in "[0-9]{1,20}",
        ) {
            let exact = score_candidate(&query, &query).unwrap();
            let prefix = score_candidate(&query, &format!("{query}{tail}")).unwrap();
            let substring = score_candidate(&query, &format!("{head}{query}")).unwrap();

            let spread: String = query
                .chars()
                .flat_map(|c| [c, '_'])
                .collect();
            let subsequence = score_candidate(&query, &spread).unwrap();

            prop_assert!(exact > prefix);
            prop_assert!(prefix > substring);
            prop_assert!(substring > subsequence);
        }

        #[test]
        fn scores_are_case_insensitive(query in "[a-zA-Z]{1,6}", candidate in "[a-zA-Z_]{0,16}") {
            prop_assert_eq!(
                score_candidate(&query, &candidate),
                score_candidate(&query.to_uppercase(), &candidate.to_lowercase())
            );
        }
    }
}
