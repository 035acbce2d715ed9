//! Typo suggestion for `unknown-column` diagnostics.
//!
//! Damerau–Levenshtein edit distance (insert, delete, substitute, and
//! adjacent transposition) over the known column names of the fact at the
//! access site, per spec §4.5 item 3.

/// Maximum edit distance for a suggestion to be offered. Anything further
/// is more likely a genuinely different column than a typo.
const MAX_DISTANCE: usize = 2;

fn damerau_levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (la, lb) = (a.len(), b.len());

    let mut d = vec![vec![0usize; lb + 1]; la + 1];
    for i in 0..=la {
        d[i][0] = i;
    }
    for j in 0..=lb {
        d[0][j] = j;
    }

    for i in 1..=la {
        for j in 1..=lb {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            d[i][j] = (d[i - 1][j] + 1)
                .min(d[i][j - 1] + 1)
                .min(d[i - 1][j - 1] + cost);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                d[i][j] = d[i][j].min(d[i - 2][j - 2] + cost);
            }
        }
    }
    d[la][lb]
}

/// Find the closest candidate to `target` among `known`, if within
/// [`MAX_DISTANCE`]. Ties break on the candidate that sorts first
/// lexicographically, for deterministic output.
pub fn suggest<'a>(target: &str, known: &'a [String]) -> Option<&'a str> {
    known
        .iter()
        .map(|c| (damerau_levenshtein(target, c), c.as_str()))
        .filter(|(dist, _)| *dist <= MAX_DISTANCE && *dist > 0)
        .min_by(|(d1, c1), (d2, c2)| d1.cmp(d2).then(c1.cmp(c2)))
        .map(|(_, c)| c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_typo_is_suggested() {
        let known = vec!["user_id".to_string(), "email".to_string()];
        assert_eq!(suggest("usr_id", &known), Some("user_id"));
    }

    #[test]
    fn transposition_counts_as_distance_one() {
        assert_eq!(damerau_levenshtein("ab", "ba"), 1);
    }

    #[test]
    fn far_away_name_yields_no_suggestion() {
        let known = vec!["user_id".to_string()];
        assert_eq!(suggest("completely_different", &known), None);
    }

    #[test]
    fn identical_name_is_not_suggested() {
        let known = vec!["user_id".to_string()];
        assert_eq!(suggest("user_id", &known), None);
    }

    #[test]
    fn ties_break_lexicographically() {
        let known = vec!["ba".to_string(), "aa".to_string()];
        assert_eq!(suggest("ab", &known), Some("aa"));
    }
}
