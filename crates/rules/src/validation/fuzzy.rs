//! Fuzzy string matching for "did you mean" suggestions.

/// Find the closest candidate by edit distance. Returns None when the best
/// candidate is more than half the longer string away.
pub(crate) fn fuzzy_match<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let input_lower = input.to_lowercase();

    let (name, dist) = candidates
        .iter()
        .map(|&c| (c, levenshtein(&input_lower, &c.to_lowercase())))
        .min_by_key(|&(_, d)| d)?;

    let max_len = input.len().max(name.len());
    (dist <= max_len / 2).then_some(name)
}

/// Levenshtein edit distance between two strings.
pub(crate) fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diag = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            let substitution = diag + usize::from(ca != *cb);
            row[j + 1] = (above + 1).min(row[j] + 1).min(substitution);
            diag = above;
        }
    }

    row[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use netcheck_core::DeviceField;

    const RULE_TYPES: &[&str] = &["tag", "interface", "ip_range", "allowed_values", "required_fields"];

    #[test]
    fn levenshtein_basic() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("rack", "rack"), 0);
    }

    #[test]
    fn fuzzy_match_finds_close() {
        assert_eq!(fuzzy_match("ip-range", RULE_TYPES), Some("ip_range"));
        assert_eq!(fuzzy_match("Interfaces", RULE_TYPES), Some("interface"));
        assert_eq!(fuzzy_match("primary_ip6", DeviceField::NAMES), Some("primary_ip4"));
    }

    #[test]
    fn fuzzy_match_rejects_distant() {
        assert_eq!(fuzzy_match("zzzzzzzzzzzzz", RULE_TYPES), None);
        assert_eq!(fuzzy_match("anything", &[]), None);
    }
}
