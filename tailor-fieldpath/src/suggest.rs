//! Typo suggestions for mistyped property names.

/// Suggestions stay within this edit distance of the typo.
pub(crate) const MAX_SUGGESTION_DISTANCE: usize = 2;

/// Classic two-row Levenshtein distance over chars.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// Candidate property names close to `typo`, nearest first, ties
/// alphabetical. An exact match is not a suggestion.
pub(crate) fn suggestions_for<'a>(
    typo: &str,
    candidates: impl Iterator<Item = &'a str>,
) -> Vec<String> {
    let mut scored: Vec<(usize, &str)> = candidates
        .filter_map(|candidate| {
            let distance = levenshtein(typo, candidate);
            (distance > 0 && distance <= MAX_SUGGESTION_DISTANCE).then_some((distance, candidate))
        })
        .collect();
    scored.sort();
    scored.into_iter().map(|(_, name)| name.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_basics() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("email", ""), 5);
        assert_eq!(levenshtein("email", "email"), 0);
        assert_eq!(levenshtein("emial", "email"), 2);
        assert_eq!(levenshtein("sumary", "summary"), 1);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
    }

    #[test]
    fn suggestions_rank_nearest_first() {
        let fields = ["email", "emails", "phone", "name"];
        let suggestions = suggestions_for("emial", fields.iter().copied());
        assert_eq!(suggestions, vec!["email".to_string(), "emails".to_string()]);
    }

    #[test]
    fn far_candidates_are_dropped() {
        let suggestions = suggestions_for("xyz", ["experiences", "education"].iter().copied());
        assert!(suggestions.is_empty());
    }
}
