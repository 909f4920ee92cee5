//! Edit-distance suggestions for misspelled column names and the rule id
//! naming check.

/// Closest candidate by case-insensitive edit distance, or `None` when even
/// the best one differs in more than half its characters.
pub(crate) fn fuzzy_match<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let needle = input.to_lowercase();
    let (best, distance) = candidates
        .iter()
        .map(|&c| (c, levenshtein(&needle, &c.to_lowercase())))
        .min_by_key(|&(_, d)| d)?;

    (distance <= input.len().max(best.len()) / 2).then_some(best)
}

/// Levenshtein distance over chars, one row of state.
pub(crate) fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitute = diagonal + usize::from(ca != cb);
            diagonal = row[j + 1];
            row[j + 1] = substitute.min(row[j] + 1).min(diagonal + 1);
        }
    }
    row[b.len()]
}

/// `^[a-z0-9]+(-[a-z0-9]+)*$`
pub(crate) fn is_kebab_case(s: &str) -> bool {
    s.split('-').all(|part| {
        !part.is_empty()
            && part
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
    })
}
