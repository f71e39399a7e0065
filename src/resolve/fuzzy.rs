//! Case-insensitive fuzzy matching of release names

use strsim::normalized_levenshtein;

/// Minimum score (0 to 100) a candidate needs to count as a match
pub const MATCH_THRESHOLD: u8 = 90;

/// Similarity of two names on a 0 to 100 scale
///
/// Both names are lowercased and stripped of punctuation. The score is the
/// better of a plain comparison and one with the words sorted, so that
/// reordered words ("Heaven, Get to") still match.
pub fn similarity(a: &str, b: &str) -> u8 {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let plain = normalized_levenshtein(&a, &b);
    let sorted = normalized_levenshtein(&sort_tokens(&a), &sort_tokens(&b));
    (plain.max(sorted) * 100.0).round() as u8
}

/// Index and score of the best candidate at or above [`MATCH_THRESHOLD`]
///
/// Ties go to the earliest candidate. Returns None rather than a weak guess.
pub fn best_match<S: AsRef<str>>(query: &str, candidates: &[S]) -> Option<(usize, u8)> {
    let mut best: Option<(usize, u8)> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        let score = similarity(query, candidate.as_ref());
        if score < MATCH_THRESHOLD {
            continue;
        }
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((index, score));
        }
    }
    best
}

fn normalize(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

fn sort_tokens(value: &str) -> String {
    let mut tokens: Vec<&str> = value.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}
