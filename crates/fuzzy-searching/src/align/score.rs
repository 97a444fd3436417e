//! Scoring table for the aligner

/// Alignment score; larger is better
pub type Score = i32;

/// Points for each matched character
pub const MATCH: Score = 16;

/// Points for aligning two different characters. Mismatched pairs are never
/// emitted as matches, so this only documents the table.
pub const MISMATCH: Score = 0;

/// Bonus for a match at the start of the candidate or of a word
pub const BOUNDARY: Score = MATCH / 2;

/// Bonus for a match on a lower-to-upper case transition
pub const CAMEL_CASE: Score = BOUNDARY - 1;

/// Multiplier on the positional bonus of the first query character
pub const FIRST_CHAR_BONUS_MULTIPLIER: Score = 2;

/// Bonus for a match directly following the previous one
pub const CONSECUTIVE: Score = gap_penalty(8);

/// Cost of skipping `n` candidate characters between two matches
pub const fn gap_penalty(n: usize) -> Score {
    if n == 1 {
        3
    } else {
        n as Score + 3
    }
}

/// Positional bonus of candidate character `j`
pub(crate) fn bonus(candidate: &[char], j: usize) -> Score {
    let current = candidate[j];
    if j == 0 {
        return BOUNDARY;
    }
    let previous = candidate[j - 1];
    if !previous.is_alphanumeric() && current.is_alphanumeric() {
        BOUNDARY
    } else if previous.is_lowercase() && current.is_uppercase() {
        CAMEL_CASE
    } else {
        0
    }
}
