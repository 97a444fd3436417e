//! Bitap (shift-or) approximate matching over a single string
//!
//! Each error level `k` keeps a bit-parallel state per candidate position:
//! bit `b` of `state[j]` says the pattern suffix of length `L - b` matches the
//! candidate starting at `j - 1` with at most `k` edits. Scanning runs right to
//! left, so a set top bit reports a full match starting at the current
//! position. The window scanned at each level is bounded by binary-searching
//! how far from `location` a match could still beat the running threshold.

use tracing::trace;

use super::pattern::{fold_case, Pattern};
use super::score::{coalesce_ranges, compute_score, find_ranges};
use crate::config::FuseConfig;
use crate::record::{MatchRange, StringMatch};

/// Score reported when the engine found nothing
const NO_MATCH: f64 = 1.0;

/// Match `pattern` against `candidate`, returning `None` when it does not match.
///
/// The candidate is case-folded unless the configuration is case sensitive;
/// range indices count code points of the candidate.
pub fn search(pattern: &Pattern, candidate: &str, config: &FuseConfig) -> Option<StringMatch> {
    let text: Vec<char> = if config.is_case_sensitive {
        candidate.chars().collect()
    } else {
        fold_case(candidate)
    };

    if config.tokenize {
        return search_tokenized(pattern, &text, config);
    }

    let (score, ranges) = bitap(pattern, &text, config);
    if score >= NO_MATCH {
        return None;
    }
    Some(StringMatch { score, ranges })
}

/// Average the full-pattern result with one result per space-separated word.
fn search_tokenized(pattern: &Pattern, text: &[char], config: &FuseConfig) -> Option<StringMatch> {
    let words: Vec<Pattern> = pattern
        .text()
        .split(' ')
        .filter_map(|word| Pattern::compile(word, config.is_case_sensitive))
        .collect();

    let (mut total, mut ranges) = bitap(pattern, text, config);
    for word in &words {
        let (score, word_ranges) = bitap(word, text, config);
        total += score;
        ranges.extend(word_ranges);
    }

    let score = total / (words.len() + 1) as f64;
    if score >= NO_MATCH {
        return None;
    }

    Some(StringMatch {
        score,
        ranges: coalesce_ranges(ranges),
    })
}

/// Core search. Returns the best accepted score (or 1.0) and the ranges of
/// candidate characters that occur in the pattern within the scanned windows.
fn bitap(pattern: &Pattern, text: &[char], config: &FuseConfig) -> (f64, Vec<MatchRange>) {
    let pattern_len = pattern.len();
    let text_len = text.len();

    if pattern.chars() == text {
        return (0.0, vec![0..=text_len - 1]);
    }

    let location = config.location;
    let distance = config.distance;
    let score_at =
        |errors: usize, at: usize| compute_score(pattern_len, errors, location, at, distance);

    // Literal occurrences near the expected location bound the threshold early
    let mut threshold = config.threshold;
    if let Some(first) = find_forward(text, pattern.chars(), location) {
        threshold = threshold.min(score_at(0, first));
        let end = location.saturating_add(pattern_len);
        if let Some(last) = find_backward(text, pattern.chars(), end) {
            threshold = threshold.min(score_at(0, last));
        }
    }

    let mut match_mask = vec![false; text_len];
    let mut score = NO_MATCH;
    let mut best_location = None;
    let mut bin_max = pattern_len + text_len;
    let mut bits: Vec<u64> = Vec::new();
    let mut last_bits: Vec<u64> = Vec::new();

    for errors in 0..pattern_len {
        // Largest drift from `location` that could still beat the threshold
        let mut bin_min = 0;
        let mut bin_mid = bin_max;
        while bin_min < bin_mid {
            if score_at(errors, location.saturating_add(bin_mid)) <= threshold {
                bin_min = bin_mid;
            } else {
                bin_max = bin_mid;
            }
            bin_mid = (bin_max - bin_min) / 2 + bin_min;
        }
        bin_max = bin_mid;

        // Locations past the end of the candidate saturate instead of wrapping
        let mut start = location.saturating_add(1).saturating_sub(bin_mid).max(1);
        let finish = location.saturating_add(bin_mid).min(text_len) + pattern_len;

        bits.clear();
        bits.resize(finish + 2, 0);
        // errors < 64, so the shift cannot overflow
        bits[finish + 1] = (1u64 << errors) - 1;

        if start > finish {
            continue;
        }

        let mut j = finish;
        while j >= start {
            let loc = j - 1;
            let char_match = if loc < text_len {
                pattern.char_mask(text[loc])
            } else {
                0
            };

            if char_match != 0 {
                match_mask[loc] = true;
            }

            let mut state = ((bits[j + 1] << 1) | 1) & char_match;
            if errors > 0 {
                let prev_next = last_bits.get(j + 1).copied().unwrap_or(0);
                let prev = last_bits.get(j).copied().unwrap_or(0);
                state |= ((prev_next | prev) << 1) | 1 | prev_next;
            }
            bits[j] = state;

            if state & pattern.mask() != 0 {
                let candidate = score_at(errors, loc);
                if candidate <= threshold {
                    threshold = candidate;
                    score = candidate;
                    best_location = Some(loc);

                    if loc > location {
                        // Don't stray further left than we already are to the right
                        start = location.saturating_mul(2).saturating_sub(loc).max(1);
                    } else {
                        break;
                    }
                }
            }

            j -= 1;
        }

        // No better match is possible with more errors
        if score_at(errors + 1, location) > threshold {
            break;
        }

        std::mem::swap(&mut bits, &mut last_bits);
    }

    trace!(
        pattern = pattern.text(),
        score,
        best_location = ?best_location,
        "Bitap search finished"
    );

    (score, find_ranges(&match_mask))
}

/// First occurrence of `needle` starting at or after `from`
fn find_forward(text: &[char], needle: &[char], from: usize) -> Option<usize> {
    if from > text.len() {
        return None;
    }
    text[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|offset| offset + from)
}

/// Last occurrence of `needle` lying inside `text[..min(position, len) + needle.len()]`
fn find_backward(text: &[char], needle: &[char], position: usize) -> Option<usize> {
    let start = position.min(text.len());
    let upper = (start + needle.len()).min(text.len());
    text[..upper]
        .windows(needle.len())
        .rposition(|window| window == needle)
}
