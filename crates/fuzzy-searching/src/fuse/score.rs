//! Scoring and match-range helpers shared by the Bitap engine

use crate::record::MatchRange;

/// Location-biased score of a match.
///
/// Combines the error ratio with how far the match landed from where it was
/// expected. 0.0 is perfect; the value is unbounded above.
#[inline]
pub fn compute_score(
    pattern_len: usize,
    errors: usize,
    match_location: usize,
    expected_location: usize,
    distance: usize,
) -> f64 {
    let accuracy = errors as f64 / pattern_len as f64;
    let proximity = match_location.abs_diff(expected_location);

    if distance == 0 {
        return if proximity != 0 { 1.0 } else { accuracy };
    }

    accuracy + proximity as f64 / distance as f64
}

/// Collapse a 0/1 match mask into maximal inclusive runs of set entries.
pub fn find_ranges(mask: &[bool]) -> Vec<MatchRange> {
    let mut ranges = Vec::new();
    let mut run_start: Option<usize> = None;

    for (i, &hit) in mask.iter().enumerate() {
        match (hit, run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(start)) => {
                ranges.push(start..=i - 1);
                run_start = None;
            }
            _ => {}
        }
    }

    if let Some(start) = run_start {
        ranges.push(start..=mask.len() - 1);
    }

    ranges
}

/// Sort ranges and fuse the ones that overlap or touch.
pub(crate) fn coalesce_ranges(mut ranges: Vec<MatchRange>) -> Vec<MatchRange> {
    ranges.sort_by_key(|r| (*r.start(), *r.end()));

    let mut merged: Vec<MatchRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        if let Some(last) = merged.last_mut() {
            if *range.start() <= last.end() + 1 {
                if range.end() > last.end() {
                    *last = *last.start()..=*range.end();
                }
                continue;
            }
        }
        merged.push(range);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_score_exact_at_location() {
        assert_eq!(compute_score(4, 0, 0, 0, 100), 0.0);
    }

    #[test]
    fn test_score_accuracy_and_proximity() {
        let score = compute_score(4, 1, 0, 12, 100);
        assert!((score - 0.37).abs() < 1e-12);
    }

    #[test]
    fn test_score_symmetric_in_locations() {
        assert_eq!(compute_score(5, 2, 10, 3, 50), compute_score(5, 2, 3, 10, 50));
    }

    #[test]
    fn test_score_zero_distance() {
        assert_eq!(compute_score(4, 1, 0, 3, 0), 1.0);
        assert_eq!(compute_score(4, 1, 3, 3, 0), 0.25);
    }

    #[test]
    fn test_find_ranges_empty() {
        assert!(find_ranges(&[]).is_empty());
    }

    #[test]
    fn test_find_ranges_runs() {
        let mask = [true, true, false, false, true, false, true, true, true];
        assert_eq!(find_ranges(&mask), vec![0..=1, 4..=4, 6..=8]);
    }

    #[test]
    fn test_find_ranges_all_clear() {
        assert!(find_ranges(&[false, false, false]).is_empty());
    }

    #[test]
    fn test_find_ranges_single_trailing() {
        assert_eq!(find_ranges(&[false, false, true]), vec![2..=2]);
    }

    #[test]
    fn test_coalesce_overlap_and_adjacent() {
        let ranges = vec![6..=9, 0..=2, 2..=4, 5..=5, 12..=13];
        assert_eq!(coalesce_ranges(ranges), vec![0..=9, 12..=13]);
    }

    #[test]
    fn test_coalesce_duplicates() {
        assert_eq!(coalesce_ranges(vec![3..=4, 3..=4]), vec![3..=4]);
    }
}
