//! Local alignment of a query against one candidate
//!
//! Dynamic programming over `(query char, candidate char)` cells. A cell is
//! scored only when the case-folded characters are equal; it extends either
//! nothing (a fresh start), the match on the previous diagonal (consecutive
//! bonus), an earlier match in the previous column (query characters skipped
//! for free), or an earlier match followed by a run of skipped candidate
//! characters (gap penalty). Leading and trailing candidate text is free.

use super::result::{FuzzyResult, Segment};
use super::score::{self, gap_penalty, Score, CONSECUTIVE, FIRST_CHAR_BONUS_MULTIPLIER, MATCH};
use crate::fuse::fold_char;

/// Extra cost of the second skipped candidate character in a gap
const SECOND_GAP: Score = gap_penalty(2) - gap_penalty(1);

/// Extra cost of each further skipped candidate character
const FURTHER_GAP: Score = gap_penalty(3) - gap_penalty(2);

/// Score and segmentation of a candidate against a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    pub score: Score,
    pub result: FuzzyResult,
}

impl Alignment {
    /// Zero-score alignment with the whole candidate as one gap
    pub fn unmatched(candidate: &str) -> Self {
        Self {
            score: 0,
            result: FuzzyResult::from_segments([Segment::Gap(candidate.chars().collect())]),
        }
    }

    /// Sum the scores and overlay the segmentations
    pub fn combine(&self, other: &Alignment) -> Alignment {
        Alignment {
            score: self.score + other.score,
            result: self.result.merge(&other.result),
        }
    }

    /// The candidate text, reassembled from the segments
    pub fn as_string(&self) -> String {
        self.result.as_string()
    }

    /// Candidate text over a marker row with `*` under matched characters
    pub fn highlight(&self) -> String {
        let markers: String = self.result.segments().iter().map(Segment::as_gaps).collect();
        format!("{}\n{}", self.as_string(), markers)
    }
}

type Cell = (usize, usize);

/// Best reachable score of a DP state and the matched cell its path ends on
#[derive(Debug, Clone, Copy)]
struct State {
    score: Score,
    cell: Cell,
}

fn penalize(state: Option<State>, cost: Score) -> Option<State> {
    state.map(|s| State {
        score: s.score - cost,
        cell: s.cell,
    })
}

/// Higher score wins; ties keep `a`
fn better(a: Option<State>, b: Option<State>) -> Option<State> {
    match (a, b) {
        (Some(x), Some(y)) if y.score > x.score => b,
        (Some(_), _) => a,
        (None, _) => b,
    }
}

/// Align `query` against `candidate`.
///
/// Matching ignores case. The returned segments reconstruct `candidate`
/// exactly; the score is 0 when no query character occurs in it.
pub fn align(query: &str, candidate: &str) -> Alignment {
    let needle: Vec<char> = query.chars().map(fold_char).collect();
    let text: Vec<char> = candidate.chars().collect();
    let folded: Vec<char> = text.iter().copied().map(fold_char).collect();

    let (n, m) = (needle.len(), text.len());
    if n == 0 || m == 0 {
        return Alignment::unmatched(candidate);
    }

    let width = m + 1;
    let at = |i: usize, j: usize| i * width + j;
    let size = (n + 1) * width;

    // Score of query char i matched at candidate char j, and the matched cell
    // it extends
    let mut matched: Vec<Option<Score>> = vec![None; size];
    let mut previous: Vec<Option<Cell>> = vec![None; size];
    // Best match in column j over query rows 1..=i
    let mut reach: Vec<Option<State>> = vec![None; size];
    // Gaps of exactly one, and of two or more, candidate chars ending at j
    let mut gap_one: Vec<Option<State>> = vec![None; size];
    let mut gap_long: Vec<Option<State>> = vec![None; size];
    let mut best: Option<State> = None;

    for i in 1..=n {
        for j in 1..=m {
            let here = at(i, j);
            gap_one[here] = penalize(reach[at(i, j - 1)], gap_penalty(1));
            gap_long[here] = better(
                penalize(gap_one[at(i, j - 1)], SECOND_GAP),
                penalize(gap_long[at(i, j - 1)], FURTHER_GAP),
            );

            if needle[i - 1] == folded[j - 1] {
                let mut bonus = score::bonus(&text, j - 1);
                if i == 1 {
                    bonus *= FIRST_CHAR_BONUS_MULTIPLIER;
                }

                let diagonal = matched[at(i - 1, j - 1)].map(|s| State {
                    score: s + CONSECUTIVE,
                    cell: (i - 1, j - 1),
                });
                let skipped = if i >= 2 { reach[at(i - 2, j - 1)] } else { None };
                let origin = [
                    diagonal,
                    skipped,
                    gap_one[at(i - 1, j - 1)],
                    gap_long[at(i - 1, j - 1)],
                ]
                .into_iter()
                .fold(None, better);

                let (base, link) = match origin {
                    Some(s) if s.score > 0 => (s.score, Some(s.cell)),
                    _ => (0, None),
                };
                matched[here] = Some(MATCH + bonus + base);
                previous[here] = link;
            }

            let current = matched[here].map(|score| State {
                score,
                cell: (i, j),
            });
            reach[here] = better(reach[at(i - 1, j)], current);
            best = better(best, current);
        }
    }

    let Some(best) = best else {
        return Alignment::unmatched(candidate);
    };

    let mut hits = vec![false; m];
    let mut cursor = Some(best.cell);
    while let Some((i, j)) = cursor {
        hits[j - 1] = true;
        cursor = previous[at(i, j)];
    }

    let segments = text.iter().zip(hits).map(|(&c, hit)| {
        if hit {
            Segment::Match(vec![c])
        } else {
            Segment::Gap(vec![c])
        }
    });

    Alignment {
        score: best.score,
        result: FuzzyResult::from_segments(segments),
    }
}
