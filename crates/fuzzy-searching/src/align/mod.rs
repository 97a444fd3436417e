//! Fuzzy Alignment
//!
//! A second search mode next to the Bitap engine. Instead of a dissimilarity
//! score it produces an integer quality score (larger is better) and a
//! segmentation of each candidate into matched and skipped runs, suitable for
//! highlighting.
//!
//! Scoring rewards matches at word starts and camel-case humps, and runs of
//! consecutive matches; skipped candidate characters between matches cost a
//! gap penalty.
//!
//! ```rust
//! use fuzzy_searching::align::align_strings;
//!
//! let titles = ["Priestess of the Phoenix", "Fairy Tail: The Phoenix Priestess"];
//! let ranked = align_strings("Fairy Tail: The Phoenix Priestess", &titles);
//! assert_eq!(ranked[0].as_string(), "Fairy Tail: The Phoenix Priestess");
//! ```

mod alignment;
mod result;
pub mod score;

use std::cmp::Ordering;
use std::time::Instant;

use tracing::debug;

pub use alignment::{align, Alignment};
pub use result::{FuzzyResult, Segment};
pub use score::Score;

use crate::config::ObjectSortStrategy;
use crate::record::FuseProp;

/// Alignment of one entry of a string list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedString {
    pub index: usize,
    pub alignment: Alignment,
}

impl AlignedString {
    pub fn as_string(&self) -> String {
        self.alignment.as_string()
    }
}

/// Alignment of one field of a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedField {
    pub value: String,
    pub alignment: Alignment,
}

/// A record ranked by the alignments of its fields
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedRecord {
    pub index: usize,
    /// Mean or best field score, per [`ObjectSortStrategy`]
    pub score: f64,
    pub fields: Vec<AlignedField>,
}

/// Align `query` against every candidate, best first.
///
/// Every candidate is returned; equal scores keep input order.
pub fn align_strings<S: AsRef<str>>(query: &str, candidates: &[S]) -> Vec<AlignedString> {
    let start = Instant::now();

    let mut aligned: Vec<AlignedString> = candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| AlignedString {
            index,
            alignment: align(query, candidate.as_ref()),
        })
        .collect();
    aligned.sort_by(|a, b| b.alignment.score.cmp(&a.alignment.score));

    debug!(
        candidates = candidates.len(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "Aligned strings"
    );
    aligned
}

/// Align `query` against the fields of every record, best first.
///
/// Field weights do not apply here. Records without fields are skipped.
pub fn align_records<T, F>(
    query: &str,
    records: &[T],
    fields: F,
    strategy: ObjectSortStrategy,
) -> Vec<AlignedRecord>
where
    F: Fn(&T) -> Vec<FuseProp>,
{
    let start = Instant::now();

    let mut aligned: Vec<AlignedRecord> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let hits: Vec<AlignedField> = fields(record)
                .into_iter()
                .map(|prop| AlignedField {
                    alignment: align(query, &prop.value),
                    value: prop.value,
                })
                .collect();
            if hits.is_empty() {
                return None;
            }

            let scores = hits.iter().map(|f| f.alignment.score);
            let score = match strategy {
                ObjectSortStrategy::AverageScore => {
                    scores.map(f64::from).sum::<f64>() / hits.len() as f64
                }
                ObjectSortStrategy::BestScore => f64::from(scores.max().unwrap_or(0)),
            };

            Some(AlignedRecord {
                index,
                score,
                fields: hits,
            })
        })
        .collect();
    aligned.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    debug!(
        records = records.len(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "Aligned records"
    );
    aligned
}
