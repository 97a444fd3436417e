//! Edit-distance ranking
//!
//! Ranks whole strings by normalized Levenshtein distance to the query,
//! ignoring case. Unlike the Bitap search nothing is filtered out: every
//! candidate comes back with a `diff_score` in `[0, 1]`, 0.0 for identical
//! text and 1.0 for nothing in common.

use std::cmp::Ordering;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use strsim::normalized_levenshtein;
use tracing::debug;

use crate::fuse::fold_case;
use crate::record::FuseProp;

/// Ranked entry of a string list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevenshteinHit {
    pub index: usize,
    pub diff_score: f64,
}

/// Ranked record; `diff_score` is its closest field's
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevenshteinRecord {
    pub index: usize,
    pub diff_score: f64,
    /// Value of the closest field
    pub value: String,
}

/// `1 - normalized_levenshtein` over case-folded text
pub fn diff_score(query: &str, candidate: &str) -> f64 {
    let query: String = fold_case(query).into_iter().collect();
    let candidate: String = fold_case(candidate).into_iter().collect();
    1.0 - normalized_levenshtein(&query, &candidate)
}

/// Rank every candidate by its distance to `query`, closest first
pub fn search_strings<S: AsRef<str>>(query: &str, candidates: &[S]) -> Vec<LevenshteinHit> {
    let start = Instant::now();

    let mut hits: Vec<LevenshteinHit> = candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| LevenshteinHit {
            index,
            diff_score: diff_score(query, candidate.as_ref()),
        })
        .collect();
    hits.sort_by(|a, b| ascending(a.diff_score, b.diff_score));

    debug!(
        candidates = candidates.len(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "Ranked strings by edit distance"
    );
    hits
}

/// Rank every record by its closest field, closest first.
///
/// Field weights do not apply here. Records without fields are skipped.
pub fn search_records<T, F>(query: &str, records: &[T], fields: F) -> Vec<LevenshteinRecord>
where
    F: Fn(&T) -> Vec<FuseProp>,
{
    let start = Instant::now();

    let mut hits: Vec<LevenshteinRecord> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            fields(record)
                .into_iter()
                .map(|prop| (diff_score(query, &prop.value), prop.value))
                .min_by(|a, b| ascending(a.0, b.0))
                .map(|(diff_score, value)| LevenshteinRecord {
                    index,
                    diff_score,
                    value,
                })
        })
        .collect();
    hits.sort_by(|a, b| ascending(a.diff_score, b.diff_score));

    debug!(
        records = records.len(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "Ranked records by edit distance"
    );
    hits
}

fn ascending(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
