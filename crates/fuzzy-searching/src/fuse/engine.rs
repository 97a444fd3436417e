//! Fuse - the search facade over the Bitap engine

use std::cmp::Ordering;
use std::time::Instant;

use tracing::debug;

use super::bitap;
use super::pattern::Pattern;
use crate::config::{FuseConfig, ObjectSortStrategy};
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::record::{FieldHit, FuseProp, RecordHit, StringHit, StringMatch};

/// Score substituted for a perfect unweighted field on the synchronous record
/// path, so the record still sorts behind nothing but other perfect hits
pub(crate) const PERFECT_FIELD_NUDGE: f64 = 0.001;

/// Approximate string search with location-biased scoring.
///
/// Holds the configuration and the executors used by the chunked variants.
/// By default chunks run on rayon's global pool and completion sinks on a
/// separate single-thread pool; [`Fuse::with_dispatcher`] swaps in a main
/// queue or inline execution. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct Fuse {
    pub(crate) config: FuseConfig,
    pub(crate) dispatcher: Dispatcher,
}

impl Fuse {
    /// Create a Fuse with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom configuration
    pub fn with_config(config: FuseConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            dispatcher: Dispatcher::default(),
        })
    }

    /// Replace the executors used by the chunked and async searches
    pub fn with_dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn config(&self) -> &FuseConfig {
        &self.config
    }

    /// Compile `text` once for reuse across many candidates
    pub fn create_pattern(&self, text: &str) -> Option<Pattern> {
        Pattern::compile(text, self.config.is_case_sensitive)
    }

    /// Search a compiled pattern in one string.
    ///
    /// Returns `None` for an absent pattern or when the string does not match.
    pub fn search(&self, pattern: Option<&Pattern>, candidate: &str) -> Option<StringMatch> {
        bitap::search(pattern?, candidate, &self.config)
    }

    /// Compile `text` and search it in one string
    pub fn search_text(&self, text: &str, candidate: &str) -> Option<StringMatch> {
        self.search(self.create_pattern(text).as_ref(), candidate)
    }

    /// Search `text` in every candidate; matches sorted by ascending score.
    pub fn search_strings<S: AsRef<str>>(&self, text: &str, candidates: &[S]) -> Vec<StringHit> {
        let start = Instant::now();
        let Some(pattern) = self.create_pattern(text) else {
            return Vec::new();
        };

        let mut hits: Vec<StringHit> = candidates
            .iter()
            .enumerate()
            .filter_map(|(index, candidate)| {
                string_hit(&pattern, &self.config, index, candidate.as_ref())
            })
            .collect();
        sort_by_score(&mut hits);

        debug!(
            candidates = candidates.len(),
            hits = hits.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Searched strings"
        );
        hits
    }

    /// Search `text` in the fields `fields` extracts from each record.
    ///
    /// A field scoring a perfect 0.0 with weight 1.0 is counted as 0.001 here
    /// (the chunked path does not do this).
    pub fn search_records<T, F>(&self, text: &str, records: &[T], fields: F) -> Vec<RecordHit>
    where
        F: Fn(&T) -> Vec<FuseProp>,
    {
        let start = Instant::now();
        let Some(pattern) = self.create_pattern(text) else {
            return Vec::new();
        };

        let mut hits: Vec<RecordHit> = records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| {
                record_hit(&pattern, &self.config, index, &fields(record), true)
            })
            .collect();
        sort_by_score(&mut hits);

        debug!(
            records = records.len(),
            hits = hits.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Searched records"
        );
        hits
    }
}

pub(crate) fn string_hit(
    pattern: &Pattern,
    config: &FuseConfig,
    index: usize,
    candidate: &str,
) -> Option<StringHit> {
    bitap::search(pattern, candidate, config).map(|m| StringHit {
        index,
        score: m.score,
        ranges: m.ranges,
    })
}

/// Score one record; `None` when no field matched.
pub(crate) fn record_hit(
    pattern: &Pattern,
    config: &FuseConfig,
    index: usize,
    props: &[FuseProp],
    nudge_perfect: bool,
) -> Option<RecordHit> {
    let mut total = 0.0;
    let mut fields = Vec::new();

    for prop in props {
        let Some(found) = bitap::search(pattern, &prop.value, config) else {
            continue;
        };

        let factor = prop.score_factor();
        let raw = if nudge_perfect && found.score == 0.0 && factor == 1.0 {
            PERFECT_FIELD_NUDGE
        } else {
            found.score
        };
        let score = raw * factor;
        total += score;

        fields.push(FieldHit {
            value: prop.value.clone(),
            score,
            ranges: found.ranges,
        });
    }

    if fields.is_empty() {
        return None;
    }

    let score = match config.object_sort_strategy {
        ObjectSortStrategy::AverageScore => total / fields.len() as f64,
        ObjectSortStrategy::BestScore => fields
            .iter()
            .map(|f| f.score)
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
            .unwrap_or(1.0),
    };

    Some(RecordHit {
        index,
        score,
        fields,
    })
}

/// Hits that can be ranked
pub(crate) trait Ranked {
    fn score(&self) -> f64;
    fn index(&self) -> usize;
}

impl Ranked for StringHit {
    fn score(&self) -> f64 {
        self.score
    }
    fn index(&self) -> usize {
        self.index
    }
}

impl Ranked for RecordHit {
    fn score(&self) -> f64 {
        self.score
    }
    fn index(&self) -> usize {
        self.index
    }
}

/// Ascending score, ties by input index
pub(crate) fn sort_by_score<H: Ranked>(hits: &mut [H]) {
    hits.sort_by(|a, b| {
        a.score()
            .partial_cmp(&b.score())
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.index().cmp(&b.index()))
    });
}
