//! Searchable records and result types

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Inclusive character range (code point indices) of a match
pub type MatchRange = RangeInclusive<usize>;

/// One searchable field of a record.
///
/// `weight` defaults to `1.0`. Any other weight `w` scales the field score by
/// `1 - w`, so a weight of `0.9` shrinks the field's score (boosting it) far
/// more than `0.1` does, and `1.0` itself is the identity. The discontinuity
/// at `1.0` is kept for parity with existing result orderings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuseProp {
    pub value: String,
    pub weight: f64,
}

impl FuseProp {
    pub fn new(value: impl Into<String>) -> Self {
        Self::weighted(value, 1.0)
    }

    pub fn weighted(value: impl Into<String>, weight: f64) -> Self {
        Self {
            value: value.into(),
            weight,
        }
    }

    /// Multiplier applied to this field's raw score
    pub(crate) fn score_factor(&self) -> f64 {
        if self.weight == 1.0 {
            1.0
        } else {
            1.0 - self.weight
        }
    }
}

/// Types whose fields can be searched.
///
/// `T::properties` doubles as the field extractor taken by the record search
/// functions.
pub trait Searchable {
    fn properties(&self) -> Vec<FuseProp>;
}

/// Result of matching a pattern against one string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringMatch {
    /// 0.0 is an exact match; always below 1.0
    pub score: f64,
    pub ranges: Vec<MatchRange>,
}

/// A matching entry of a string list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringHit {
    pub index: usize,
    pub score: f64,
    pub ranges: Vec<MatchRange>,
}

/// A matching field of a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldHit {
    pub value: String,
    /// Weighted field score
    pub score: f64,
    pub ranges: Vec<MatchRange>,
}

/// A record with at least one matching field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordHit {
    pub index: usize,
    pub score: f64,
    pub fields: Vec<FieldHit>,
}
