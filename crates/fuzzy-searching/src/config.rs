//! Search configuration

use serde::{Deserialize, Serialize};

use crate::error::{FuseError, Result};

/// How a record's per-field scores collapse into one record score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectSortStrategy {
    /// Mean of the matched fields' weighted scores
    #[default]
    AverageScore,
    /// Best (lowest) matched field score
    BestScore,
}

/// Tunable parameters for the Bitap engine and the aggregators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FuseConfig {
    /// Expected offset of the match within the candidate
    pub location: usize,
    /// How far a match may drift from `location` before it is fully penalized
    pub distance: usize,
    /// Initial acceptance cutoff (0.0 = exact only, 1.0 = anything)
    pub threshold: f64,
    pub is_case_sensitive: bool,
    /// Split the pattern on spaces and average per-word results
    pub tokenize: bool,
    /// Items per chunk on the parallel path
    pub chunk_size: usize,
    pub object_sort_strategy: ObjectSortStrategy,
}

impl Default for FuseConfig {
    fn default() -> Self {
        Self {
            location: 0,
            distance: 100,
            threshold: 0.6,
            is_case_sensitive: false,
            tokenize: false,
            chunk_size: 100,
            object_sort_strategy: ObjectSortStrategy::AverageScore,
        }
    }
}

impl FuseConfig {
    /// Parse a JSON configuration; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: FuseConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot honor.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(FuseError::InvalidThreshold(self.threshold));
        }
        if self.chunk_size == 0 {
            return Err(FuseError::InvalidChunkSize);
        }
        Ok(())
    }

    pub fn with_location(mut self, location: usize) -> Self {
        self.location = location;
        self
    }

    pub fn with_distance(mut self, distance: usize) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_case_sensitive(mut self, is_case_sensitive: bool) -> Self {
        self.is_case_sensitive = is_case_sensitive;
        self
    }

    pub fn with_tokenize(mut self, tokenize: bool) -> Self {
        self.tokenize = tokenize;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_object_sort_strategy(mut self, strategy: ObjectSortStrategy) -> Self {
        self.object_sort_strategy = strategy;
        self
    }
}
