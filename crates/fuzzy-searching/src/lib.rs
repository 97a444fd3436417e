//! Fuzzy String Search
//!
//! Approximate matching of a short query against strings and multi-field
//! records.
//!
//! # Search modes
//!
//! - [`Fuse`] - Bitap (shift-or) search with a location-biased score in
//!   `[0, 1)`, lower is better, plus matched character ranges
//! - [`align`] - fuzzy alignment with an integer score, higher is better,
//!   and a match/gap segmentation of each candidate
//! - [`levenshtein`] - whole-string ranking by normalized edit distance
//!
//! # Features
//!
//! - `parallel` (default) - chunked search on a rayon worker pool
//!
//! # Example
//!
//! ```rust
//! use fuzzy_searching::{Fuse, FuseConfig, FuseProp};
//!
//! let fuse = Fuse::with_config(FuseConfig::default().with_threshold(0.4)).unwrap();
//!
//! // Single string
//! let found = fuse.search_text("The Silmarillion", "The Silmarillion").unwrap();
//! assert_eq!(found.score, 0.0);
//! assert_eq!(found.ranges, vec![0..=15]);
//!
//! // Records with weighted fields
//! let books = vec![
//!     ("Right Ho Jeeves", "P.D. Woodhouse"),
//!     ("The DaVinci Code", "Dan Brown"),
//! ];
//! let hits = fuse.search_records("jeeves", &books, |(title, author)| {
//!     vec![FuseProp::new(*title), FuseProp::weighted(*author, 0.5)]
//! });
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].index, 0);
//! ```

pub mod align;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod fuse;
pub mod levenshtein;
mod logging;
pub mod record;

// Re-export main types at crate root
pub use align::{align, align_records, align_strings, AlignedRecord, AlignedString, Alignment};
pub use config::{FuseConfig, ObjectSortStrategy};
#[cfg(feature = "parallel")]
pub use dispatch::RayonExecutor;
pub use dispatch::{main_queue, Dispatcher, Executor, Inline, MainLoop, MainQueue};
pub use error::{FuseError, Result};
pub use fuse::{Fuse, Pattern, MAX_PATTERN_LEN};
pub use logging::{init_tracing, init_tracing_with_filter};
pub use record::{FieldHit, FuseProp, MatchRange, RecordHit, Searchable, StringHit, StringMatch};
