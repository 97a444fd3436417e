//! Bitap Fuzzy Search
//!
//! Approximate matching of a short pattern against strings and multi-field
//! records, scored in `[0, 1)` where 0.0 is an exact match.
//!
//! - The score combines the edit ratio with how far the match landed from
//!   the expected `location`, scaled by `distance`
//! - Each error level only scans the window in which a match could still
//!   beat the running threshold
//! - Matched character runs are reported as inclusive code point ranges
//!
//! # Example
//!
//! ```rust
//! use fuzzy_searching::fuse::Fuse;
//!
//! let fuse = Fuse::new();
//! let books = ["Right Ho Jeeves", "Thank You Jeeves", "The DaVinci Code"];
//!
//! let hits = fuse.search_strings("jeeves", &books);
//! assert_eq!(hits.len(), 2);
//! assert_eq!(hits[0].index, 0);
//! ```

mod bitap;
mod engine;
mod parallel;
mod pattern;
mod score;

pub use engine::Fuse;
pub(crate) use pattern::{fold_case, fold_char};
pub use pattern::{Pattern, MAX_PATTERN_LEN};
pub use score::{compute_score, find_ranges};
