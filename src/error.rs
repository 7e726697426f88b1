//! Construction-time error taxonomy for segments, hits and hit lists.
//!
//! Only the three failure kinds that can arise from bad *input* get a variant
//! here. Internal DP inconsistencies are bugs, not errors, and are reported via
//! `debug_assert!`/`unreachable!` at the point they're detected instead.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("invalid segment geometry: {0}")]
    InvalidSegmentGeometry(String),

    #[error("non-positive score {score} (scores must be strictly positive)")]
    NonPositiveScore { score: f32 },

    #[error("hit count {count} exceeds hit-index capacity {capacity}")]
    CapacityExceeded { count: usize, capacity: usize },
}

pub type Result<T> = std::result::Result<T, ResolveError>;
