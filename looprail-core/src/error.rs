//! Guard conditions reported by the controller

use thiserror::Error;

/// Conditions under which the controller declines to act.
///
/// None of these are user-facing failures. Callers log them and carry on; a
/// skipped correction heals itself on the next scroll observation or resize.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ScrollGuard {
    /// The materialized window has no measurable layout yet.
    #[error("segment width is not measurable yet")]
    Unmeasured,
    /// The logical sequence has no items; the controller stays disabled.
    #[error("logical sequence is empty")]
    EmptySequence,
    /// The scroll surface was unmounted or reports itself as detached.
    #[error("scroll surface is detached")]
    DetachedSurface,
    /// The boundary threshold leaves no stable band inside the main segment.
    #[error(
        "threshold {threshold}px must be positive and below the segment \
         width {segment}px"
    )]
    ThresholdOutOfRange {
        /// Configured threshold.
        threshold: f32,
        /// Measured segment width.
        segment: f32,
    },
}

/// Result of a controller operation that may decline to act.
pub type GuardResult<T> = std::result::Result<T, ScrollGuard>;
