//! Segment geometry of the triplicated strip
//!
//! The materialized window holds three identical copies of the sequence (lead,
//! main, trail). Everything the controller decides is expressed relative to
//! the width of one copy, `S = total_extent / 3`.

use std::ops::RangeInclusive;

use crate::error::{GuardResult, ScrollGuard};

/// Number of copies of the logical sequence in the materialized window.
pub const SEGMENT_COUNT: usize = 3;

/// Derive the width of one segment from the total rendered extent.
///
/// Returns `EmptySequence` for `item_count == 0` and `Unmeasured` when the
/// window has not been laid out (zero, negative or non-finite extent).
pub fn segment_width(total_extent: f32, item_count: usize) -> GuardResult<f32> {
    if item_count == 0 {
        return Err(ScrollGuard::EmptySequence);
    }
    if !total_extent.is_finite() || total_extent <= 0.0 {
        return Err(ScrollGuard::Unmeasured);
    }
    Ok(total_extent / SEGMENT_COUNT as f32)
}

/// `[S, 2S]`, the span resize recovery keeps the viewport in.
///
/// Independent of the threshold, so recovery still works when the threshold
/// does not fit the new layout.
pub fn main_segment(segment: f32) -> RangeInclusive<f32> {
    segment..=(2.0 * segment)
}

/// Measured geometry paired with the boundary threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    segment: f32,
    threshold: f32,
}

impl Geometry {
    /// Pair a segment width with a threshold. The threshold has to leave a
    /// non-empty stable band, i.e. `0 < threshold < segment`.
    pub fn new(segment: f32, threshold: f32) -> GuardResult<Self> {
        if !(segment.is_finite() && segment > 0.0) {
            return Err(ScrollGuard::Unmeasured);
        }
        if !(threshold.is_finite() && threshold > 0.0 && threshold < segment) {
            return Err(ScrollGuard::ThresholdOutOfRange { threshold, segment });
        }
        Ok(Self { segment, threshold })
    }

    /// Measure from a rendered extent in one step.
    pub fn measure(
        total_extent: f32,
        item_count: usize,
        threshold: f32,
    ) -> GuardResult<Self> {
        Self::new(segment_width(total_extent, item_count)?, threshold)
    }

    /// Segment width `S`.
    #[inline]
    pub fn segment(&self) -> f32 {
        self.segment
    }

    /// Distance inside the main segment edges that triggers a teleport.
    #[inline]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Positions at or beyond this are in the trail danger zone.
    #[inline]
    pub fn forward_trigger(&self) -> f32 {
        2.0 * self.segment - self.threshold
    }

    /// Positions at or below this are in the lead danger zone.
    #[inline]
    pub fn backward_trigger(&self) -> f32 {
        self.segment - self.threshold
    }

    /// `[S - threshold, 2S + threshold]`
    pub fn safe_zone(&self) -> RangeInclusive<f32> {
        (self.segment - self.threshold)..=(2.0 * self.segment + self.threshold)
    }

    /// Offset of a position within its segment, in `[0, S)`.
    pub fn offset_in_segment(&self, position: f32) -> f32 {
        position.rem_euclid(self.segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_is_a_third_of_the_extent() {
        assert_eq!(segment_width(2700.0, 6), Ok(900.0));
    }

    #[test]
    fn zero_extent_is_unmeasured() {
        assert_eq!(segment_width(0.0, 4), Err(ScrollGuard::Unmeasured));
        assert_eq!(segment_width(f32::NAN, 4), Err(ScrollGuard::Unmeasured));
    }

    #[test]
    fn empty_sequence_wins_over_unmeasured() {
        assert_eq!(segment_width(0.0, 0), Err(ScrollGuard::EmptySequence));
        assert_eq!(segment_width(2700.0, 0), Err(ScrollGuard::EmptySequence));
    }

    #[test]
    fn triggers_and_zones() {
        let g = Geometry::new(900.0, 50.0).unwrap();
        assert_eq!(g.forward_trigger(), 1750.0);
        assert_eq!(g.backward_trigger(), 850.0);
        assert_eq!(g.safe_zone(), 850.0..=1850.0);
    }

    #[test]
    fn main_segment_is_inclusive() {
        let main = main_segment(900.0);
        assert!(main.contains(&900.0));
        assert!(main.contains(&1800.0));
        assert!(!main.contains(&899.5));
        assert!(!main.contains(&1800.5));
    }

    #[test]
    fn threshold_must_fit_inside_segment() {
        assert!(matches!(
            Geometry::new(900.0, 900.0),
            Err(ScrollGuard::ThresholdOutOfRange { .. })
        ));
        assert!(matches!(
            Geometry::new(900.0, 0.0),
            Err(ScrollGuard::ThresholdOutOfRange { .. })
        ));
        assert_eq!(
            Geometry::measure(0.0, 3, 50.0),
            Err(ScrollGuard::Unmeasured)
        );
    }

    #[test]
    fn offset_wraps_per_segment() {
        let g = Geometry::new(900.0, 50.0).unwrap();
        assert_eq!(g.offset_in_segment(1750.0), 850.0);
        assert_eq!(g.offset_in_segment(850.0), 850.0);
    }
}
