//! Triplicated view of a logical sequence
//!
//! Hosts render the items of a [`MaterializedWindow`] in slot order. The
//! [`SlotKey`] of each slot stays stable across re-renders, which keeps the
//! three copies of one item distinct for keyed renderers.

use crate::error::{GuardResult, ScrollGuard};
use crate::geometry::SEGMENT_COUNT;

/// One of the three copies of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    /// Copy before the main segment.
    Lead,
    /// Copy the viewport rests in.
    Main,
    /// Copy after the main segment.
    Trail,
}

impl Segment {
    /// Segments in slot order.
    pub const ALL: [Segment; SEGMENT_COUNT] =
        [Segment::Lead, Segment::Main, Segment::Trail];

    /// Position of the segment in slot order.
    pub const fn ordinal(self) -> usize {
        match self {
            Segment::Lead => 0,
            Segment::Main => 1,
            Segment::Trail => 2,
        }
    }
}

/// Stable identity of one materialized slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey {
    /// Copy the slot belongs to.
    pub segment: Segment,
    /// Index into the logical sequence.
    pub index: usize,
}

/// Lead, main and trail copies of a borrowed sequence.
#[derive(Debug)]
pub struct MaterializedWindow<'a, T> {
    items: &'a [T],
}

impl<'a, T> MaterializedWindow<'a, T> {
    /// Window over `items`; empty sequences are rejected.
    pub fn new(items: &'a [T]) -> GuardResult<Self> {
        if items.is_empty() {
            return Err(ScrollGuard::EmptySequence);
        }
        Ok(Self { items })
    }

    /// Number of materialized slots, `3N`.
    pub fn len(&self) -> usize {
        self.items.len() * SEGMENT_COUNT
    }

    /// Always `false`; kept for the `len` convention.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Key of `slot`, or `None` past the end.
    pub fn key(&self, slot: usize) -> Option<SlotKey> {
        let n = self.items.len();
        let segment = *Segment::ALL.get(slot / n)?;
        Some(SlotKey {
            segment,
            index: slot % n,
        })
    }

    /// Slot of `key`, or `None` if its index is outside the sequence.
    pub fn slot(&self, key: SlotKey) -> Option<usize> {
        let n = self.items.len();
        (key.index < n).then(|| key.segment.ordinal() * n + key.index)
    }

    /// Key and item rendered at `slot`.
    pub fn get(&self, slot: usize) -> Option<(SlotKey, &'a T)> {
        let key = self.key(slot)?;
        Some((key, &self.items[key.index]))
    }

    /// All slots in render order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotKey, &'a T)> + '_ {
        (0..self.len()).filter_map(|slot| self.get(slot))
    }
}
