//! Headless scroll surface for simulation and tests
//!
//! Models a horizontal strip of `3 * item_count` fixed-stride cards inside a
//! viewport, the way a browser scroll container behaves: offsets are clamped
//! to `[0, max_scroll]`, smooth writes animate over time, and every change of
//! offset queues a scroll event for the host to forward to the controller.

use std::collections::VecDeque;
use std::ops::Range;
use std::time::Duration;

use super::animator::{Easing, Tween};
use super::{AnimationMode, ScrollSurface};
use crate::geometry::SEGMENT_COUNT;

const MOVE_EPSILON: f32 = 1e-3;

/// Headless horizontal strip of fixed-stride cards.
#[derive(Debug, Clone)]
pub struct VirtualSurface {
    // Content
    item_count: usize,
    item_width: f32,
    item_spacing: f32,

    // Viewport
    viewport_width: f32,
    scroll_x: f32,
    max_scroll: f32,
    /// Materialized slot indices intersecting the viewport.
    visible_range: Range<usize>,

    // Motion
    mode: AnimationMode,
    tween: Tween,
    smooth_duration: Duration,

    // Host plumbing
    events: VecDeque<f32>,
    position_writes: usize,
    attached: bool,
}

impl VirtualSurface {
    /// Every card carries its trailing gap, so one segment is exactly
    /// `item_count * (item_width + item_spacing)` wide.
    pub fn new(
        item_count: usize,
        item_width: f32,
        item_spacing: f32,
        viewport_width: f32,
    ) -> Self {
        let mut s = Self {
            item_count,
            item_width,
            item_spacing,
            viewport_width,
            scroll_x: 0.0,
            max_scroll: 0.0,
            visible_range: 0..0,
            mode: AnimationMode::Smooth,
            tween: Tween::new(Easing::EaseOut),
            smooth_duration: Duration::from_millis(300),
            events: VecDeque::new(),
            position_writes: 0,
            attached: true,
        };
        s.recompute_metrics();
        s
    }

    /// Override how long smooth writes take.
    pub fn with_smooth_duration(mut self, duration: Duration) -> Self {
        self.smooth_duration = duration;
        self
    }

    /// Logical items per segment.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Visible width.
    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    /// Largest reachable offset.
    pub fn max_scroll(&self) -> f32 {
        self.max_scroll
    }

    /// Slots intersecting the viewport.
    pub fn visible_range(&self) -> Range<usize> {
        self.visible_range.clone()
    }

    /// Whether a smooth write is still in motion.
    pub fn is_animating(&self) -> bool {
        self.tween.is_active()
    }

    /// Number of `set_position` calls received so far.
    pub fn position_writes(&self) -> usize {
        self.position_writes
    }

    /// Logical index of the card at the left edge of the viewport.
    pub fn leading_item(&self) -> Option<usize> {
        if self.item_count == 0 {
            return None;
        }
        let stride = self.stride();
        if stride <= 0.0 {
            return None;
        }
        // Sub-pixel drift from carried animations must not flip the card.
        let slot = (self.scroll_x / stride + 1e-3).floor() as usize;
        Some(slot % self.item_count)
    }

    /// Scroll events produced since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<f32> {
        self.events.drain(..).collect()
    }

    /// User drag or wheel input. Interrupts any smooth animation.
    pub fn drag_by(&mut self, dx: f32) {
        self.tween.cancel();
        self.apply(self.scroll_x + dx);
    }

    /// Advance smooth motion by one frame of `dt`.
    pub fn tick(&mut self, dt: Duration) {
        if let Some(next) = self.tween.advance(dt) {
            self.apply(next);
        }
    }

    /// Viewport width changed (window resize).
    pub fn update_dimensions(&mut self, viewport_width: f32) {
        self.viewport_width = viewport_width;
        self.recompute_metrics();
    }

    /// Card width changed (responsive breakpoint).
    pub fn set_item_width(&mut self, item_width: f32) {
        self.item_width = item_width;
        self.recompute_metrics();
    }

    /// The host rendered a different sequence.
    pub fn set_item_count(&mut self, item_count: usize) {
        self.item_count = item_count;
        self.recompute_metrics();
    }

    /// Drop the surface from the host tree.
    pub fn detach(&mut self) {
        self.tween.cancel();
        self.attached = false;
    }

    fn apply(&mut self, x: f32) {
        let clamped = x.clamp(0.0, self.max_scroll);
        if (clamped - self.scroll_x).abs() <= MOVE_EPSILON {
            return;
        }
        self.scroll_x = clamped;
        self.recompute_visible_range();
        self.events.push_back(clamped);
    }

    fn recompute_metrics(&mut self) {
        let content = self.content_width();
        self.max_scroll = (content - self.viewport_width).max(0.0);
        // Re-clamp the current offset; a shrink reports a scroll event.
        self.apply(self.scroll_x);
        self.recompute_visible_range();
    }

    fn recompute_visible_range(&mut self) {
        let slots = self.item_count * SEGMENT_COUNT;
        let stride = self.stride();
        if slots == 0 || stride <= 0.0 {
            self.visible_range = 0..0;
            return;
        }
        let viewport_end = self.scroll_x + self.viewport_width;
        let first = (self.scroll_x / stride).floor() as usize;
        // Right-partial cards count as visible.
        let end = (viewport_end / stride).ceil() as usize;
        self.visible_range = first.min(slots)..end.min(slots);
    }

    #[inline]
    fn stride(&self) -> f32 {
        (self.item_width + self.item_spacing).max(0.0)
    }

    #[inline]
    fn content_width(&self) -> f32 {
        (self.item_count * SEGMENT_COUNT) as f32 * self.stride()
    }
}

impl ScrollSurface for VirtualSurface {
    fn position(&self) -> f32 {
        self.scroll_x
    }

    fn set_position(&mut self, position: f32) {
        self.position_writes += 1;
        match self.mode {
            AnimationMode::Instant => {
                // An instant jump during a smooth scroll carries the
                // in-flight animation along by the same distance.
                let before = self.scroll_x;
                self.apply(position);
                self.tween.shift(self.scroll_x - before);
            }
            AnimationMode::Smooth => {
                let target = position.clamp(0.0, self.max_scroll);
                self.tween.start(self.scroll_x, target, self.smooth_duration);
            }
        }
    }

    fn total_extent(&self) -> f32 {
        if self.attached {
            self.content_width()
        } else {
            0.0
        }
    }

    fn animation_mode(&self) -> AnimationMode {
        self.mode
    }

    fn set_animation_mode(&mut self, mode: AnimationMode) {
        self.mode = mode;
    }

    fn is_attached(&self) -> bool {
        self.attached
    }
}
