//! The scrollable surface the controller drives
//!
//! A host adapts its scroll container to [`ScrollSurface`]. User scroll
//! events and resize notifications are not pulled through this trait; the
//! host forwards them to `InfiniteScroller::on_scroll` and
//! `InfiniteScroller::on_resize`.

mod animator;
mod virtual_surface;

pub use animator::{Easing, Tween};
pub use virtual_surface::VirtualSurface;

/// Whether position writes are animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationMode {
    /// Writes land immediately. Used while teleporting.
    Instant,
    /// Writes animate toward the requested position.
    #[default]
    Smooth,
}

/// Scroll container the controller positions.
pub trait ScrollSurface {
    /// Current horizontal scroll offset.
    fn position(&self) -> f32;

    /// Request a new scroll offset, honouring the current animation mode.
    fn set_position(&mut self, position: f32);

    /// Rendered width of the whole materialized window (all three segments).
    fn total_extent(&self) -> f32;

    /// Current animation mode.
    fn animation_mode(&self) -> AnimationMode;

    /// Switch between instant and animated writes.
    fn set_animation_mode(&mut self, mode: AnimationMode);

    /// `false` once the underlying element is gone.
    fn is_attached(&self) -> bool {
        true
    }
}

impl<S: ScrollSurface + ?Sized> ScrollSurface for Box<S> {
    fn position(&self) -> f32 {
        (**self).position()
    }

    fn set_position(&mut self, position: f32) {
        (**self).set_position(position);
    }

    fn total_extent(&self) -> f32 {
        (**self).total_extent()
    }

    fn animation_mode(&self) -> AnimationMode {
        (**self).animation_mode()
    }

    fn set_animation_mode(&mut self, mode: AnimationMode) {
        (**self).set_animation_mode(mode);
    }

    fn is_attached(&self) -> bool {
        (**self).is_attached()
    }
}
