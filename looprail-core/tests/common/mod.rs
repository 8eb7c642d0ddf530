//! Shared fixtures for looprail-core integration tests

#![allow(dead_code)]

use std::time::Duration;

use looprail_core::{
    AnimationMode, InfiniteScroller, ManualScheduler, ScrollSurface,
    ScrollerConfig,
};

/// Surface whose writes land immediately in either mode and whose extent is
/// set directly, so geometry can be changed between observations.
#[derive(Debug, Clone)]
pub struct FakeSurface {
    pub position: f32,
    pub extent: f32,
    pub mode: AnimationMode,
    pub attached: bool,
    pub writes: Vec<(AnimationMode, f32)>,
    pub mode_changes: usize,
}

impl FakeSurface {
    pub fn with_extent(extent: f32) -> Self {
        Self {
            position: 0.0,
            extent,
            mode: AnimationMode::Smooth,
            attached: true,
            writes: Vec::new(),
            mode_changes: 0,
        }
    }
}

impl ScrollSurface for FakeSurface {
    fn position(&self) -> f32 {
        self.position
    }

    fn set_position(&mut self, position: f32) {
        self.writes.push((self.mode, position));
        self.position = position;
    }

    fn total_extent(&self) -> f32 {
        self.extent
    }

    fn animation_mode(&self) -> AnimationMode {
        self.mode
    }

    fn set_animation_mode(&mut self, mode: AnimationMode) {
        self.mode_changes += 1;
        self.mode = mode;
    }

    fn is_attached(&self) -> bool {
        self.attached
    }
}

pub type Scroller = InfiniteScroller<FakeSurface, ManualScheduler>;

pub const SETTLE: Duration = Duration::from_millis(120);

/// threshold 50, settle 120ms, step 150, default init delay of 50ms.
pub fn config() -> ScrollerConfig {
    ScrollerConfig::new(50.0, SETTLE.as_millis() as u64, 150.0)
}

/// Mounted on a 2700px strip (S = 900) of six items, placed and settled.
pub fn settled() -> Scroller {
    let mut scroller = mounted(6, 2700.0);
    scroller.advance_clock(Duration::from_millis(50));
    scroller.advance_clock(SETTLE);
    scroller
}

pub fn mounted(items: usize, extent: f32) -> Scroller {
    let mut scroller =
        InfiniteScroller::new(config(), items, ManualScheduler::new());
    scroller.mount(FakeSurface::with_extent(extent));
    scroller
}

pub fn surface(scroller: &Scroller) -> &FakeSurface {
    scroller.surface().expect("surface mounted")
}

/// Simulate the user dragging the strip to `position`.
pub fn drag_to(scroller: &mut Scroller, position: f32) {
    scroller
        .surface_mut()
        .expect("surface mounted")
        .position = position;
}
