//! The seamless scroller facade
//!
//! [`InfiniteScroller`] owns the controller state, the injected scheduler and
//! (while mounted) the scroll surface. Hosts wire their events to it:
//!
//! - scroll events -> [`InfiniteScroller::on_scroll`]
//! - resize notifications -> [`InfiniteScroller::on_resize`]
//! - fired scheduler tasks -> [`InfiniteScroller::run_task`]
//! - navigation buttons -> [`InfiniteScroller::advance_step`] /
//!   [`InfiniteScroller::retreat_step`]

use std::time::Duration;

use crate::commands;
use crate::config::ScrollerConfig;
use crate::error::{GuardResult, ScrollGuard};
use crate::executor;
use crate::geometry::Geometry;
use crate::initializer::{self, ResizeOutcome};
use crate::monitor::{self, Correction};
use crate::scheduler::{FiredTask, ManualScheduler, Scheduler, ScrollerTask};
use crate::state::{ControllerState, Phase};
use crate::surface::{AnimationMode, ScrollSurface};

/// Result of observing a scroll event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Observation {
    /// Inside the stable band.
    Stable,
    /// The viewport was teleported.
    Corrected(Correction),
    /// Dropped because a teleport is in flight.
    Suppressed,
    /// Nothing to act on yet.
    Skipped(ScrollGuard),
}

/// Seamless looping controller for one triplicated strip.
///
/// Generic over the host surface `Su` and the scheduler `Sc`.
#[derive(Debug)]
pub struct InfiniteScroller<Su, Sc> {
    config: ScrollerConfig,
    state: ControllerState,
    surface: Option<Su>,
    scheduler: Sc,
}

impl<Su, Sc> InfiniteScroller<Su, Sc>
where
    Su: ScrollSurface,
    Sc: Scheduler,
{
    /// Create a detached controller for a sequence of `item_count` items.
    pub fn new(
        config: ScrollerConfig,
        item_count: usize,
        scheduler: Sc,
    ) -> Self {
        Self {
            config,
            state: ControllerState::new(item_count),
            surface: None,
            scheduler,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &ScrollerConfig {
        &self.config
    }

    /// Read-only view of the controller state.
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Mounted surface, if any.
    pub fn surface(&self) -> Option<&Su> {
        self.surface.as_ref()
    }

    /// Mounted surface for the host to render into or feed input to.
    pub fn surface_mut(&mut self) -> Option<&mut Su> {
        self.surface.as_mut()
    }

    /// Injected scheduler.
    pub fn scheduler(&self) -> &Sc {
        &self.scheduler
    }

    /// Injected scheduler, mutably.
    pub fn scheduler_mut(&mut self) -> &mut Sc {
        &mut self.scheduler
    }

    /// Whether a surface is attached.
    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    /// Attach a surface and schedule the deferred initial placement.
    /// Returns the previously mounted surface, if any.
    pub fn mount(&mut self, surface: Su) -> Option<Su> {
        let previous = self.unmount();
        self.surface = Some(surface);
        self.begin_layout_wait();
        previous
    }

    /// Cancel all pending work and hand the surface back. Tasks delivered
    /// after this point are ignored.
    pub fn unmount(&mut self) -> Option<Su> {
        self.abandon_pending(self.state.item_count);
        let surface = self.surface.take();
        if surface.is_some() {
            log::debug!("scroller unmounted");
        }
        surface
    }

    /// The host rendered a new logical sequence. All pending work for the
    /// old sequence is dropped and placement starts over.
    pub fn replace_sequence(&mut self, item_count: usize) {
        self.abandon_pending(item_count);
        if self.surface.is_some() {
            self.begin_layout_wait();
        }
    }

    /// Place the viewport at the start of the main segment now.
    pub fn initialize(&mut self) -> GuardResult<f32> {
        let surface =
            self.surface.as_mut().ok_or(ScrollGuard::DetachedSurface)?;
        initializer::initialize(
            &mut self.state,
            surface,
            &mut self.scheduler,
            &self.config,
        )
    }

    /// Observe the surface after its position changed.
    pub fn on_scroll(&mut self) -> Observation {
        let Some(surface) = self.surface.as_mut() else {
            return Observation::Skipped(ScrollGuard::DetachedSurface);
        };
        if !surface.is_attached() {
            return Observation::Skipped(ScrollGuard::DetachedSurface);
        }
        if self.state.guard.is_held() {
            log::trace!(
                "scroll at {:.1} ignored during teleport",
                surface.position()
            );
            return Observation::Suppressed;
        }

        let geometry = match Geometry::measure(
            surface.total_extent(),
            self.state.item_count,
            self.config.threshold_px,
        ) {
            Ok(geometry) => geometry,
            Err(guard) => {
                note_guard(&mut self.state, guard);
                return Observation::Skipped(guard);
            }
        };
        self.state.segment = Some(geometry.segment());

        match monitor::evaluate(&geometry, surface.position()) {
            None => Observation::Stable,
            Some(correction) => {
                if executor::execute(
                    &mut self.state,
                    surface,
                    &mut self.scheduler,
                    &correction,
                ) {
                    Observation::Corrected(correction)
                } else {
                    Observation::Suppressed
                }
            }
        }
    }

    /// Scroll event entry point for hosts whose events carry the offset.
    ///
    /// The surface is re-read rather than trusting `reported`: events queued
    /// before a teleport still carry the pre-jump offset.
    pub fn on_position_changed(&mut self, reported: f32) -> Observation {
        if let Some(surface) = self.surface.as_ref()
            && (surface.position() - reported).abs() > f32::EPSILON
        {
            log::trace!(
                "stale scroll event {reported:.1}, surface at {:.1}",
                surface.position()
            );
        }
        self.on_scroll()
    }

    /// Re-measure after the host resized the strip or its viewport.
    pub fn on_resize(&mut self) -> GuardResult<ResizeOutcome> {
        let surface =
            self.surface.as_mut().ok_or(ScrollGuard::DetachedSurface)?;
        initializer::recover(
            &mut self.state,
            surface,
            &mut self.scheduler,
            &self.config,
        )
    }

    /// Animated move forward by `delta` pixels. Returns the requested
    /// target, or `None` for a zero delta.
    pub fn advance(&mut self, delta: f32) -> GuardResult<Option<f32>> {
        self.command(delta)
    }

    /// Animated move backward by `delta` pixels.
    pub fn retreat(&mut self, delta: f32) -> GuardResult<Option<f32>> {
        self.command(-delta)
    }

    /// Move forward by the configured step.
    pub fn advance_step(&mut self) -> GuardResult<Option<f32>> {
        self.command(self.config.step_px)
    }

    /// Move backward by the configured step.
    pub fn retreat_step(&mut self) -> GuardResult<Option<f32>> {
        self.command(-self.config.step_px)
    }

    /// Deliver a task the scheduler released. Returns `false` when the task
    /// was cancelled, already delivered, or the surface is gone.
    pub fn run_task(&mut self, (token, task): FiredTask) -> bool {
        let Some(claimed) = self.state.claim(token) else {
            log::trace!("dropping stale scroller task {task:?}");
            return false;
        };
        if claimed != task {
            log::warn!(
                "scroller task mismatch: delivered {task:?}, scheduled {claimed:?}"
            );
        }

        if claimed == ScrollerTask::Initialize {
            self.attempt_initialize();
            return true;
        }

        let Some(surface) = self.surface.as_mut().filter(|s| s.is_attached())
        else {
            log::debug!(
                "{claimed:?} skipped: {}",
                ScrollGuard::DetachedSurface
            );
            return false;
        };
        match claimed {
            ScrollerTask::FinishSettle => {
                initializer::finish_settle(&mut self.state, surface);
            }
            ScrollerTask::RestoreSmooth => {
                executor::restore(&mut self.state, surface);
            }
            ScrollerTask::Initialize => {}
        }
        true
    }

    fn command(&mut self, delta: f32) -> GuardResult<Option<f32>> {
        let surface =
            self.surface.as_mut().ok_or(ScrollGuard::DetachedSurface)?;
        let target = commands::scroll_by(&self.state, surface, delta)?;
        if target.is_some() {
            self.on_scroll();
        }
        Ok(target)
    }

    /// Cancel all pending work. If a teleport or settle was cut short its
    /// mode restore will never fire, so smooth motion is restored here.
    fn abandon_pending(&mut self, item_count: usize) {
        let interrupted = self.state.guard.is_held()
            || self.state.phase == Phase::Settling;
        self.state.reset(&mut self.scheduler, item_count);
        if interrupted
            && let Some(surface) = self.surface.as_mut()
            && surface.is_attached()
        {
            surface.set_animation_mode(AnimationMode::Smooth);
        }
    }

    fn begin_layout_wait(&mut self) {
        self.state.phase = Phase::AwaitingLayout;
        self.schedule_initialize(self.config.init_delay());
    }

    fn schedule_initialize(&mut self, delay: Duration) {
        let token = self.scheduler.after(delay, ScrollerTask::Initialize);
        self.state.track(token, ScrollerTask::Initialize);
    }

    fn attempt_initialize(&mut self) {
        self.state.init_attempts += 1;
        let attempts = self.state.init_attempts;
        match self.initialize() {
            Ok(_) => {}
            Err(ScrollGuard::Unmeasured)
                if attempts < self.config.max_init_attempts =>
            {
                log::trace!(
                    "layout unmeasured on attempt {attempts}; retrying"
                );
                self.schedule_initialize(self.config.init_retry());
            }
            Err(ScrollGuard::Unmeasured) => {
                log::warn!(
                    "layout still unmeasured after {attempts} attempts; \
                     waiting for a resize"
                );
            }
            Err(guard) => log::debug!("initial placement skipped: {guard}"),
        }
    }
}

impl<Su> InfiniteScroller<Su, ManualScheduler>
where
    Su: ScrollSurface,
{
    /// Deliver the frame callbacks queued so far.
    pub fn run_frame(&mut self) -> usize {
        let batch = self.scheduler.take_frame();
        let delivered = batch.len();
        for fired in batch {
            self.run_task(fired);
        }
        delivered
    }

    /// Move the fake clock forward by `by`, delivering timers as they come
    /// due (including ones scheduled by earlier deliveries).
    pub fn advance_clock(&mut self, by: Duration) -> usize {
        let until = self.scheduler.now() + by;
        let mut delivered = 0;
        while let Some(fired) = self.scheduler.pop_due(until) {
            self.run_task(fired);
            delivered += 1;
        }
        self.scheduler.advance_to(until);
        delivered
    }
}

fn note_guard(state: &mut ControllerState, guard: ScrollGuard) {
    match guard {
        ScrollGuard::ThresholdOutOfRange { .. } if !state.threshold_warned => {
            state.threshold_warned = true;
            log::warn!("boundary monitor inactive: {guard}");
        }
        _ => log::trace!("scroll observation skipped: {guard}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::VirtualSurface;

    fn mounted() -> InfiniteScroller<VirtualSurface, ManualScheduler> {
        let config = ScrollerConfig::new(50.0, 100, 150.0);
        let mut scroller =
            InfiniteScroller::new(config, 6, ManualScheduler::new());
        scroller.mount(VirtualSurface::new(6, 140.0, 10.0, 600.0));
        scroller
    }

    #[test]
    fn mount_defers_placement() {
        let mut scroller = mounted();
        assert_eq!(scroller.state().phase(), Phase::AwaitingLayout);
        assert_eq!(scroller.surface().unwrap().position(), 0.0);

        scroller.advance_clock(Duration::from_millis(50));
        assert_eq!(scroller.state().phase(), Phase::Settling);
        assert_eq!(scroller.surface().unwrap().position(), 900.0);

        scroller.advance_clock(Duration::from_millis(100));
        assert_eq!(scroller.state().phase(), Phase::Ready);
        assert_eq!(
            scroller.surface().unwrap().animation_mode(),
            AnimationMode::Smooth
        );
    }

    #[test]
    fn stale_task_after_unmount_is_dropped() {
        let mut scroller = mounted();
        let fired = scroller
            .scheduler_mut()
            .pop_due(Duration::from_millis(50))
            .unwrap();
        let surface = scroller.unmount();
        assert!(surface.is_some());
        assert!(!scroller.run_task(fired));
    }

    #[test]
    fn stale_event_offsets_are_not_trusted() {
        let mut scroller = mounted();
        scroller.advance_clock(Duration::from_millis(150));
        scroller.surface_mut().unwrap().take_events();

        scroller.surface_mut().unwrap().drag_by(900.0);
        let events = scroller.surface_mut().unwrap().take_events();
        assert_eq!(events, vec![1800.0]);
        assert!(matches!(
            scroller.on_position_changed(events[0]),
            Observation::Corrected(_)
        ));
        assert_eq!(
            scroller.on_position_changed(900.0),
            Observation::Suppressed
        );

        scroller.run_frame();
        assert_eq!(scroller.on_position_changed(1800.0), Observation::Stable);
        assert_eq!(scroller.state().corrections(), 1);
    }

    #[test]
    fn zero_delta_is_a_no_op() {
        let mut scroller = mounted();
        assert_eq!(scroller.advance(0.0), Ok(None));
        assert_eq!(scroller.retreat(0.0), Ok(None));
        assert_eq!(scroller.surface().unwrap().position_writes(), 0);
    }

    #[test]
    fn commands_require_a_surface() {
        let config = ScrollerConfig::new(50.0, 100, 150.0);
        let mut scroller: InfiniteScroller<VirtualSurface, _> =
            InfiniteScroller::new(config, 6, ManualScheduler::new());
        assert_eq!(scroller.advance_step(), Err(ScrollGuard::DetachedSurface));
        assert_eq!(
            scroller.on_scroll(),
            Observation::Skipped(ScrollGuard::DetachedSurface)
        );
    }
}
