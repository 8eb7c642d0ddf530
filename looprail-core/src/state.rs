//! Owned controller state passed to every operation

use std::collections::HashMap;

use crate::monitor::{MonitorState, RepositionGuard};
use crate::scheduler::{CancelToken, Scheduler, ScrollerTask};

/// Lifecycle of a controller instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No surface attached.
    #[default]
    Detached,
    /// Mounted, waiting for a measurable layout to place the viewport.
    AwaitingLayout,
    /// Placed at the main segment start; smooth motion not yet restored.
    Settling,
    /// Placed and settled.
    Ready,
}

/// Everything the controller knows about one strip.
#[derive(Debug, Default)]
pub struct ControllerState {
    pub(crate) item_count: usize,
    /// Segment width from the most recent successful measurement.
    pub(crate) segment: Option<f32>,
    pub(crate) guard: RepositionGuard,
    pub(crate) phase: Phase,
    pub(crate) init_attempts: u32,
    pub(crate) corrections: u64,
    pub(crate) threshold_warned: bool,
    pending: HashMap<CancelToken, ScrollerTask>,
}

impl ControllerState {
    /// Fresh, detached state for a sequence of `item_count` items.
    pub fn new(item_count: usize) -> Self {
        Self {
            item_count,
            ..Self::default()
        }
    }

    /// Length of the logical sequence.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Last measured segment width.
    pub fn segment(&self) -> Option<f32> {
        self.segment
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Boundary monitor state.
    pub fn monitor_state(&self) -> MonitorState {
        self.guard.state()
    }

    /// Whether a teleport is in flight.
    pub fn is_repositioning(&self) -> bool {
        self.guard.is_held()
    }

    /// Teleports performed over the controller's lifetime.
    pub fn corrections(&self) -> u64 {
        self.corrections
    }

    /// Placement attempts since the last mount or sequence change.
    pub fn init_attempts(&self) -> u32 {
        self.init_attempts
    }

    /// Scheduled tasks that have neither fired nor been cancelled.
    pub fn pending_tasks(&self) -> usize {
        self.pending.len()
    }

    pub(crate) fn track(&mut self, token: CancelToken, task: ScrollerTask) {
        self.pending.insert(token, task);
    }

    /// Claim a delivered task. `None` means it was cancelled or is stale.
    pub(crate) fn claim(&mut self, token: CancelToken) -> Option<ScrollerTask> {
        self.pending.remove(&token)
    }

    /// Cancel every pending instance of `task`.
    pub(crate) fn cancel_task<S: Scheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
        task: ScrollerTask,
    ) {
        self.pending.retain(|token, pending| {
            if *pending == task {
                scheduler.cancel(*token);
                false
            } else {
                true
            }
        });
    }

    /// Cancel everything and return to a detached state for `item_count`.
    pub(crate) fn reset<S: Scheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
        item_count: usize,
    ) {
        for (token, _) in self.pending.drain() {
            scheduler.cancel(token);
        }
        *self = Self::new(item_count);
    }
}
