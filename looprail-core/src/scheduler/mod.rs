//! Deferred work for the controller
//!
//! Scheduled work is plain data. A scheduler holds `ScrollerTask` values and
//! hands them back, paired with the token it issued, once they are due; the
//! host then delivers each pair to `InfiniteScroller::run_task`.

mod manual;
#[cfg(feature = "tokio")]
mod tokio_timer;

use std::time::Duration;

pub use manual::ManualScheduler;
#[cfg(feature = "tokio")]
pub use tokio_timer::TokioScheduler;

/// Handle for a scheduled task, used to cancel it or to match its delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CancelToken(u64);

impl CancelToken {
    /// Token from a scheduler-issued id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Work the controller defers to a later tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollerTask {
    /// Attempt the initial placement (mount delay or unmeasured retry).
    Initialize,
    /// Settle delay after placement elapsed; resume smooth motion.
    FinishSettle,
    /// Next frame after a teleport; resume smooth motion and release the guard.
    RestoreSmooth,
}

/// A task the scheduler has released for delivery.
pub type FiredTask = (CancelToken, ScrollerTask);

/// Timer and frame capability injected into the controller.
pub trait Scheduler {
    /// Run `task` after the next frame has been committed.
    fn defer_to_next_frame(&mut self, task: ScrollerTask) -> CancelToken;

    /// Run `task` once `delay` has elapsed.
    fn after(&mut self, delay: Duration, task: ScrollerTask) -> CancelToken;

    /// Drop a pending task. Cancelling an unknown or fired token is a no-op.
    fn cancel(&mut self, token: CancelToken);
}

impl<S: Scheduler + ?Sized> Scheduler for &mut S {
    fn defer_to_next_frame(&mut self, task: ScrollerTask) -> CancelToken {
        (**self).defer_to_next_frame(task)
    }

    fn after(&mut self, delay: Duration, task: ScrollerTask) -> CancelToken {
        (**self).after(delay, task)
    }

    fn cancel(&mut self, token: CancelToken) {
        (**self).cancel(token);
    }
}
