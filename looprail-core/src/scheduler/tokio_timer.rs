//! Scheduler backed by tokio timers

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::{CancelToken, FiredTask, Scheduler, ScrollerTask};

/// Scheduler backed by tokio timers.
///
/// Each scheduled task is a sleeping tokio task that sends its
/// `(token, task)` pair on an unbounded channel when it wakes. The host owns
/// the receiving half and forwards each pair to the controller. There is no
/// paint signal here, so "next frame" is one `frame_interval` timer.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct TokioScheduler {
    frame_interval: Duration,
    next_token: u64,
    timers: HashMap<CancelToken, JoinHandle<()>>,
    fired: mpsc::UnboundedSender<FiredTask>,
}

impl TokioScheduler {
    /// Scheduler plus the receiver the host drains for fired tasks.
    pub fn new(
        frame_interval: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<FiredTask>) {
        let (fired, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            frame_interval,
            next_token: 0,
            timers: HashMap::new(),
            fired,
        };
        (scheduler, rx)
    }

    fn spawn(&mut self, delay: Duration, task: ScrollerTask) -> CancelToken {
        self.timers.retain(|_, handle| !handle.is_finished());

        self.next_token += 1;
        let token = CancelToken::from_raw(self.next_token);
        let fired = self.fired.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if fired.send((token, task)).is_err() {
                log::trace!(
                    "scroller task {task:?} fired after receiver closed"
                );
            }
        });
        self.timers.insert(token, handle);
        token
    }
}

impl Scheduler for TokioScheduler {
    fn defer_to_next_frame(&mut self, task: ScrollerTask) -> CancelToken {
        self.spawn(self.frame_interval, task)
    }

    fn after(&mut self, delay: Duration, task: ScrollerTask) -> CancelToken {
        self.spawn(delay, task)
    }

    fn cancel(&mut self, token: CancelToken) {
        if let Some(handle) = self.timers.remove(&token) {
            handle.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.timers.drain() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fires_after_delay() {
        let (mut scheduler, mut rx) =
            TokioScheduler::new(Duration::from_millis(16));
        let token = scheduler
            .after(Duration::from_millis(200), ScrollerTask::Initialize);

        let fired = rx.recv().await;
        assert_eq!(fired, Some((token, ScrollerTask::Initialize)));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_never_fires() {
        let (mut scheduler, mut rx) =
            TokioScheduler::new(Duration::from_millis(16));
        let cancelled = scheduler
            .after(Duration::from_millis(10), ScrollerTask::Initialize);
        let kept = scheduler.defer_to_next_frame(ScrollerTask::RestoreSmooth);
        scheduler.cancel(cancelled);

        assert_eq!(
            rx.recv().await,
            Some((kept, ScrollerTask::RestoreSmooth))
        );
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(rx.try_recv().is_err());
    }
}
