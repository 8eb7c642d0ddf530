//! Deterministic scheduler driven by a fake clock

use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

use super::{CancelToken, FiredTask, Scheduler, ScrollerTask};

/// Deterministic scheduler driven by an explicit clock.
///
/// Nothing fires on its own. The host (or a test) pulls due work with
/// [`take_frame`](Self::take_frame) and [`pop_due`](Self::pop_due) and
/// delivers it to the controller, which makes frame and timer ordering fully
/// reproducible.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_token: u64,
    frames: VecDeque<FiredTask>,
    // Keyed by (deadline, token) so equal deadlines fire in issue order.
    timers: BTreeMap<(Duration, CancelToken), ScrollerTask>,
}

impl ManualScheduler {
    /// Scheduler with the clock at zero and nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current fake time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Frame callbacks and timers not yet delivered.
    pub fn pending(&self) -> usize {
        self.frames.len() + self.timers.len()
    }

    /// Nothing left to deliver.
    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }

    /// Earliest timer deadline, if any timer is pending.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Drain the frame callbacks queued so far. Callbacks queued while the
    /// returned batch is being delivered belong to the following frame.
    pub fn take_frame(&mut self) -> Vec<FiredTask> {
        self.frames.drain(..).collect()
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<FiredTask> {
        let (&(deadline, token), _) = self.timers.first_key_value()?;
        if deadline > until {
            return None;
        }
        let task = self.timers.remove(&(deadline, token))?;
        self.now = self.now.max(deadline);
        Some((token, task))
    }

    /// Move the clock forward without firing anything.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    fn issue(&mut self) -> CancelToken {
        self.next_token += 1;
        CancelToken::from_raw(self.next_token)
    }
}

impl Scheduler for ManualScheduler {
    fn defer_to_next_frame(&mut self, task: ScrollerTask) -> CancelToken {
        let token = self.issue();
        self.frames.push_back((token, task));
        token
    }

    fn after(&mut self, delay: Duration, task: ScrollerTask) -> CancelToken {
        let token = self.issue();
        self.timers.insert((self.now + delay, token), task);
        token
    }

    fn cancel(&mut self, token: CancelToken) {
        self.frames.retain(|(queued, _)| *queued != token);
        self.timers.retain(|(_, queued), _| *queued != token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timers_fire_in_deadline_order() {
        let mut s = ManualScheduler::new();
        let late =
            s.after(Duration::from_millis(30), ScrollerTask::FinishSettle);
        let early =
            s.after(Duration::from_millis(10), ScrollerTask::Initialize);

        let until = Duration::from_millis(100);
        assert_eq!(s.pop_due(until), Some((early, ScrollerTask::Initialize)));
        assert_eq!(s.now(), Duration::from_millis(10));
        assert_eq!(s.pop_due(until), Some((late, ScrollerTask::FinishSettle)));
        assert_eq!(s.pop_due(until), None);
    }

    #[test]
    fn timers_wait_for_their_deadline() {
        let mut s = ManualScheduler::new();
        s.after(Duration::from_millis(50), ScrollerTask::Initialize);
        assert_eq!(s.pop_due(Duration::from_millis(49)), None);
        assert_eq!(s.next_deadline(), Some(Duration::from_millis(50)));
    }

    #[test]
    fn cancel_removes_frames_and_timers() {
        let mut s = ManualScheduler::new();
        let frame = s.defer_to_next_frame(ScrollerTask::RestoreSmooth);
        let timer = s.after(Duration::ZERO, ScrollerTask::Initialize);
        assert_eq!(s.pending(), 2);

        s.cancel(frame);
        s.cancel(timer);
        s.cancel(timer);

        assert!(s.is_idle());
        assert!(s.take_frame().is_empty());
    }

    #[test]
    fn tokens_are_unique() {
        let mut s = ManualScheduler::new();
        let a = s.defer_to_next_frame(ScrollerTask::RestoreSmooth);
        let b = s.defer_to_next_frame(ScrollerTask::RestoreSmooth);
        assert_ne!(a, b);
        assert_eq!(s.take_frame().len(), 2);
    }
}
