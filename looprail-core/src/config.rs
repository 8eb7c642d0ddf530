//! Tuning inputs for the scroll controller
//!
//! `threshold_px`, `settle_delay_ms` and `step_px` depend on the card widths of
//! the hosting carousel, so they have no defaults and must be supplied. The
//! remaining timings have defaults that work for typical layouts.

use std::time::Duration;

/// Default wait after mount before the first placement attempt.
pub const DEFAULT_INIT_DELAY_MS: u64 = 50;
/// Default wait between placement attempts while layout is unmeasured.
pub const DEFAULT_INIT_RETRY_MS: u64 = 100;
/// Default bound on placement attempts before giving up.
pub const DEFAULT_MAX_INIT_ATTEMPTS: u32 = 20;
/// Default frame interval for timer-backed frame deferral (~60Hz).
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

#[cfg(feature = "serde")]
mod defaults {
    pub(super) fn init_delay_ms() -> u64 {
        super::DEFAULT_INIT_DELAY_MS
    }

    pub(super) fn init_retry_ms() -> u64 {
        super::DEFAULT_INIT_RETRY_MS
    }

    pub(super) fn max_init_attempts() -> u32 {
        super::DEFAULT_MAX_INIT_ATTEMPTS
    }

    pub(super) fn frame_interval_ms() -> u64 {
        super::DEFAULT_FRAME_INTERVAL_MS
    }
}

/// Tuning for one scroller instance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollerConfig {
    /// Distance (px) inside the main segment edges at which a teleport fires.
    pub threshold_px: f32,
    /// Delay (ms) after the initial placement before smooth motion resumes.
    pub settle_delay_ms: u64,
    /// Distance (px) moved by one navigation button press.
    pub step_px: f32,
    /// Delay (ms) between mount and the first placement attempt.
    #[cfg_attr(feature = "serde", serde(default = "defaults::init_delay_ms"))]
    pub init_delay_ms: u64,
    /// Delay (ms) between placement attempts while layout is unmeasured.
    #[cfg_attr(feature = "serde", serde(default = "defaults::init_retry_ms"))]
    pub init_retry_ms: u64,
    /// Placement attempts made before the controller gives up.
    #[cfg_attr(
        feature = "serde",
        serde(default = "defaults::max_init_attempts")
    )]
    pub max_init_attempts: u32,
    /// Frame length (ms) used by schedulers without a native frame signal.
    #[cfg_attr(
        feature = "serde",
        serde(default = "defaults::frame_interval_ms")
    )]
    pub frame_interval_ms: u64,
}

impl ScrollerConfig {
    /// Build a config from the three layout-dependent inputs, keeping default
    /// timings for everything else.
    pub const fn new(
        threshold_px: f32,
        settle_delay_ms: u64,
        step_px: f32,
    ) -> Self {
        Self {
            threshold_px,
            settle_delay_ms,
            step_px,
            init_delay_ms: DEFAULT_INIT_DELAY_MS,
            init_retry_ms: DEFAULT_INIT_RETRY_MS,
            max_init_attempts: DEFAULT_MAX_INIT_ATTEMPTS,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
        }
    }

    /// Override the wait between mount and the first placement attempt.
    pub const fn with_init_delay_ms(mut self, ms: u64) -> Self {
        self.init_delay_ms = ms;
        self
    }

    /// Override the placement retry interval and attempt bound.
    pub const fn with_init_retry(
        mut self,
        retry_ms: u64,
        max_attempts: u32,
    ) -> Self {
        self.init_retry_ms = retry_ms;
        self.max_init_attempts = max_attempts;
        self
    }

    /// Override the frame length used by timer-backed schedulers.
    pub const fn with_frame_interval_ms(mut self, ms: u64) -> Self {
        self.frame_interval_ms = ms;
        self
    }

    /// Settle delay as a `Duration`.
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Mount delay as a `Duration`.
    pub fn init_delay(&self) -> Duration {
        Duration::from_millis(self.init_delay_ms)
    }

    /// Retry interval as a `Duration`.
    pub fn init_retry(&self) -> Duration {
        Duration::from_millis(self.init_retry_ms)
    }

    /// Frame length as a `Duration`.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}
