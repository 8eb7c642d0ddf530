//! Elapsed-time tween used for smooth scroll writes

use std::time::Duration;

/// Easing curve for smooth writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Accelerating.
    EaseIn,
    /// Decelerating.
    #[default]
    EaseOut,
    /// Accelerating then decelerating.
    EaseInOut,
}

impl Easing {
    /// Apply the easing curve to progress `t` in `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
        }
    }
}

/// Interpolates one scroll offset toward a target over a fixed duration.
#[derive(Debug, Clone)]
pub struct Tween {
    active: bool,
    start: f32,
    target: f32,
    elapsed: Duration,
    duration: Duration,
    easing: Easing,
}

impl Default for Tween {
    fn default() -> Self {
        Self {
            active: false,
            start: 0.0,
            target: 0.0,
            elapsed: Duration::ZERO,
            duration: Duration::from_millis(250),
            easing: Easing::default(),
        }
    }
}

impl Tween {
    /// Idle tween with the given curve.
    pub fn new(easing: Easing) -> Self {
        Self {
            easing,
            ..Self::default()
        }
    }

    /// Whether motion is in progress.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Begin moving from `current` to `target` over `duration`.
    pub fn start(&mut self, current: f32, target: f32, duration: Duration) {
        self.active = true;
        self.start = current;
        self.target = target;
        self.elapsed = Duration::ZERO;
        self.duration = duration;
    }

    /// Advance by `dt`. Returns the next offset while animating, the target
    /// on the final step, and `None` once inactive.
    pub fn advance(&mut self, dt: Duration) -> Option<f32> {
        if !self.active {
            return None;
        }
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.active = false;
            return Some(self.target);
        }
        let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        let eased = self.easing.apply(t);
        Some(self.start + (self.target - self.start) * eased)
    }

    /// Translate an in-flight animation by `by` without restarting it.
    pub fn shift(&mut self, by: f32) {
        if self.active {
            self.start += by;
            self.target += by;
        }
    }

    /// Stop where it is.
    pub fn cancel(&mut self) {
        self.active = false;
    }
}
