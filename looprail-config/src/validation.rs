//! Guard rails for loaded scroller configs

use std::fmt;

use looprail_core::ScrollerConfig;
use thiserror::Error;

const SLOW_SETTLE_MS: u64 = 1_000;

/// Configuration the controller cannot run with.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigGuardRailError {
    /// A distance is NaN or infinite.
    #[error("{field} must be a finite number")]
    NonFinite {
        /// Offending config field.
        field: &'static str,
    },
    /// A distance is zero or negative.
    #[error("{field} must be greater than zero (got {value})")]
    NonPositive {
        /// Offending config field.
        field: &'static str,
        /// Value it was set to.
        value: f32,
    },
    /// `max_init_attempts` is zero.
    #[error("max_init_attempts must allow at least one placement attempt")]
    NoInitAttempts,
}

/// Non-fatal finding with an optional remedy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// What is wrong.
    pub message: String,
    /// How to fix it.
    pub hint: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.hint {
            Some(hint) => write!(f, "{} (hint: {hint})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Warnings collected by the guard rails.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigWarnings {
    /// Warnings in the order they were raised.
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    /// Record a warning without a hint.
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    /// Record a warning with a hint.
    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    /// No warnings were raised.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of warnings.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Reject configurations the controller cannot run with and collect
/// warnings for ones that will behave poorly.
///
/// Whether `threshold_px` fits inside a segment depends on the rendered
/// layout, so that check happens at runtime in the controller.
pub fn apply_guard_rails(
    config: &ScrollerConfig,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    require_positive("threshold_px", config.threshold_px)?;
    require_positive("step_px", config.step_px)?;
    if config.max_init_attempts == 0 {
        return Err(ConfigGuardRailError::NoInitAttempts);
    }

    if config.step_px < config.threshold_px {
        warnings.push_with_hint(
            format!(
                "step_px ({}) is smaller than threshold_px ({})",
                config.step_px, config.threshold_px
            ),
            "use a step of at least one card so it can leave the danger zone",
        );
    }

    if config.settle_delay_ms > SLOW_SETTLE_MS {
        warnings.push_with_hint(
            format!(
                "settle_delay_ms ({}) exceeds {SLOW_SETTLE_MS}ms",
                config.settle_delay_ms
            ),
            "navigation jumps instead of animating until the delay elapses",
        );
    }

    if config.frame_interval_ms == 0 {
        warnings.push(
            "frame_interval_ms is 0; timer-backed schedulers restore smooth \
             motion on the next tick",
        );
    }

    Ok(warnings)
}

fn require_positive(
    field: &'static str,
    value: f32,
) -> Result<(), ConfigGuardRailError> {
    if !value.is_finite() {
        return Err(ConfigGuardRailError::NonFinite { field });
    }
    if value <= 0.0 {
        return Err(ConfigGuardRailError::NonPositive { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sane_config_has_no_warnings() {
        let config = ScrollerConfig::new(50.0, 120, 150.0);
        let warnings = apply_guard_rails(&config).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn rejects_bad_distances() {
        assert_eq!(
            apply_guard_rails(&ScrollerConfig::new(f32::NAN, 120, 150.0)),
            Err(ConfigGuardRailError::NonFinite { field: "threshold_px" })
        );
        assert_eq!(
            apply_guard_rails(&ScrollerConfig::new(50.0, 120, 0.0)),
            Err(ConfigGuardRailError::NonPositive {
                field: "step_px",
                value: 0.0
            })
        );
        assert_eq!(
            apply_guard_rails(&ScrollerConfig::new(-1.0, 120, 150.0)),
            Err(ConfigGuardRailError::NonPositive {
                field: "threshold_px",
                value: -1.0
            })
        );
    }

    #[test]
    fn rejects_zero_attempts() {
        let config =
            ScrollerConfig::new(50.0, 120, 150.0).with_init_retry(100, 0);
        assert_eq!(
            apply_guard_rails(&config),
            Err(ConfigGuardRailError::NoInitAttempts)
        );
    }

    #[test]
    fn warns_on_short_step_and_slow_settle() {
        let config = ScrollerConfig::new(200.0, 1_500, 150.0);
        let warnings = apply_guard_rails(&config).unwrap();
        assert_eq!(warnings.len(), 2);
        assert!(warnings.items[0].message.contains("step_px"));
        assert!(warnings.items[1].message.contains("settle_delay_ms"));
        assert!(warnings.items.iter().all(|w| w.hint.is_some()));
    }
}
