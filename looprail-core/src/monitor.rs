//! Boundary detection for the looping strip

use crate::geometry::Geometry;

/// Direction of travel that carried the viewport into a danger zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Drifted into the trail segment; jump back by one segment.
    Forward,
    /// Drifted into the lead segment; jump forward by one segment.
    Backward,
}

/// A teleport the executor should perform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correction {
    /// Edge the viewport drifted toward.
    pub direction: Direction,
    /// Position that triggered the correction.
    pub from: f32,
    /// Position after the jump.
    pub target: f32,
}

impl Correction {
    /// Signed jump distance, always `-S` or `+S`.
    pub fn jump(&self) -> f32 {
        self.target - self.from
    }
}

/// Observable state of the boundary monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonitorState {
    /// Watching scroll events.
    #[default]
    Idle,
    /// A teleport is in flight; observations are dropped.
    Correcting,
}

/// Exclusive flag held for the duration of a teleport.
///
/// The teleport's own position write is reported back as a scroll
/// observation; while the guard is held such observations are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct RepositionGuard {
    held: bool,
}

impl RepositionGuard {
    /// Take the guard. Returns `false` if it was already held.
    pub fn try_acquire(&mut self) -> bool {
        if self.held {
            return false;
        }
        self.held = true;
        true
    }

    /// Release after smooth motion is restored.
    pub fn release(&mut self) {
        self.held = false;
    }

    /// Whether a teleport is in flight.
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Monitor state implied by the guard.
    pub fn state(&self) -> MonitorState {
        if self.held {
            MonitorState::Correcting
        } else {
            MonitorState::Idle
        }
    }
}

/// Decide whether `position` requires a teleport.
///
/// The jump is exactly one segment in either direction so the sub-segment
/// offset, and with it the card under the viewport, is unchanged.
pub fn evaluate(geometry: &Geometry, position: f32) -> Option<Correction> {
    let forward = geometry.forward_trigger();
    let backward = geometry.backward_trigger();

    if position >= forward {
        let excess = position - forward;
        return Some(Correction {
            direction: Direction::Forward,
            from: position,
            target: backward + excess,
        });
    }

    if position <= backward {
        let deficit = backward - position;
        return Some(Correction {
            direction: Direction::Backward,
            from: position,
            target: forward - deficit,
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> Geometry {
        Geometry::new(900.0, 50.0).unwrap()
    }

    #[test]
    fn forward_edge_jumps_back_one_segment() {
        let c = evaluate(&geometry(), 1750.0).unwrap();
        assert_eq!(c.direction, Direction::Forward);
        assert_eq!(c.target, 850.0);
        assert_eq!(c.jump(), -900.0);
    }

    #[test]
    fn forward_excess_is_preserved() {
        let g = geometry();
        let c = evaluate(&g, 1812.5).unwrap();
        assert_eq!(c.target, 912.5);
        assert_eq!(g.offset_in_segment(c.from), g.offset_in_segment(c.target));
    }

    #[test]
    fn backward_edge_jumps_forward_one_segment() {
        let c = evaluate(&geometry(), 850.0).unwrap();
        assert_eq!(c.direction, Direction::Backward);
        assert_eq!(c.target, 1750.0);
    }

    #[test]
    fn backward_deficit_is_preserved() {
        let c = evaluate(&geometry(), 100.0).unwrap();
        assert_eq!(c.target, 1000.0);
        assert_eq!(c.jump(), 900.0);
    }

    #[test]
    fn stable_band_needs_no_correction() {
        let g = geometry();
        for position in [850.5, 900.0, 1300.0, 1749.5] {
            assert_eq!(evaluate(&g, position), None, "position {position}");
        }
    }

    #[test]
    fn guard_is_exclusive() {
        let mut guard = RepositionGuard::default();
        assert_eq!(guard.state(), MonitorState::Idle);
        assert!(guard.try_acquire());
        assert!(!guard.try_acquire());
        assert_eq!(guard.state(), MonitorState::Correcting);
        guard.release();
        assert!(guard.try_acquire());
    }
}
