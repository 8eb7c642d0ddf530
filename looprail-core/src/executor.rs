//! Silent teleport of the viewport by one segment

use crate::monitor::Correction;
use crate::scheduler::{Scheduler, ScrollerTask};
use crate::state::ControllerState;
use crate::surface::{AnimationMode, ScrollSurface};

/// Jump to `correction.target` without animation and schedule smooth motion
/// to resume on the next frame. Returns `false` if a teleport is already in
/// flight.
pub(crate) fn execute<Su, Sc>(
    state: &mut ControllerState,
    surface: &mut Su,
    scheduler: &mut Sc,
    correction: &Correction,
) -> bool
where
    Su: ScrollSurface + ?Sized,
    Sc: Scheduler + ?Sized,
{
    if !state.guard.try_acquire() {
        return false;
    }

    surface.set_animation_mode(AnimationMode::Instant);
    surface.set_position(correction.target);

    let token = scheduler.defer_to_next_frame(ScrollerTask::RestoreSmooth);
    state.track(token, ScrollerTask::RestoreSmooth);
    state.corrections += 1;

    log::debug!(
        "teleported {:?} {:.1} -> {:.1}",
        correction.direction,
        correction.from,
        correction.target
    );
    true
}

/// Frame after a teleport: resume smooth motion, then release the guard.
///
/// The monitor only returns to idle once the mode is back to smooth, even
/// while the initial placement is still settling.
pub(crate) fn restore<Su>(state: &mut ControllerState, surface: &mut Su)
where
    Su: ScrollSurface + ?Sized,
{
    surface.set_animation_mode(AnimationMode::Smooth);
    state.guard.release();
}
