//! Navigation commands issued by carousel buttons

use crate::error::{GuardResult, ScrollGuard};
use crate::state::ControllerState;
use crate::surface::{AnimationMode, ScrollSurface};

/// Request an animated move of `delta` pixels.
///
/// Returns the requested target, or `None` when `delta` is zero (or not a
/// number) and nothing was touched. Commands do not bypass the boundary
/// monitor; the caller observes the surface afterwards like any other move.
pub(crate) fn scroll_by<Su>(
    state: &ControllerState,
    surface: &mut Su,
    delta: f32,
) -> GuardResult<Option<f32>>
where
    Su: ScrollSurface + ?Sized,
{
    if delta == 0.0 || !delta.is_finite() {
        return Ok(None);
    }
    if state.item_count == 0 {
        return Err(ScrollGuard::EmptySequence);
    }
    if !surface.is_attached() {
        return Err(ScrollGuard::DetachedSurface);
    }

    let target = surface.position() + delta;
    if surface.animation_mode() != AnimationMode::Smooth {
        surface.set_animation_mode(AnimationMode::Smooth);
    }
    surface.set_position(target);
    Ok(Some(target))
}
