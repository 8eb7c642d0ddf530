//! Initial placement and resize recovery

use crate::config::ScrollerConfig;
use crate::error::{GuardResult, ScrollGuard};
use crate::geometry::{main_segment, segment_width};
use crate::scheduler::{Scheduler, ScrollerTask};
use crate::state::{ControllerState, Phase};
use crate::surface::{AnimationMode, ScrollSurface};

/// What a resize notification led to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeOutcome {
    /// Position still inside `[S, 2S]`; nothing moved.
    Kept {
        /// Freshly measured segment width.
        segment: f32,
    },
    /// Position fell outside the main segment; viewport placed back at `S`.
    Recentered {
        /// Freshly measured segment width.
        segment: f32,
    },
}

fn measure<Su>(state: &ControllerState, surface: &Su) -> GuardResult<f32>
where
    Su: ScrollSurface + ?Sized,
{
    if !surface.is_attached() {
        return Err(ScrollGuard::DetachedSurface);
    }
    segment_width(surface.total_extent(), state.item_count)
}

/// Place the viewport at the start of the main segment.
///
/// The write is instant; smooth motion resumes once the settle delay has
/// elapsed. Any other pending placement is superseded.
pub(crate) fn initialize<Su, Sc>(
    state: &mut ControllerState,
    surface: &mut Su,
    scheduler: &mut Sc,
    config: &ScrollerConfig,
) -> GuardResult<f32>
where
    Su: ScrollSurface + ?Sized,
    Sc: Scheduler + ?Sized,
{
    let segment = measure(state, surface)?;
    state.segment = Some(segment);

    surface.set_animation_mode(AnimationMode::Instant);
    surface.set_position(segment);

    state.cancel_task(scheduler, ScrollerTask::Initialize);
    state.cancel_task(scheduler, ScrollerTask::FinishSettle);
    let token =
        scheduler.after(config.settle_delay(), ScrollerTask::FinishSettle);
    state.track(token, ScrollerTask::FinishSettle);
    state.phase = Phase::Settling;

    log::debug!("placed viewport at main segment start {segment:.1}");
    Ok(segment)
}

/// Settle delay elapsed.
pub(crate) fn finish_settle<Su>(state: &mut ControllerState, surface: &mut Su)
where
    Su: ScrollSurface + ?Sized,
{
    state.phase = Phase::Ready;
    // A teleport in flight restores the mode on its own frame.
    if !state.guard.is_held() {
        surface.set_animation_mode(AnimationMode::Smooth);
    }
}

/// Re-measure after a resize and recenter if the viewport left `[S, 2S]`.
///
/// A resize can change `S` arbitrarily, so recovery is a full placement
/// rather than an offset adjustment.
pub(crate) fn recover<Su, Sc>(
    state: &mut ControllerState,
    surface: &mut Su,
    scheduler: &mut Sc,
    config: &ScrollerConfig,
) -> GuardResult<ResizeOutcome>
where
    Su: ScrollSurface + ?Sized,
    Sc: Scheduler + ?Sized,
{
    let segment = measure(state, surface)?;
    let previous = state.segment.replace(segment);
    let position = surface.position();

    if main_segment(segment).contains(&position) {
        return Ok(ResizeOutcome::Kept { segment });
    }

    log::debug!(
        "resize moved segment {previous:?} -> {segment:.1}; \
         position {position:.1} left main segment"
    );
    initialize(state, surface, scheduler, config)
        .map(|segment| ResizeOutcome::Recentered { segment })
}
