//! Seamless infinite horizontal scrolling for looping carousels.
//!
//! A finite list of cards is rendered three times side by side (lead, main,
//! trail). The controller keeps the viewport inside the main copy by
//! teleporting it exactly one segment width whenever it drifts within
//! `threshold` of either edge. The jump preserves the offset within the
//! segment, so the card under the viewport never changes and the loop looks
//! endless.
//!
//! The host supplies a [`ScrollSurface`] and a [`Scheduler`], forwards its
//! scroll and resize events, and delivers fired tasks back through
//! [`InfiniteScroller::run_task`].

pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod initializer;
pub mod monitor;
pub mod scheduler;
pub mod state;
pub mod surface;
pub mod window;

mod commands;
mod executor;

pub use config::ScrollerConfig;
pub use controller::{InfiniteScroller, Observation};
pub use error::{GuardResult, ScrollGuard};
pub use geometry::{Geometry, segment_width};
pub use initializer::ResizeOutcome;
pub use monitor::{Correction, Direction, MonitorState, RepositionGuard};
#[cfg(feature = "tokio")]
pub use scheduler::TokioScheduler;
pub use scheduler::{
    CancelToken, FiredTask, ManualScheduler, Scheduler, ScrollerTask,
};
pub use state::{ControllerState, Phase};
pub use surface::{AnimationMode, ScrollSurface, VirtualSurface};
pub use window::{MaterializedWindow, Segment, SlotKey};
