//! Headless run of the looping strip
//!
//! Mirrors what a UI host does every frame: advance smooth motion, forward
//! the resulting scroll events, deliver frame callbacks, then let timers
//! catch up.

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result, bail, ensure};
use looprail_config::load_explicit;
use looprail_core::{
    Correction, Direction, InfiniteScroller, ManualScheduler, Observation,
    Phase, ResizeOutcome, ScrollSurface, ScrollerConfig, VirtualSurface,
};

use crate::SimulateArgs;

const MAX_SETTLE_FRAMES: usize = 1_000;
const DERIVED_SETTLE_MS: u64 = 120;

type Strip = InfiniteScroller<VirtualSurface, ManualScheduler>;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Placed { position: f32, segment: f32 },
    Step { step: usize, position: f32, card: Option<usize> },
    Teleport { step: usize, correction: Correction },
    Resized { item_width: f32, outcome: ResizeOutcome, position: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub config: ScrollerConfig,
    pub events: Vec<Event>,
    pub final_position: f32,
    pub final_card: Option<usize>,
}

impl Report {
    pub fn teleports(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, Event::Teleport { .. }))
            .count()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "threshold {:.1}px, step {:.1}px",
            self.config.threshold_px, self.config.step_px
        )?;
        for event in &self.events {
            match event {
                Event::Placed { position, segment } => writeln!(
                    f,
                    "placed at {position:.1} (segment {segment:.1})"
                )?,
                Event::Step { step, position, card } => {
                    write!(f, "step {step:>3}  position {position:>8.1}")?;
                    match card {
                        Some(card) => writeln!(f, "  card {card}")?,
                        None => writeln!(f)?,
                    }
                }
                Event::Teleport { step, correction } => {
                    let direction = match correction.direction {
                        Direction::Forward => "forward",
                        Direction::Backward => "backward",
                    };
                    writeln!(
                        f,
                        "teleport {direction} {:.1} -> {:.1} \
                         during step {step}",
                        correction.from,
                        correction.target
                    )?
                }
                Event::Resized {
                    item_width,
                    outcome,
                    position,
                } => {
                    let (verb, segment) = match outcome {
                        ResizeOutcome::Kept { segment } => ("kept", segment),
                        ResizeOutcome::Recentered { segment } => {
                            ("recentered", segment)
                        }
                    };
                    writeln!(
                        f,
                        "resized cards to {item_width:.1}px: \
                         {verb} at {position:.1} (segment {segment:.1})"
                    )?
                }
            }
        }
        writeln!(
            f,
            "{} teleports, final position {:.1}",
            self.teleports(),
            self.final_position
        )
    }
}

pub fn run(args: &SimulateArgs) -> Result<Report> {
    ensure!(args.items > 0, "--items must be at least 1");
    ensure!(
        args.item_width > 0.0 && args.spacing >= 0.0 && args.viewport > 0.0,
        "card width and viewport must be positive and spacing non-negative"
    );

    let config = match &args.config {
        Some(path) => load_explicit(path)?.config,
        None => derived_config(args.item_width + args.spacing),
    };
    log::debug!("simulating {} items with {config:?}", args.items);

    let surface = VirtualSurface::new(
        args.items,
        args.item_width,
        args.spacing,
        args.viewport,
    );
    let mut host = Host::new(config, args.items, surface);
    host.settle(0)?;
    let placed = host.surface()?.position();
    let segment = host.scroller.state().segment().unwrap_or_default();
    host.events.push(Event::Placed {
        position: placed,
        segment,
    });

    let resize_after = args.resize_to.map(|width| (args.steps / 2, width));
    for step in 1..=args.steps {
        let moved = if args.reverse {
            host.scroller.retreat_step()
        } else {
            host.scroller.advance_step()
        };
        moved.with_context(|| format!("step {step} rejected"))?;
        host.drain_events(step);
        host.settle(step)?;

        let surface = host.surface()?;
        let sample = Event::Step {
            step,
            position: surface.position(),
            card: surface.leading_item(),
        };
        host.events.push(sample);

        if let Some((at, item_width)) = resize_after
            && at == step
        {
            host.resize(step, item_width)?;
        }
    }

    let surface = host.surface()?;
    let final_position = surface.position();
    let final_card = surface.leading_item();
    Ok(Report {
        config,
        events: host.events,
        final_position,
        final_card,
    })
}

/// Config for a run without a file: trigger a third of a card inside the
/// edges, step one card per command.
fn derived_config(stride: f32) -> ScrollerConfig {
    ScrollerConfig::new(stride / 3.0, DERIVED_SETTLE_MS, stride)
}

struct Host {
    scroller: Strip,
    frame: Duration,
    events: Vec<Event>,
}

impl Host {
    fn new(
        config: ScrollerConfig,
        items: usize,
        surface: VirtualSurface,
    ) -> Self {
        let mut scroller =
            InfiniteScroller::new(config, items, ManualScheduler::new());
        scroller.mount(surface);
        Self {
            scroller,
            frame: config.frame_interval().max(Duration::from_millis(1)),
            events: Vec::new(),
        }
    }

    fn surface(&self) -> Result<&VirtualSurface> {
        self.scroller.surface().context("strip surface is not mounted")
    }

    fn surface_mut(&mut self) -> Result<&mut VirtualSurface> {
        self.scroller
            .surface_mut()
            .context("strip surface is not mounted")
    }

    fn drain_events(&mut self, step: usize) {
        loop {
            let Some(surface) = self.scroller.surface_mut() else {
                return;
            };
            let pending = surface.take_events();
            if pending.is_empty() {
                return;
            }
            for reported in pending {
                if let Observation::Corrected(correction) =
                    self.scroller.on_position_changed(reported)
                {
                    self.events.push(Event::Teleport { step, correction });
                }
            }
        }
    }

    fn frame(&mut self, step: usize) -> Result<()> {
        let dt = self.frame;
        self.surface_mut()?.tick(dt);
        self.drain_events(step);
        self.scroller.run_frame();
        self.scroller.advance_clock(dt);
        Ok(())
    }

    fn settle(&mut self, step: usize) -> Result<()> {
        for _ in 0..MAX_SETTLE_FRAMES {
            self.frame(step)?;
            let idle = !self.surface()?.is_animating()
                && self.scroller.state().phase() == Phase::Ready
                && !self.scroller.state().is_repositioning();
            if idle {
                return Ok(());
            }
        }
        bail!("strip did not come to rest within {MAX_SETTLE_FRAMES} frames")
    }

    fn resize(&mut self, step: usize, item_width: f32) -> Result<()> {
        ensure!(item_width > 0.0, "--resize-to must be positive");
        self.surface_mut()?.set_item_width(item_width);
        let outcome = self
            .scroller
            .on_resize()
            .context("strip could not be re-measured")?;
        self.settle(step)?;
        let position = self.surface()?.position();
        self.events.push(Event::Resized {
            item_width,
            outcome,
            position,
        });
        Ok(())
    }
}
