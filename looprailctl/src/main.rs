use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use env_logger::{Builder, Target};
use log::LevelFilter;

mod check;
mod simulate;

#[derive(Parser)]
#[command(
    name = "looprailctl",
    version,
    about = "Inspect looprail configs and simulate the looping strip"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load and validate a scroller config, then print the effective values
    Check {
        /// Config file (TOML or JSON). Defaults to the environment and the
        /// standard search paths.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Drive a headless strip with step commands and report every teleport
    Simulate(SimulateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Number of logical items in the sequence
    #[arg(long)]
    pub items: usize,
    /// Card width in pixels
    #[arg(long)]
    pub item_width: f32,
    /// Gap after each card in pixels
    #[arg(long, default_value_t = 0.0)]
    pub spacing: f32,
    /// Viewport width in pixels
    #[arg(long)]
    pub viewport: f32,
    /// Number of step commands to issue
    #[arg(long, default_value_t = 12)]
    pub steps: usize,
    /// Step backward instead of forward
    #[arg(long)]
    pub reverse: bool,
    /// Config file (TOML or JSON); derived from the card stride when absent
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Change the card width to this many pixels halfway through the run
    #[arg(long)]
    pub resize_to: Option<f32>,
}

fn init_logger() {
    Builder::new()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .filter_module("looprail_core", LevelFilter::Debug)
        .filter_module("looprail_config", LevelFilter::Debug)
        .init();
}

fn main() -> Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let cli = Cli::parse();
    match cli.command {
        Command::Check { config } => check::run(config.as_deref()),
        Command::Simulate(args) => {
            let report = simulate::run(&args)?;
            print!("{report}");
            Ok(())
        }
    }
}
