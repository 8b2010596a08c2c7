//! Stack Arena - headless round runner
//!
//! Run with: `cargo run --bin stack_arena -- --mode event --drops 6`
//!
//! Drops a column of solids onto the table, plays one full round on the
//! built-in physics and logs the result. Useful for tuning config files
//! without a renderer.
//!
//! Logging follows `RUST_LOG` (default `info`); `RUST_LOG=debug` shows gusts.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glam::Vec3;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use stack_tok_engine::game::{Preferences, RoundMode, SandboxConfig, StackSession};

/// Frame time used to drive the session
const FRAME_DT: f32 = 1.0 / 60.0;

/// Seconds to wait between scripted drops
const DROP_SPACING_SECS: f32 = 1.5;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ModeArg {
    TimeAttack,
    Event,
}

impl From<ModeArg> for RoundMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::TimeAttack => RoundMode::TimeAttack,
            ModeArg::Event => RoundMode::Event,
        }
    }
}

/// Headless block-stacking round
#[derive(Parser, Debug)]
#[command(name = "stack_arena", version, about, long_about = None)]
struct Cli {
    /// Sandbox config (JSON); defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Round mode
    #[arg(short, long, value_enum, default_value = "time-attack")]
    mode: ModeArg,

    /// Player preferences (JSON); created when missing
    #[arg(short, long)]
    prefs: Option<PathBuf>,

    /// Number of solids to stack
    #[arg(short, long, default_value = "5")]
    drops: u32,

    /// Fixed wind seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        error!(error = %err, "stack_arena failed");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), stack_tok_engine::game::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => SandboxConfig::load(path)?,
        None => SandboxConfig::default(),
    };
    if cli.seed.is_some() {
        config.wind.seed = cli.seed;
    }

    let mut prefs = match &cli.prefs {
        Some(path) => Preferences::load(path)?,
        None => Preferences::default(),
    };
    if !prefs.has_nickname() {
        prefs.set_nickname("builder");
    }
    info!(player = %prefs.nickname, "welcome to the stack arena");

    let mut session = StackSession::with_simple_world(&config);
    session.set_mode(cli.mode.into());
    session.set_color(prefs.color_index);
    session.hover(Vec3::ZERO);
    session.start();

    let frames_between_drops = (DROP_SPACING_SECS / FRAME_DT).round() as u32;
    let mut drops_left = cli.drops;
    let mut frame: u32 = 0;
    let mut gusts = 0u32;

    let outcome = loop {
        if drops_left > 0 && frame % frames_between_drops == 0 {
            if let Some(Err(err)) = session.drop_at_hover() {
                warn!(error = %err, "scripted drop failed");
            }
            drops_left -= 1;
            session.cycle_shape();
        }

        let report = session.update(FRAME_DT);
        if report.gust.is_some() {
            gusts += 1;
        }
        if let Some(outcome) = report.finished {
            break outcome;
        }

        frame += 1;
        if frame % 600 == 0 {
            let snapshot = session.snapshot();
            info!(
                remaining = %snapshot.remaining_label,
                height = snapshot.running_max,
                solids = snapshot.entity_count,
                "progress"
            );
        }
    };

    info!(
        mode = outcome.mode.name(),
        height = outcome.round_max,
        best = outcome.best_height,
        record = outcome.new_record,
        gusts,
        "round over"
    );

    if let Some(path) = &cli.prefs {
        prefs.save(path)?;
    }
    Ok(())
}
