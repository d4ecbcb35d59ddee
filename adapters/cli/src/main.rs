#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Maze Chase session.

mod autopilot;
mod referee;
mod settings;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use maze_chase_system_scheduler::Simulation;
use maze_chase_world::query;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{autopilot::Autopilot, referee::Verdict};

const TICKS_PER_SECOND: u64 = 60;

/// Headless Maze Chase host driven by a seeded autopilot.
#[derive(Debug, Parser)]
#[command(name = "maze-chase", version)]
#[command(about = "Run a deterministic Maze Chase session without rendering")]
struct Cli {
    /// TOML file overriding the reference simulation configuration.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Upper bound on the session length in simulated seconds.
    #[arg(long, default_value_t = 120)]
    seconds: u64,
    /// Seed for the input autopilot.
    #[arg(long, default_value_t = 1)]
    autopilot_seed: u64,
    /// Ticks between autopilot heading changes.
    #[arg(long, default_value_t = 45)]
    turn_every: u64,
    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    dump_config: bool,
}

/// Entry point for the Maze Chase command-line interface.
fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("maze_chase=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let config = settings::load(cli.config.as_deref())?;
    if cli.dump_config {
        print!("{}", settings::render(&config)?);
        return Ok(());
    }

    let mut simulation =
        Simulation::new(&config).context("simulation configuration is invalid")?;
    println!("{}", query::welcome_banner(simulation.world()));

    let mut autopilot = Autopilot::new(cli.autopilot_seed, cli.turn_every);
    let mut referee = referee::Referee::default();
    let last_tick = cli.seconds.saturating_mul(TICKS_PER_SECOND);
    let mut verdict = Verdict::Continue;
    let mut tick = 0;

    while tick < last_tick && verdict == Verdict::Continue {
        tick += 1;
        let _ = simulation.tick(timestamp(tick), autopilot.wish(tick));
        verdict = referee.judge(&mut simulation);

        if tick % TICKS_PER_SECOND == 0 {
            let world = simulation.world();
            info!(
                second = tick / TICKS_PER_SECOND,
                score = referee.score(),
                phase = ?query::phase(world),
                player = ?query::player(world).tile,
                remaining = query::maze(world).remaining_collectibles(),
                "session progress"
            );
        }
    }

    let outcome = match verdict {
        Verdict::Continue => "time limit reached".to_owned(),
        Verdict::PlayerCaught(pursuer) => format!("caught by {pursuer:?}"),
        Verdict::MazeCleared => "maze cleared".to_owned(),
    };
    info!(ticks = tick, score = referee.score(), %outcome, "session finished");

    println!("ticks:      {tick}");
    println!("score:      {}", referee.score());
    println!("catches:    {}", referee.catches());
    println!("outcome:    {outcome}");
    println!(
        "remaining:  {}",
        query::maze(simulation.world()).remaining_collectibles()
    );
    Ok(())
}

/// Fixed-step clock: tick `n` happens `n / 60` seconds into the session.
fn timestamp(tick: u64) -> Duration {
    Duration::from_nanos(tick.saturating_mul(1_000_000_000) / TICKS_PER_SECOND)
}
