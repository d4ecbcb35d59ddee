#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Chase.

mod config;
mod maze;
mod motion;

use std::time::Duration;

use maze_chase_core::{
    Command, ConfigurationError, Event, Heading, Phase, PursuerIdentity, PursuerState, TileCoord,
    WELCOME_BANNER,
};
use tracing::{debug, trace};

pub use config::{PursuerConfig, SimulationConfig, REFERENCE_LAYOUT};
pub use maze::{Maze, TileKind};
pub use motion::{Actor, MotionGrid};

/// Represents the authoritative Maze Chase world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    maze: Maze,
    grid: MotionGrid,
    phase: Phase,
    now: Duration,
    fright_duration: Duration,
    player: Actor,
    pursuers: Vec<Pursuer>,
    tick_index: u64,
}

impl World {
    /// Builds a world from validated configuration. Every pursuer starts in scatter.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigurationError> {
        let maze = config.build_maze()?;
        let grid = MotionGrid::new(config.tile_units, maze.rows(), maze.columns());
        let player = Actor::spawn(&grid, config.player_start, Heading::None, config.player_speed);
        let mut pursuers: Vec<Pursuer> = config
            .pursuers
            .iter()
            .map(|pursuer| Pursuer::from_config(&grid, pursuer))
            .collect();
        pursuers.sort_by_key(|pursuer| pursuer.identity);

        debug!(
            rows = maze.rows(),
            columns = maze.columns(),
            pursuers = pursuers.len(),
            "world configured"
        );

        Ok(Self {
            banner: WELCOME_BANNER,
            maze,
            grid,
            phase: Phase::Scatter,
            now: Duration::ZERO,
            fright_duration: config.fright_duration(),
            player,
            pursuers,
            tick_index: 0,
        })
    }

    fn pursuer_mut(&mut self, identity: PursuerIdentity) -> Option<&mut Pursuer> {
        self.pursuers
            .iter_mut()
            .find(|pursuer| pursuer.identity == identity)
    }

    fn expire_frights(&mut self, out_events: &mut Vec<Event>) {
        let now = self.now;
        let phase = self.phase;
        for pursuer in &mut self.pursuers {
            let expired = pursuer
                .frightened_until
                .is_some_and(|until| now >= until);
            if pursuer.state == PursuerState::Frightened && expired {
                pursuer.transition(PursuerState::from_phase(phase), out_events);
            }
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { now } => {
            world.tick_index = world.tick_index.saturating_add(1);
            world.now = now;
            out_events.push(Event::TimeAdvanced { now });
            world.expire_frights(out_events);
        }
        Command::SetPhase { phase } => {
            if world.phase == phase {
                return;
            }
            world.phase = phase;
            out_events.push(Event::PhaseChanged { phase });
            debug!(?phase, "phase changed");

            let state = PursuerState::from_phase(phase);
            for pursuer in &mut world.pursuers {
                if pursuer.state.is_clock_driven() {
                    pursuer.transition(state, out_events);
                }
            }
        }
        Command::WishHeading { heading } => {
            world.player.set_wished(heading);
        }
        Command::SteerPlayer { heading } => {
            if !world.player.at_boundary(&world.grid) {
                trace!(?heading, "player steering ignored mid-tile");
                return;
            }
            let from = world.player.heading();
            if from != heading {
                world.player.set_heading(heading);
                out_events.push(Event::PlayerHeadingChanged { from, to: heading });
            }
        }
        Command::AdvancePlayer => {
            if let Some(tile) = world.player.step(&world.grid) {
                out_events.push(Event::PlayerEnteredTile { tile });
            }
        }
        Command::SteerPursuer { pursuer, heading } => {
            let grid = world.grid;
            let Some(entry) = world.pursuer_mut(pursuer) else {
                return;
            };
            if !entry.actor.at_boundary(&grid) {
                trace!(?pursuer, ?heading, "pursuer steering ignored mid-tile");
                return;
            }
            entry.turn(heading, out_events);
        }
        Command::AdvancePursuer { pursuer } => {
            let grid = world.grid;
            if let Some(entry) = world.pursuer_mut(pursuer) {
                if let Some(tile) = entry.actor.step(&grid) {
                    out_events.push(Event::PursuerEnteredTile { pursuer, tile });
                }
            }
        }
        Command::Frighten { pursuer } => {
            let until = world.now.saturating_add(world.fright_duration);
            let Some(entry) = world.pursuer_mut(pursuer) else {
                return;
            };
            if entry.state == PursuerState::Retreating {
                debug!(?pursuer, "retreating pursuer ignores fright");
                return;
            }
            entry.frightened_until = Some(until);
            entry.transition(PursuerState::Frightened, out_events);
            let reversed = entry.actor.heading().opposite();
            entry.turn(reversed, out_events);
        }
        Command::Catch { pursuer } => {
            let Some(entry) = world.pursuer_mut(pursuer) else {
                return;
            };
            if entry.state != PursuerState::Frightened {
                debug!(?pursuer, state = ?entry.state, "catch ignored");
                return;
            }
            entry.transition(PursuerState::Retreating, out_events);
        }
        Command::ReturnHome { pursuer } => {
            let grid = world.grid;
            let phase = world.phase;
            let Some(entry) = world.pursuer_mut(pursuer) else {
                return;
            };
            let at_home = entry.actor.at_boundary(&grid) && entry.actor.tile(&grid) == entry.home;
            if entry.state != PursuerState::Retreating || !at_home {
                debug!(?pursuer, state = ?entry.state, "return home ignored");
                return;
            }
            entry.transition(PursuerState::from_phase(phase), out_events);
        }
        Command::ConsumeCollectible { tile } => {
            if let Some(kind) = world.maze.take_collectible(tile) {
                out_events.push(Event::CollectibleConsumed { tile, kind });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use maze_chase_core::{
        Phase, PlayerSnapshot, PursuerIdentity, PursuerSnapshot, PursuerView, TileCoord,
    };

    use super::{Maze, MotionGrid, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the maze graph.
    #[must_use]
    pub fn maze(world: &World) -> &Maze {
        &world.maze
    }

    /// Geometry that maps positions onto tiles.
    #[must_use]
    pub fn motion_grid(world: &World) -> &MotionGrid {
        &world.grid
    }

    /// Shared phase most recently published by the mode clock.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.phase
    }

    /// Timestamp of the most recent tick.
    #[must_use]
    pub fn now(world: &World) -> Duration {
        world.now
    }

    /// Number of ticks applied so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Captures the player's state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        let actor = &world.player;
        PlayerSnapshot {
            position: actor.position(),
            tile: actor.tile(&world.grid),
            heading: actor.heading(),
            wished: actor.wished(),
            at_boundary: actor.at_boundary(&world.grid),
        }
    }

    /// Captures a read-only view of every pursuer.
    #[must_use]
    pub fn pursuer_view(world: &World) -> PursuerView {
        PursuerView::from_snapshots(
            world
                .pursuers
                .iter()
                .map(|pursuer| PursuerSnapshot {
                    identity: pursuer.identity,
                    position: pursuer.actor.position(),
                    tile: pursuer.actor.tile(&world.grid),
                    heading: pursuer.actor.heading(),
                    state: pursuer.state,
                    at_boundary: pursuer.actor.at_boundary(&world.grid),
                    scatter_corner: pursuer.scatter_corner,
                    home: pursuer.home,
                    frightened_until: pursuer.frightened_until,
                })
                .collect(),
        )
    }

    /// Scatter corner of the leader, which anchors the flanker's chase target.
    ///
    /// Falls back to the top-right corner when the roster has no leader.
    #[must_use]
    pub fn leader_corner(world: &World) -> TileCoord {
        world
            .pursuers
            .iter()
            .find(|pursuer| pursuer.identity == PursuerIdentity::Leader)
            .map_or_else(
                || TileCoord::new(0, world.maze.columns().saturating_sub(1)),
                |leader| leader.scatter_corner,
            )
    }
}

#[derive(Clone, Debug)]
struct Pursuer {
    identity: PursuerIdentity,
    actor: Actor,
    state: PursuerState,
    frightened_until: Option<Duration>,
    scatter_corner: TileCoord,
    home: TileCoord,
}

impl Pursuer {
    fn from_config(grid: &MotionGrid, config: &PursuerConfig) -> Self {
        Self {
            identity: config.identity,
            actor: Actor::spawn(grid, config.spawn, config.heading, config.speed),
            state: PursuerState::Scatter,
            frightened_until: None,
            scatter_corner: config.scatter_corner,
            home: config.home,
        }
    }

    fn transition(&mut self, to: PursuerState, out_events: &mut Vec<Event>) {
        if to != PursuerState::Frightened {
            self.frightened_until = None;
        }

        let from = self.state;
        if from == to {
            return;
        }
        self.state = to;
        debug!(pursuer = ?self.identity, ?from, ?to, "pursuer state changed");
        out_events.push(Event::PursuerStateChanged {
            pursuer: self.identity,
            from,
            to,
        });
    }

    fn turn(&mut self, heading: Heading, out_events: &mut Vec<Event>) {
        let from = self.actor.heading();
        if from == heading {
            return;
        }
        self.actor.set_heading(heading);
        out_events.push(Event::PursuerHeadingChanged {
            pursuer: self.identity,
            from,
            to: heading,
        });
    }
}
