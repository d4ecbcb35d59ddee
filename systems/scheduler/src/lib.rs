#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-tick pump that runs the mode clock, the player and the pursuers in order.

use std::time::Duration;

use maze_chase_core::{Command, ConfigurationError, Event, Heading, PursuerIdentity, TileCoord};
use maze_chase_system_mode_clock::ModeClock;
use maze_chase_system_player_control::PlayerControl;
use maze_chase_system_pursuit::Pursuit;
use maze_chase_world::{self as world, query, SimulationConfig, World};
use tracing::trace;

/// Triggers raised by the collision collaborator outside the tick pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// A power-collectible was eaten; the pursuer becomes frightened.
    Frighten(PursuerIdentity),
    /// The player touched a frightened pursuer.
    Catch(PursuerIdentity),
    /// The player ate whatever lies on the tile.
    ConsumeCollectible(TileCoord),
}

impl From<Trigger> for Command {
    fn from(trigger: Trigger) -> Self {
        match trigger {
            Trigger::Frighten(pursuer) => Command::Frighten { pursuer },
            Trigger::Catch(pursuer) => Command::Catch { pursuer },
            Trigger::ConsumeCollectible(tile) => Command::ConsumeCollectible { tile },
        }
    }
}

/// Owns the world and every system, stepping them strictly in sequence.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    mode_clock: ModeClock,
    player_control: PlayerControl,
    pursuit: Pursuit,
}

impl Simulation {
    /// Validates the configuration and assembles the world and its systems.
    pub fn new(config: &SimulationConfig) -> Result<Self, ConfigurationError> {
        let world = World::from_config(config)?;
        Ok(Self {
            world,
            mode_clock: ModeClock::new(config.mode_durations()),
            player_control: PlayerControl,
            pursuit: Pursuit::new(config.rng_seed),
        })
    }

    /// Read-only access to the authoritative world for queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Runs one simulation step at the monotonic timestamp `now`.
    ///
    /// `wished` replaces the buffered player heading when present. The returned
    /// events are in application order: clock, player, then pursuers.
    pub fn tick(&mut self, now: Duration, wished: Option<Heading>) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.world, Command::Tick { now }, &mut events);

        let mut commands = Vec::new();
        self.mode_clock.handle(&events, &mut commands);
        self.apply_all(&mut commands, &mut events);

        if let Some(heading) = wished {
            world::apply(
                &mut self.world,
                Command::WishHeading { heading },
                &mut events,
            );
        }

        self.player_control.handle(
            &events,
            &query::player(&self.world),
            query::maze(&self.world),
            &mut commands,
        );
        self.apply_all(&mut commands, &mut events);

        let player_tile = query::player(&self.world).tile;
        self.pursuit.handle(
            &events,
            player_tile,
            query::leader_corner(&self.world),
            &query::pursuer_view(&self.world),
            query::maze(&self.world),
            &mut commands,
        );
        self.apply_all(&mut commands, &mut events);

        trace!(tick = query::tick_index(&self.world), events = events.len(), "tick complete");
        events
    }

    /// Forwards an external trigger to the world.
    pub fn trigger(&mut self, trigger: Trigger) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.world, trigger.into(), &mut events);
        events
    }

    fn apply_all(&mut self, commands: &mut Vec<Command>, events: &mut Vec<Event>) {
        for command in commands.drain(..) {
            world::apply(&mut self.world, command, events);
        }
    }
}
