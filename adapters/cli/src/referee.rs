//! Collision and scoring collaborator that inspects the world after every tick.

use maze_chase_core::{
    CollectibleKind, Event, Position, PursuerIdentity, PursuerState,
};
use maze_chase_system_scheduler::{Simulation, Trigger};
use maze_chase_world::{query, TileKind};
use tracing::info;

const COLLECTIBLE_POINTS: u64 = 10;
const POWER_COLLECTIBLE_POINTS: u64 = 50;
const CATCH_POINTS: u64 = 200;

/// How a tick ended from the referee's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Verdict {
    Continue,
    PlayerCaught(PursuerIdentity),
    MazeCleared,
}

/// Keeps the score and turns positions into triggers.
#[derive(Debug, Default)]
pub(crate) struct Referee {
    score: u64,
    catches: u32,
}

impl Referee {
    pub(crate) fn score(&self) -> u64 {
        self.score
    }

    pub(crate) fn catches(&self) -> u32 {
        self.catches
    }

    /// Eats whatever lies under the player, then resolves player/pursuer contact.
    pub(crate) fn judge(&mut self, simulation: &mut Simulation) -> Verdict {
        self.eat(simulation);

        let world = simulation.world();
        let player = query::player(world).position;
        let tile_units = query::motion_grid(world).tile_units();
        let contacts: Vec<_> = query::pursuer_view(world)
            .iter()
            .filter(|pursuer| touching(player, pursuer.position, tile_units))
            .map(|pursuer| (pursuer.identity, pursuer.state))
            .collect();

        for (identity, state) in contacts {
            match state {
                PursuerState::Frightened => {
                    let events = simulation.trigger(Trigger::Catch(identity));
                    if !events.is_empty() {
                        self.score += CATCH_POINTS;
                        self.catches += 1;
                        info!(pursuer = ?identity, score = self.score, "pursuer caught");
                    }
                }
                PursuerState::Scatter | PursuerState::Chase => {
                    return Verdict::PlayerCaught(identity);
                }
                PursuerState::Retreating => {}
            }
        }

        if query::maze(simulation.world()).remaining_collectibles() == 0 {
            return Verdict::MazeCleared;
        }
        Verdict::Continue
    }

    fn eat(&mut self, simulation: &mut Simulation) {
        let world = simulation.world();
        let tile = query::player(world).tile;
        if !matches!(
            query::maze(world).tile_kind(tile),
            TileKind::Collectible | TileKind::PowerCollectible
        ) {
            return;
        }

        for event in simulation.trigger(Trigger::ConsumeCollectible(tile)) {
            let Event::CollectibleConsumed { kind, .. } = event else {
                continue;
            };
            match kind {
                CollectibleKind::Regular => self.score += COLLECTIBLE_POINTS,
                CollectibleKind::Power => {
                    self.score += POWER_COLLECTIBLE_POINTS;
                    let targets: Vec<_> = query::pursuer_view(simulation.world())
                        .iter()
                        .filter(|pursuer| pursuer.state != PursuerState::Retreating)
                        .map(|pursuer| pursuer.identity)
                        .collect();
                    for identity in targets {
                        let _ = simulation.trigger(Trigger::Frighten(identity));
                    }
                    info!(score = self.score, "power collectible eaten");
                }
            }
        }
    }
}

/// Contact means the reference corners are closer than three quarters of a tile.
fn touching(a: Position, b: Position, tile_units: u32) -> bool {
    let dx = i64::from(a.x()) - i64::from(b.x());
    let dy = i64::from(a.y()) - i64::from(b.y());
    let tile = i64::from(tile_units);
    16 * (dx * dx + dy * dy) < 9 * tile * tile
}
