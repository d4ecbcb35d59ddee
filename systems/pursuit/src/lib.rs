#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pursuer decision engine: per-identity targeting and boundary heading choice.

mod targeting;

use maze_chase_core::{
    Command, Event, Heading, PursuerSnapshot, PursuerState, PursuerView, TargetTile, TileCoord,
};
use maze_chase_world::Maze;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::trace;

pub use targeting::{chase_target, ChaseContext, ChaseTargetFn};

/// Pure system that steers every pursuer once per tick.
#[derive(Debug)]
pub struct Pursuit {
    rng: ChaCha8Rng,
}

impl Pursuit {
    /// Creates the system with a seeded generator for frightened targets.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Emits steering and movement commands for every pursuer in roster order.
    ///
    /// `player_tile` must be the player's tile after this tick's move.
    pub fn handle(
        &mut self,
        events: &[Event],
        player_tile: TileCoord,
        leader_corner: TileCoord,
        pursuers: &PursuerView,
        maze: &Maze,
        out: &mut Vec<Command>,
    ) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        for pursuer in pursuers.iter() {
            if pursuer.at_boundary {
                if pursuer.state == PursuerState::Retreating && pursuer.tile == pursuer.home {
                    out.push(Command::ReturnHome {
                        pursuer: pursuer.identity,
                    });
                }

                let target = self.target_for(pursuer, player_tile, leader_corner, maze);
                let heading = choose_direction(maze, pursuer.tile, pursuer.heading, target);
                trace!(
                    pursuer = ?pursuer.identity,
                    state = ?pursuer.state,
                    tile = ?pursuer.tile,
                    ?target,
                    ?heading,
                    "pursuer decision"
                );
                if heading != pursuer.heading {
                    out.push(Command::SteerPursuer {
                        pursuer: pursuer.identity,
                        heading,
                    });
                }
            }

            out.push(Command::AdvancePursuer {
                pursuer: pursuer.identity,
            });
        }
    }

    fn target_for(
        &mut self,
        pursuer: &PursuerSnapshot,
        player_tile: TileCoord,
        leader_corner: TileCoord,
        maze: &Maze,
    ) -> TargetTile {
        match pursuer.state {
            PursuerState::Scatter => pursuer.scatter_corner.as_target(),
            PursuerState::Chase => {
                let context = ChaseContext {
                    player: player_tile,
                    own: pursuer.tile,
                    scatter_corner: pursuer.scatter_corner,
                    leader_corner,
                };
                chase_target(pursuer.identity)(&context)
            }
            PursuerState::Frightened => {
                let row = self.rng.gen_range(0..maze.rows().max(1));
                let column = self.rng.gen_range(0..maze.columns().max(1));
                TileCoord::new(row, column).as_target()
            }
            PursuerState::Retreating => pursuer.home.as_target(),
        }
    }
}

/// Picks the heading a pursuer takes on leaving `tile`.
///
/// Candidates are the open neighbours in up, left, right, down order, minus the
/// reverse of `heading`. With no candidate left the pursuer reverses. Otherwise
/// the candidate closest to `target` wins and ties go to the earliest candidate.
#[must_use]
pub fn choose_direction(
    maze: &Maze,
    tile: TileCoord,
    heading: Heading,
    target: TargetTile,
) -> Heading {
    let reverse = heading.opposite();
    Heading::ARCADE_ORDER
        .into_iter()
        .filter(|&candidate| candidate != reverse)
        .filter_map(|candidate| {
            maze.neighbor(tile, candidate)
                .map(|next| (candidate, target.distance_squared_to(next)))
        })
        .min_by_key(|&(_, distance)| distance)
        .map_or(reverse, |(candidate, _)| candidate)
}
