#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Player direction resolver that commits buffered input at tile boundaries.

use maze_chase_core::{Command, Event, Heading, PlayerSnapshot};
use maze_chase_world::Maze;
use tracing::trace;

/// Pure system that steers and advances the player once per tick.
#[derive(Debug, Default)]
pub struct PlayerControl;

impl PlayerControl {
    /// Emits the steering and movement commands for the current tick.
    ///
    /// Does nothing unless `events` contains a [`Event::TimeAdvanced`], so the
    /// player moves exactly once per simulation step.
    pub fn handle(
        &self,
        events: &[Event],
        player: &PlayerSnapshot,
        maze: &Maze,
        out: &mut Vec<Command>,
    ) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        let heading = resolve_heading(player, maze);
        if heading != player.heading {
            trace!(tile = ?player.tile, from = ?player.heading, to = ?heading, "player turns");
            out.push(Command::SteerPlayer { heading });
        }
        out.push(Command::AdvancePlayer);
    }
}

/// Heading the player should carry after this tick's boundary check.
///
/// Mid-tile the current heading is kept. At a boundary the wished heading wins
/// when it leads to an open tile; otherwise a heading that now faces a wall
/// stops the player.
#[must_use]
pub fn resolve_heading(player: &PlayerSnapshot, maze: &Maze) -> Heading {
    if !player.at_boundary {
        return player.heading;
    }

    let mut heading = player.heading;
    if maze.can_move(player.tile, player.wished) {
        heading = player.wished;
    }
    if !maze.can_move(player.tile, heading) {
        heading = Heading::None;
    }
    heading
}
