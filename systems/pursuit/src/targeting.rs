//! Identity-specific chase targets.

use maze_chase_core::{PursuerIdentity, TargetTile, TileCoord};

/// At or beyond this many tiles from the player the straggler heads for its corner.
const STRAGGLER_RADIUS: i64 = 8;

/// Offset, in tiles, that the ambusher leads the player by on each axis.
const AMBUSH_LEAD: i32 = 4;

/// Inputs shared by every chase target function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChaseContext {
    /// Player tile after this tick's move.
    pub player: TileCoord,
    /// Tile the deciding pursuer occupies.
    pub own: TileCoord,
    /// Scatter corner of the deciding pursuer.
    pub scatter_corner: TileCoord,
    /// Scatter corner of the leader.
    pub leader_corner: TileCoord,
}

/// Signature shared by the chase target functions.
pub type ChaseTargetFn = fn(&ChaseContext) -> TargetTile;

/// Looks up the chase target function for `identity`.
#[must_use]
pub fn chase_target(identity: PursuerIdentity) -> ChaseTargetFn {
    match identity {
        PursuerIdentity::Leader => leader,
        PursuerIdentity::Ambusher => ambusher,
        PursuerIdentity::Flanker => flanker,
        PursuerIdentity::Straggler => straggler,
    }
}

fn leader(context: &ChaseContext) -> TargetTile {
    context.player.as_target()
}

fn ambusher(context: &ChaseContext) -> TargetTile {
    let player = context.player.as_target();
    TargetTile::new(player.row() - AMBUSH_LEAD, player.column() + AMBUSH_LEAD)
}

fn flanker(context: &ChaseContext) -> TargetTile {
    let player = context.player.as_target();
    let anchor = context.leader_corner.as_target();
    TargetTile::new(
        2 * player.row() - anchor.row(),
        2 * player.column() - anchor.column(),
    )
}

fn straggler(context: &ChaseContext) -> TargetTile {
    let player = context.player.as_target();
    if player.distance_squared_to(context.own) >= STRAGGLER_RADIUS * STRAGGLER_RADIUS {
        context.scatter_corner.as_target()
    } else {
        player
    }
}
