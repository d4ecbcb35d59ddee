//! Continuous actor motion over the tile grid.

use maze_chase_core::{Heading, Position, TileCoord};

/// Fixed-point geometry that maps continuous positions onto maze tiles.
///
/// Positions are integers measured in sub-tile units and every configured
/// speed divides the tile size, so boundary checks are exact and never drift.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MotionGrid {
    tile_units: i32,
    width: i32,
    height: i32,
}

impl MotionGrid {
    /// Creates the geometry for a maze of the provided dimensions.
    #[must_use]
    pub fn new(tile_units: u32, rows: u32, columns: u32) -> Self {
        let tile_units = i32::try_from(tile_units).unwrap_or(i32::MAX).max(1);
        Self {
            tile_units,
            width: span(tile_units, columns),
            height: span(tile_units, rows),
        }
    }

    /// Side length of one tile in sub-tile units.
    #[must_use]
    pub const fn tile_units(&self) -> u32 {
        self.tile_units.unsigned_abs()
    }

    /// Reference corner of the tile.
    #[must_use]
    pub fn position_of(&self, tile: TileCoord) -> Position {
        let column = i32::try_from(tile.column()).unwrap_or(i32::MAX);
        let row = i32::try_from(tile.row()).unwrap_or(i32::MAX);
        Position::new(
            column.saturating_mul(self.tile_units),
            row.saturating_mul(self.tile_units),
        )
    }

    /// Tile containing the position's reference corner.
    #[must_use]
    pub fn tile_of(&self, position: Position) -> TileCoord {
        let wrapped = self.wrap(position);
        TileCoord::new(
            (wrapped.y() / self.tile_units).unsigned_abs(),
            (wrapped.x() / self.tile_units).unsigned_abs(),
        )
    }

    /// Reports whether both coordinates sit exactly on the tile grid.
    #[must_use]
    pub fn is_boundary(&self, position: Position) -> bool {
        position.x().rem_euclid(self.tile_units) == 0
            && position.y().rem_euclid(self.tile_units) == 0
    }

    /// Folds a position back onto the maze.
    ///
    /// Leaving through the left edge re-enters one tile-width in from the
    /// right edge and vice versa; rows fold the same way so stepping stays
    /// total even for actors driven off the top or bottom.
    #[must_use]
    pub fn wrap(&self, position: Position) -> Position {
        Position::new(
            position.x().rem_euclid(self.width),
            position.y().rem_euclid(self.height),
        )
    }
}

fn span(tile_units: i32, count: u32) -> i32 {
    i32::try_from(count)
        .unwrap_or(i32::MAX)
        .saturating_mul(tile_units)
        .max(tile_units)
}

/// Moving body shared by the player and the pursuers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    position: Position,
    heading: Heading,
    wished: Heading,
    speed: u32,
}

impl Actor {
    /// Places an actor on the reference corner of `tile`.
    #[must_use]
    pub fn spawn(grid: &MotionGrid, tile: TileCoord, heading: Heading, speed: u32) -> Self {
        Self {
            position: grid.position_of(tile),
            heading,
            wished: Heading::None,
            speed,
        }
    }

    /// Continuous position in sub-tile units.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Heading applied on every step.
    #[must_use]
    pub const fn heading(&self) -> Heading {
        self.heading
    }

    /// Heading most recently requested by input.
    #[must_use]
    pub const fn wished(&self) -> Heading {
        self.wished
    }

    /// Distance travelled per tick in sub-tile units.
    #[must_use]
    pub const fn speed(&self) -> u32 {
        self.speed
    }

    /// Tile containing the actor's reference corner.
    #[must_use]
    pub fn tile(&self, grid: &MotionGrid) -> TileCoord {
        grid.tile_of(self.position)
    }

    /// Reports whether the actor may turn right now.
    #[must_use]
    pub fn at_boundary(&self, grid: &MotionGrid) -> bool {
        grid.is_boundary(self.position)
    }

    pub(crate) fn set_heading(&mut self, heading: Heading) {
        self.heading = heading;
    }

    pub(crate) fn set_wished(&mut self, heading: Heading) {
        self.wished = heading;
    }

    /// Advances one tick along the heading, returning the new tile when one was entered.
    pub fn step(&mut self, grid: &MotionGrid) -> Option<TileCoord> {
        if self.heading.is_none() {
            return None;
        }

        let before = self.tile(grid);
        let speed = i32::try_from(self.speed).unwrap_or(i32::MAX);
        let (row_delta, column_delta) = self.heading.delta();
        let advanced = Position::new(
            self.position.x().saturating_add(column_delta * speed),
            self.position.y().saturating_add(row_delta * speed),
        );
        self.position = grid.wrap(advanced);

        let after = self.tile(grid);
        (after != before).then_some(after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> MotionGrid {
        MotionGrid::new(8, 3, 4)
    }

    #[test]
    fn spawned_actors_start_on_a_boundary() {
        let grid = grid();
        let actor = Actor::spawn(&grid, TileCoord::new(1, 2), Heading::Left, 2);

        assert_eq!(actor.position(), Position::new(16, 8));
        assert_eq!(actor.tile(&grid), TileCoord::new(1, 2));
        assert!(actor.at_boundary(&grid));
    }

    #[test]
    fn stepping_reaches_the_next_boundary_exactly() {
        let grid = grid();
        let mut actor = Actor::spawn(&grid, TileCoord::new(1, 1), Heading::Right, 2);

        for _ in 0..3 {
            let _ = actor.step(&grid);
            assert!(!actor.at_boundary(&grid));
        }
        assert_eq!(actor.step(&grid), Some(TileCoord::new(1, 2)));
        assert!(actor.at_boundary(&grid));
    }

    #[test]
    fn leaving_the_left_edge_reenters_from_the_right() {
        let grid = grid();
        let mut actor = Actor::spawn(&grid, TileCoord::new(1, 0), Heading::Left, 4);

        assert_eq!(actor.step(&grid), Some(TileCoord::new(1, 3)));
        assert_eq!(actor.position(), Position::new(28, 8));
        assert!(!actor.at_boundary(&grid));
        assert_eq!(actor.step(&grid), None);
        assert_eq!(actor.position(), Position::new(24, 8));
        assert!(actor.at_boundary(&grid));
    }

    #[test]
    fn leaving_the_right_edge_reenters_at_column_zero() {
        let grid = grid();
        let mut actor = Actor::spawn(&grid, TileCoord::new(0, 3), Heading::Right, 8);

        assert_eq!(actor.step(&grid), Some(TileCoord::new(0, 0)));
        assert_eq!(actor.position(), Position::new(0, 0));
    }

    #[test]
    fn stationary_actors_do_not_move() {
        let grid = grid();
        let mut actor = Actor::spawn(&grid, TileCoord::new(2, 2), Heading::None, 2);

        assert_eq!(actor.step(&grid), None);
        assert_eq!(actor.position(), grid.position_of(TileCoord::new(2, 2)));
    }

    #[test]
    fn reversing_mid_tile_returns_to_the_same_boundary() {
        let grid = grid();
        let start = TileCoord::new(1, 1);
        let mut actor = Actor::spawn(&grid, start, Heading::Down, 2);
        let _ = actor.step(&grid);
        actor.set_heading(actor.heading().opposite());
        let _ = actor.step(&grid);

        assert!(actor.at_boundary(&grid));
        assert_eq!(actor.tile(&grid), start);
    }
}
