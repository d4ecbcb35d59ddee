//! Static maze graph: tile classification and legal-neighbour adjacency.

use std::collections::BTreeSet;

use maze_chase_core::{CollectibleKind, ConfigurationError, Heading, TileCoord};

/// Classification assigned to every tile of the layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    /// Impassable tile.
    Wall,
    /// Open tile without a collectible.
    Empty,
    /// Open tile holding a regular collectible.
    Collectible,
    /// Open tile holding a power-collectible.
    PowerCollectible,
}

impl TileKind {
    /// Maps a layout character through the symbol table.
    ///
    /// `-` marks the pen gate, which actors may cross like any open tile.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '#' => Some(Self::Wall),
            '.' => Some(Self::Collectible),
            'o' | 'O' => Some(Self::PowerCollectible),
            ' ' | '-' => Some(Self::Empty),
            _ => None,
        }
    }

    /// Reports whether actors may occupy the tile.
    #[must_use]
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Wall)
    }
}

/// Immutable maze adjacency plus the collectible sets eaten during play.
#[derive(Clone, Debug)]
pub struct Maze {
    rows: u32,
    columns: u32,
    walls: Vec<bool>,
    collectibles: BTreeSet<TileCoord>,
    power_collectibles: BTreeSet<TileCoord>,
    neighbors: Vec<Vec<TileCoord>>,
}

impl Maze {
    /// Builds the maze from rows of layout characters.
    pub fn build<S>(layout: &[S]) -> Result<Self, ConfigurationError>
    where
        S: AsRef<str>,
    {
        let grid: Vec<Vec<char>> = layout
            .iter()
            .map(|row| row.as_ref().chars().collect())
            .collect();

        let expected = grid.first().map_or(0, Vec::len);
        if expected == 0 {
            return Err(ConfigurationError::EmptyLayout);
        }

        let rows = to_u32(grid.len());
        let columns = to_u32(expected);
        let mut walls = Vec::with_capacity(grid.len() * expected);
        let mut collectibles = BTreeSet::new();
        let mut power_collectibles = BTreeSet::new();

        for (row_index, row) in grid.iter().enumerate() {
            let row_index = to_u32(row_index);
            if row.len() != expected {
                return Err(ConfigurationError::RaggedRow {
                    row: row_index,
                    expected: columns,
                    found: to_u32(row.len()),
                });
            }

            for (column_index, &symbol) in row.iter().enumerate() {
                let column_index = to_u32(column_index);
                let kind =
                    TileKind::from_symbol(symbol).ok_or(ConfigurationError::UnknownSymbol {
                        row: row_index,
                        column: column_index,
                        symbol,
                    })?;
                let tile = TileCoord::new(row_index, column_index);
                match kind {
                    TileKind::Collectible => {
                        let _ = collectibles.insert(tile);
                    }
                    TileKind::PowerCollectible => {
                        let _ = power_collectibles.insert(tile);
                    }
                    TileKind::Wall | TileKind::Empty => {}
                }
                walls.push(kind == TileKind::Wall);
            }
        }

        if walls.iter().all(|&wall| wall) {
            return Err(ConfigurationError::NoOpenTiles);
        }

        let mut maze = Self {
            rows,
            columns,
            walls,
            collectibles,
            power_collectibles,
            neighbors: Vec::new(),
        };
        maze.neighbors = maze.compute_neighbors();
        Ok(maze)
    }

    fn compute_neighbors(&self) -> Vec<Vec<TileCoord>> {
        let mut neighbors = Vec::with_capacity(self.walls.len());
        for row in 0..self.rows {
            for column in 0..self.columns {
                let tile = TileCoord::new(row, column);
                if self.is_wall(tile) {
                    neighbors.push(Vec::new());
                    continue;
                }

                neighbors.push(
                    Heading::ARCADE_ORDER
                        .iter()
                        .filter_map(|&heading| self.neighbor(tile, heading))
                        .collect(),
                );
            }
        }
        neighbors
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Reports whether the tile blocks movement. Tiles outside the grid count as walls.
    #[must_use]
    pub fn is_wall(&self, tile: TileCoord) -> bool {
        self.index(tile)
            .and_then(|index| self.walls.get(index).copied())
            .unwrap_or(true)
    }

    /// Classification of the tile as it stands now, collectibles included.
    #[must_use]
    pub fn tile_kind(&self, tile: TileCoord) -> TileKind {
        if self.is_wall(tile) {
            TileKind::Wall
        } else if self.collectibles.contains(&tile) {
            TileKind::Collectible
        } else if self.power_collectibles.contains(&tile) {
            TileKind::PowerCollectible
        } else {
            TileKind::Empty
        }
    }

    /// Open tiles reachable by one orthogonal step, in up, left, right, down order.
    ///
    /// Walls and tiles outside the grid have no neighbours.
    #[must_use]
    pub fn legal_neighbors(&self, tile: TileCoord) -> &[TileCoord] {
        self.index(tile)
            .and_then(|index| self.neighbors.get(index))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Open tile one step away along `heading`, wrapping columns at the grid edges.
    #[must_use]
    pub fn neighbor(&self, tile: TileCoord, heading: Heading) -> Option<TileCoord> {
        if heading.is_none() || self.columns == 0 {
            return None;
        }

        let (row_delta, column_delta) = heading.delta();
        let row = i64::from(tile.row()) + i64::from(row_delta);
        if row < 0 || row >= i64::from(self.rows) {
            return None;
        }

        let column =
            (i64::from(tile.column()) + i64::from(column_delta)).rem_euclid(i64::from(self.columns));
        let next = TileCoord::new(u32::try_from(row).ok()?, u32::try_from(column).ok()?);
        (!self.is_wall(next)).then_some(next)
    }

    /// Reports whether `heading` leads from `tile` to a legal neighbour.
    #[must_use]
    pub fn can_move(&self, tile: TileCoord, heading: Heading) -> bool {
        self.neighbor(tile, heading).is_some()
    }

    /// Tiles still holding a regular collectible.
    #[must_use]
    pub fn collectibles(&self) -> &BTreeSet<TileCoord> {
        &self.collectibles
    }

    /// Tiles still holding a power-collectible.
    #[must_use]
    pub fn power_collectibles(&self) -> &BTreeSet<TileCoord> {
        &self.power_collectibles
    }

    /// Total number of collectibles of either kind left in the maze.
    #[must_use]
    pub fn remaining_collectibles(&self) -> usize {
        self.collectibles.len() + self.power_collectibles.len()
    }

    /// Removes the collectible on `tile`, reporting what was there.
    pub(crate) fn take_collectible(&mut self, tile: TileCoord) -> Option<CollectibleKind> {
        if self.collectibles.remove(&tile) {
            Some(CollectibleKind::Regular)
        } else if self.power_collectibles.remove(&tile) {
            Some(CollectibleKind::Power)
        } else {
            None
        }
    }

    fn index(&self, tile: TileCoord) -> Option<usize> {
        if tile.row() < self.rows && tile.column() < self.columns {
            let row = usize::try_from(tile.row()).ok()?;
            let column = usize::try_from(tile.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::REFERENCE_LAYOUT;

    const TUNNEL: [&str; 3] = ["#####", "  .  ", "#####"];

    #[test]
    fn reference_layout_has_arcade_dimensions() {
        let maze = Maze::build(&REFERENCE_LAYOUT).expect("reference layout");
        assert_eq!(maze.rows(), 31);
        assert_eq!(maze.columns(), 28);
        assert_eq!(maze.power_collectibles().len(), 4);
        assert!(maze.is_wall(TileCoord::new(0, 0)));
        assert!(!maze.is_wall(TileCoord::new(23, 13)));
    }

    #[test]
    fn tunnel_tiles_wrap_to_the_opposite_edge() {
        let maze = Maze::build(&TUNNEL).expect("tunnel layout");

        assert_eq!(
            maze.legal_neighbors(TileCoord::new(1, 0)),
            &[TileCoord::new(1, 4), TileCoord::new(1, 1)]
        );
        assert_eq!(
            maze.legal_neighbors(TileCoord::new(1, 4)),
            &[TileCoord::new(1, 3), TileCoord::new(1, 0)]
        );
    }

    #[test]
    fn wrapped_neighbor_is_omitted_when_opposite_edge_is_a_wall() {
        let maze = Maze::build(&["#####", "  . #", "#####"]).expect("layout");

        assert_eq!(
            maze.legal_neighbors(TileCoord::new(1, 0)),
            &[TileCoord::new(1, 1)]
        );
        assert_eq!(maze.neighbor(TileCoord::new(1, 0), Heading::Left), None);
    }

    #[test]
    fn reference_tunnel_row_wraps_both_ways() {
        let maze = Maze::build(&REFERENCE_LAYOUT).expect("reference layout");
        let west = TileCoord::new(14, 0);
        let east = TileCoord::new(14, 27);

        assert!(maze.legal_neighbors(west).contains(&east));
        assert!(maze.legal_neighbors(east).contains(&west));
    }

    #[test]
    fn walls_and_out_of_grid_tiles_have_no_neighbors() {
        let maze = Maze::build(&TUNNEL).expect("tunnel layout");
        assert!(maze.legal_neighbors(TileCoord::new(0, 2)).is_empty());
        assert!(maze.legal_neighbors(TileCoord::new(9, 9)).is_empty());
        assert!(maze.is_wall(TileCoord::new(9, 9)));
    }

    #[test]
    fn vertical_steps_never_wrap() {
        let maze = Maze::build(&["...", "..."]).expect("layout");
        assert_eq!(maze.neighbor(TileCoord::new(0, 1), Heading::Up), None);
        assert_eq!(maze.neighbor(TileCoord::new(1, 1), Heading::Down), None);
        assert_eq!(maze.neighbor(TileCoord::new(1, 1), Heading::None), None);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let error = Maze::build(&["###", "#.", "###"]).expect_err("ragged");
        assert_eq!(
            error,
            ConfigurationError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2,
            }
        );
    }

    #[test]
    fn unknown_symbols_are_rejected() {
        let error = Maze::build(&["#?#"]).expect_err("unknown symbol");
        assert_eq!(
            error,
            ConfigurationError::UnknownSymbol {
                row: 0,
                column: 1,
                symbol: '?',
            }
        );
    }

    #[test]
    fn layouts_without_open_tiles_are_rejected() {
        assert_eq!(
            Maze::build(&["###", "###"]).expect_err("all walls"),
            ConfigurationError::NoOpenTiles
        );
        let empty: [&str; 0] = [];
        assert_eq!(
            Maze::build(&empty).expect_err("empty"),
            ConfigurationError::EmptyLayout
        );
    }

    #[test]
    fn taking_collectibles_shrinks_the_sets_once() {
        let mut maze = Maze::build(&[".o "]).expect("layout");

        assert_eq!(
            maze.take_collectible(TileCoord::new(0, 0)),
            Some(CollectibleKind::Regular)
        );
        assert_eq!(maze.take_collectible(TileCoord::new(0, 0)), None);
        assert_eq!(
            maze.take_collectible(TileCoord::new(0, 1)),
            Some(CollectibleKind::Power)
        );
        assert_eq!(maze.take_collectible(TileCoord::new(0, 2)), None);
        assert_eq!(maze.remaining_collectibles(), 0);
        assert_eq!(maze.tile_kind(TileCoord::new(0, 1)), TileKind::Empty);
        assert_eq!(maze.legal_neighbors(TileCoord::new(0, 1)).len(), 2);
    }
}
