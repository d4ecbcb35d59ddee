#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Chase engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Chase.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock to the provided monotonic timestamp.
    Tick {
        /// Time elapsed since the simulation started.
        now: Duration,
    },
    /// Publishes the shared scatter/chase phase selected by the mode clock.
    SetPhase {
        /// Phase that clock-driven pursuers should adopt.
        phase: Phase,
    },
    /// Records the heading most recently requested by the input collaborator.
    WishHeading {
        /// Heading the player would like to take at the next tile boundary.
        heading: Heading,
    },
    /// Rewrites the player's heading. Ignored unless the player sits on a tile boundary.
    SteerPlayer {
        /// Heading committed by the direction resolver.
        heading: Heading,
    },
    /// Moves the player one step along its current heading.
    AdvancePlayer,
    /// Rewrites a pursuer's heading. Ignored unless the pursuer sits on a tile boundary.
    SteerPursuer {
        /// Pursuer whose heading is being rewritten.
        pursuer: PursuerIdentity,
        /// Heading selected by the decision engine.
        heading: Heading,
    },
    /// Moves a pursuer one step along its current heading.
    AdvancePursuer {
        /// Pursuer to move.
        pursuer: PursuerIdentity,
    },
    /// Power-collectible trigger: frightens the pursuer and reverses it once.
    Frighten {
        /// Pursuer being frightened.
        pursuer: PursuerIdentity,
    },
    /// Capture trigger: sends a frightened pursuer back toward its home tile.
    Catch {
        /// Pursuer that was caught by the player.
        pursuer: PursuerIdentity,
    },
    /// Home-arrival hook: hands a retreating pursuer back to the mode clock.
    ReturnHome {
        /// Pursuer that reached its home tile.
        pursuer: PursuerIdentity,
    },
    /// Removes a collectible on behalf of the collision collaborator.
    ConsumeCollectible {
        /// Tile whose collectible was eaten.
        tile: TileCoord,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Time elapsed since the simulation started.
        now: Duration,
    },
    /// Announces that the shared scatter/chase phase flipped.
    PhaseChanged {
        /// Phase that became active.
        phase: Phase,
    },
    /// Reports that the player's heading changed.
    PlayerHeadingChanged {
        /// Heading before the change.
        from: Heading,
        /// Heading after the change.
        to: Heading,
    },
    /// Reports that the player crossed into a new tile.
    PlayerEnteredTile {
        /// Tile the player now occupies.
        tile: TileCoord,
    },
    /// Reports that a pursuer's heading changed.
    PursuerHeadingChanged {
        /// Pursuer that turned.
        pursuer: PursuerIdentity,
        /// Heading before the change.
        from: Heading,
        /// Heading after the change.
        to: Heading,
    },
    /// Reports that a pursuer crossed into a new tile.
    PursuerEnteredTile {
        /// Pursuer that moved.
        pursuer: PursuerIdentity,
        /// Tile the pursuer now occupies.
        tile: TileCoord,
    },
    /// Reports a pursuer state machine transition.
    PursuerStateChanged {
        /// Pursuer that changed state.
        pursuer: PursuerIdentity,
        /// State before the transition.
        from: PursuerState,
        /// State after the transition.
        to: PursuerState,
    },
    /// Confirms that a collectible was removed from the maze.
    CollectibleConsumed {
        /// Tile the collectible occupied.
        tile: TileCoord,
        /// Kind of collectible that was removed.
        kind: CollectibleKind,
    },
}

/// Items the player can eat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectibleKind {
    /// Ordinary collectible.
    Regular,
    /// Power-collectible that frightens the pursuers.
    Power,
}

/// Location of a single maze tile expressed as row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    row: u32,
    column: u32,
}

impl TileCoord {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Widens the coordinate into an unbounded target tile.
    #[must_use]
    pub const fn as_target(self) -> TargetTile {
        TargetTile::new(self.row as i32, self.column as i32)
    }
}

/// Tile a pursuer steers toward.
///
/// Targets are computed from player offsets and may fall outside the maze, so
/// both components are signed and never clamped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetTile {
    row: i32,
    column: i32,
}

impl TargetTile {
    /// Creates a new target tile.
    #[must_use]
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Signed row of the target.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Signed column of the target.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Squared Euclidean distance between the target and a maze tile.
    ///
    /// Comparing squared distances keeps candidate ranking exact.
    #[must_use]
    pub fn distance_squared_to(self, tile: TileCoord) -> i64 {
        let rows = i64::from(self.row) - i64::from(tile.row());
        let columns = i64::from(self.column) - i64::from(tile.column());
        rows * rows + columns * columns
    }
}

/// Heading of an actor: one of the four orthogonal unit steps, or stationary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heading {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
    /// Movement toward increasing row indices.
    Down,
    /// No movement.
    #[default]
    None,
}

impl Heading {
    /// Candidate order used by pursuers when ranking legal headings.
    pub const ARCADE_ORDER: [Heading; 4] = [Heading::Up, Heading::Left, Heading::Right, Heading::Down];

    /// Unit step expressed as `(row, column)` deltas.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
            Self::Down => (1, 0),
            Self::None => (0, 0),
        }
    }

    /// Heading pointing the opposite way. `None` is its own opposite.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::None => Self::None,
        }
    }

    /// Reports whether the heading is stationary.
    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }
}

/// Shared scatter/chase label driven by the mode clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Pursuers patrol their scatter corners.
    Scatter,
    /// Pursuers hunt the player.
    Chase,
}

impl Phase {
    /// The other phase.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Scatter => Self::Chase,
            Self::Chase => Self::Scatter,
        }
    }
}

/// The four fixed pursuer identities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PursuerIdentity {
    /// Targets the player's tile directly.
    Leader,
    /// Targets a fixed offset ahead of the player.
    Ambusher,
    /// Targets the reflection of the leader's corner through the player.
    Flanker,
    /// Chases from afar and retreats to its corner up close.
    Straggler,
}

impl PursuerIdentity {
    /// Every identity in roster order.
    pub const ALL: [PursuerIdentity; 4] = [
        PursuerIdentity::Leader,
        PursuerIdentity::Ambusher,
        PursuerIdentity::Flanker,
        PursuerIdentity::Straggler,
    ];
}

/// Pursuer state machine states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PursuerState {
    /// Heading for the scatter corner.
    Scatter,
    /// Hunting the player using the identity's chase target.
    Chase,
    /// Vulnerable and erratic until the fright expires.
    Frightened,
    /// Caught while frightened; heading back to the home tile.
    Retreating,
}

impl PursuerState {
    /// State that mirrors the provided clock phase.
    #[must_use]
    pub const fn from_phase(phase: Phase) -> Self {
        match phase {
            Phase::Scatter => Self::Scatter,
            Phase::Chase => Self::Chase,
        }
    }

    /// Reports whether the state simply follows the mode clock.
    #[must_use]
    pub const fn is_clock_driven(self) -> bool {
        matches!(self, Self::Scatter | Self::Chase)
    }
}

/// Continuous actor position measured in sub-tile units.
///
/// `x` runs along columns and `y` along rows. One tile spans the configured
/// number of units on each axis, so tile boundaries are exact multiples.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a new position from sub-tile units.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal component in sub-tile units.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical component in sub-tile units.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Position expressed in fractional tiles as `(column, row)`.
    #[must_use]
    pub fn in_tiles(&self, tile_units: u32) -> (f32, f32) {
        if tile_units == 0 {
            return (0.0, 0.0);
        }
        let units = tile_units as f32;
        (self.x as f32 / units, self.y as f32 / units)
    }
}

/// Immutable representation of the player's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerSnapshot {
    /// Continuous position of the player.
    pub position: Position,
    /// Tile containing the player's reference corner.
    pub tile: TileCoord,
    /// Heading currently applied on every step.
    pub heading: Heading,
    /// Heading most recently requested by input.
    pub wished: Heading,
    /// Indicates whether the player sits exactly on a tile boundary.
    pub at_boundary: bool,
}

/// Immutable representation of a single pursuer's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PursuerSnapshot {
    /// Identity of the pursuer.
    pub identity: PursuerIdentity,
    /// Continuous position of the pursuer.
    pub position: Position,
    /// Tile containing the pursuer's reference corner.
    pub tile: TileCoord,
    /// Heading currently applied on every step.
    pub heading: Heading,
    /// Current state machine state.
    pub state: PursuerState,
    /// Indicates whether the pursuer sits exactly on a tile boundary.
    pub at_boundary: bool,
    /// Corner targeted while scattering.
    pub scatter_corner: TileCoord,
    /// Tile targeted while retreating.
    pub home: TileCoord,
    /// Instant the fright wears off, present only while frightened.
    pub frightened_until: Option<Duration>,
}

/// Read-only snapshot describing every pursuer in the maze.
#[derive(Clone, Debug, Default)]
pub struct PursuerView {
    snapshots: Vec<PursuerSnapshot>,
}

impl PursuerView {
    /// Creates a new pursuer view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<PursuerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.identity);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &PursuerSnapshot> {
        self.snapshots.iter()
    }

    /// Snapshot of the pursuer with the provided identity, if present.
    #[must_use]
    pub fn get(&self, identity: PursuerIdentity) -> Option<&PursuerSnapshot> {
        self.snapshots
            .iter()
            .find(|snapshot| snapshot.identity == identity)
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<PursuerSnapshot> {
        self.snapshots
    }
}

/// Reasons the static configuration cannot be turned into a running world.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigurationError {
    /// The layout contains no rows or only empty rows.
    #[error("maze layout is empty")]
    EmptyLayout,
    /// A layout row differs in length from the first row.
    #[error("layout row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        /// Offending row index.
        row: u32,
        /// Column count of the first row.
        expected: u32,
        /// Column count of the offending row.
        found: u32,
    },
    /// A layout character is missing from the symbol table.
    #[error("unknown tile symbol {symbol:?} at row {row}, column {column}")]
    UnknownSymbol {
        /// Row of the symbol.
        row: u32,
        /// Column of the symbol.
        column: u32,
        /// The offending character.
        symbol: char,
    },
    /// Every tile in the layout is a wall.
    #[error("maze layout has no open tiles")]
    NoOpenTiles,
    /// The tile size in sub-tile units is zero.
    #[error("tile size must be at least one unit")]
    ZeroTileSize,
    /// An actor speed cannot produce exact tile boundaries.
    #[error("speed {speed} must be non-zero and divide the tile size {tile_units}")]
    InvalidSpeed {
        /// Configured speed in sub-tile units per tick.
        speed: u32,
        /// Configured tile size in sub-tile units.
        tile_units: u32,
    },
    /// The mode schedule has no phases.
    #[error("mode schedule must contain at least one phase")]
    EmptyModeSchedule,
    /// A mode schedule entry or the fright time is negative or not a number.
    #[error("duration {seconds} seconds is not a valid non-negative time")]
    InvalidDuration {
        /// The rejected value.
        seconds: f32,
    },
    /// A structural tile lies outside the grid or on a wall.
    #[error("{role} tile ({row}, {column}) is not an open maze tile")]
    BlockedTile {
        /// Which structural tile was rejected.
        role: &'static str,
        /// Row of the rejected tile.
        row: u32,
        /// Column of the rejected tile.
        column: u32,
    },
    /// The same pursuer identity appears twice in the roster.
    #[error("pursuer {0:?} is configured more than once")]
    DuplicatePursuer(PursuerIdentity),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn tile_coord_round_trips_through_bincode() {
        assert_round_trip(&TileCoord::new(14, 13));
    }

    #[test]
    fn pursuer_state_round_trips_through_bincode() {
        assert_round_trip(&PursuerState::Retreating);
    }

    #[test]
    fn opposite_is_an_involution() {
        for heading in Heading::ARCADE_ORDER {
            assert_ne!(heading.opposite(), heading);
            assert_eq!(heading.opposite().opposite(), heading);
        }
        assert_eq!(Heading::None.opposite(), Heading::None);
    }

    #[test]
    fn arcade_order_is_up_left_right_down() {
        assert_eq!(
            Heading::ARCADE_ORDER,
            [Heading::Up, Heading::Left, Heading::Right, Heading::Down]
        );
    }

    #[test]
    fn distance_squared_handles_targets_outside_the_grid() {
        let target = TargetTile::new(-4, 30);
        assert_eq!(target.distance_squared_to(TileCoord::new(0, 27)), 16 + 9);
    }

    #[test]
    fn phase_flips_back_and_forth() {
        assert_eq!(Phase::Scatter.flipped(), Phase::Chase);
        assert_eq!(Phase::Chase.flipped().flipped(), Phase::Chase);
        assert_eq!(
            PursuerState::from_phase(Phase::Chase),
            PursuerState::Chase
        );
        assert!(!PursuerState::Frightened.is_clock_driven());
    }

    #[test]
    fn position_converts_to_fractional_tiles() {
        let position = Position::new(24, 8);
        assert_eq!(position.in_tiles(16), (1.5, 0.5));
        assert_eq!(position.in_tiles(0), (0.0, 0.0));
    }

    #[test]
    fn configuration_errors_render_context() {
        let error = ConfigurationError::UnknownSymbol {
            row: 3,
            column: 7,
            symbol: '?',
        };
        assert_eq!(
            error.to_string(),
            "unknown tile symbol '?' at row 3, column 7"
        );
    }
}
