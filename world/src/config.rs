//! Static simulation configuration and its validation.

use std::{collections::BTreeSet, time::Duration};

use maze_chase_core::{ConfigurationError, Heading, PursuerIdentity, TileCoord};
use serde::{Deserialize, Serialize};

use crate::maze::Maze;

/// The 28×31 reference maze.
///
/// `#` wall, `.` collectible, `o` power-collectible, `-` pen gate, space open.
pub const REFERENCE_LAYOUT: [&str; 31] = [
    "############################",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#o####.#####.##.#####.####o#",
    "#.####.#####.##.#####.####.#",
    "#..........................#",
    "#.####.##.########.##.####.#",
    "#.####.##.########.##.####.#",
    "#......##....##....##......#",
    "######.##### ## #####.######",
    "     #.##### ## #####.#     ",
    "     #.##          ##.#     ",
    "     #.## ###--### ##.#     ",
    "######.## #      # ##.######",
    "      .   #      #   .      ",
    "######.## #      # ##.######",
    "     #.## ######## ##.#     ",
    "     #.##          ##.#     ",
    "     #.## ######## ##.#     ",
    "######.## ######## ##.######",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#o..##................##..o#",
    "###.##.##.########.##.##.###",
    "#......##....##....##......#",
    "#.##########.##.##########.#",
    "#.##########.##.##########.#",
    "#..........................#",
    "############################",
    "############################",
];

const REFERENCE_ROWS: u32 = 31;
const REFERENCE_COLUMNS: u32 = 28;
const DEFAULT_TILE_UNITS: u32 = 16;
const DEFAULT_SPEED: u32 = 2;
const DEFAULT_FRIGHT_SECONDS: f32 = 6.0;
const DEFAULT_MODE_SCHEDULE: [f32; 8] = [7.0, 20.0, 7.0, 20.0, 5.0, 20.0, 5.0, 9999.0];
const PEN_HOME: TileCoord = TileCoord::new(14, 13);

/// Everything required to build a [`crate::World`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Rows of layout characters.
    pub layout: Vec<String>,
    /// Side length of a tile in sub-tile units.
    pub tile_units: u32,
    /// Player speed in sub-tile units per tick.
    pub player_speed: u32,
    /// Tile the player spawns on.
    pub player_start: TileCoord,
    /// Phase durations in seconds, starting with scatter. The last entry holds forever.
    pub mode_schedule: Vec<f32>,
    /// Seconds a power-collectible keeps pursuers frightened.
    pub fright_seconds: f32,
    /// Seed for the frightened random-target generator.
    pub rng_seed: u64,
    /// Pursuer roster.
    pub pursuers: Vec<PursuerConfig>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            layout: REFERENCE_LAYOUT.iter().map(|row| (*row).to_owned()).collect(),
            tile_units: DEFAULT_TILE_UNITS,
            player_speed: DEFAULT_SPEED,
            player_start: TileCoord::new(23, 13),
            mode_schedule: DEFAULT_MODE_SCHEDULE.to_vec(),
            fright_seconds: DEFAULT_FRIGHT_SECONDS,
            rng_seed: 0x5eed_0f_c0ffee,
            pursuers: PursuerConfig::reference_roster(REFERENCE_ROWS, REFERENCE_COLUMNS),
        }
    }
}

impl SimulationConfig {
    /// Builds the maze and checks every structural requirement against it.
    pub fn build_maze(&self) -> Result<Maze, ConfigurationError> {
        let maze = Maze::build(self.layout.as_slice())?;

        if self.tile_units == 0 {
            return Err(ConfigurationError::ZeroTileSize);
        }
        self.check_speed(self.player_speed)?;
        check_open(&maze, "player start", self.player_start)?;

        if self.mode_schedule.is_empty() {
            return Err(ConfigurationError::EmptyModeSchedule);
        }
        for &seconds in self.mode_schedule.iter().chain([&self.fright_seconds]) {
            check_seconds(seconds)?;
        }

        let mut seen = BTreeSet::new();
        for pursuer in &self.pursuers {
            if !seen.insert(pursuer.identity) {
                return Err(ConfigurationError::DuplicatePursuer(pursuer.identity));
            }
            self.check_speed(pursuer.speed)?;
            check_open(&maze, "pursuer spawn", pursuer.spawn)?;
            check_open(&maze, "pursuer home", pursuer.home)?;
        }

        Ok(maze)
    }

    /// Phase durations converted to [`Duration`] values.
    ///
    /// Only meaningful once [`SimulationConfig::build_maze`] has accepted the
    /// configuration; invalid entries collapse to zero.
    #[must_use]
    pub fn mode_durations(&self) -> Vec<Duration> {
        self.mode_schedule.iter().map(|&seconds| seconds_to_duration(seconds)).collect()
    }

    /// Fright time converted to a [`Duration`].
    #[must_use]
    pub fn fright_duration(&self) -> Duration {
        seconds_to_duration(self.fright_seconds)
    }

    fn check_speed(&self, speed: u32) -> Result<(), ConfigurationError> {
        if speed == 0 || speed > self.tile_units || self.tile_units % speed != 0 {
            return Err(ConfigurationError::InvalidSpeed {
                speed,
                tile_units: self.tile_units,
            });
        }
        Ok(())
    }
}

/// Static description of one pursuer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PursuerConfig {
    /// Identity that selects the chase target function.
    pub identity: PursuerIdentity,
    /// Tile the pursuer spawns on.
    pub spawn: TileCoord,
    /// Tile targeted while retreating.
    pub home: TileCoord,
    /// Corner targeted while scattering. May lie on a wall.
    pub scatter_corner: TileCoord,
    /// Speed in sub-tile units per tick.
    pub speed: u32,
    /// Heading at spawn.
    pub heading: Heading,
}

impl PursuerConfig {
    /// The four-pursuer roster for a maze of the provided size.
    #[must_use]
    pub fn reference_roster(rows: u32, columns: u32) -> Vec<Self> {
        let last_row = rows.saturating_sub(1);
        let last_column = columns.saturating_sub(1);
        let entry = |identity, spawn, scatter_corner| Self {
            identity,
            spawn,
            home: PEN_HOME,
            scatter_corner,
            speed: DEFAULT_SPEED,
            heading: Heading::Left,
        };

        vec![
            entry(
                PursuerIdentity::Leader,
                TileCoord::new(11, 13),
                TileCoord::new(0, last_column),
            ),
            entry(
                PursuerIdentity::Ambusher,
                TileCoord::new(14, 13),
                TileCoord::new(0, 0),
            ),
            entry(
                PursuerIdentity::Flanker,
                TileCoord::new(14, 12),
                TileCoord::new(last_row, last_column),
            ),
            entry(
                PursuerIdentity::Straggler,
                TileCoord::new(14, 15),
                TileCoord::new(last_row, 0),
            ),
        ]
    }
}

fn check_open(maze: &Maze, role: &'static str, tile: TileCoord) -> Result<(), ConfigurationError> {
    if maze.is_wall(tile) {
        return Err(ConfigurationError::BlockedTile {
            role,
            row: tile.row(),
            column: tile.column(),
        });
    }
    Ok(())
}

fn check_seconds(seconds: f32) -> Result<(), ConfigurationError> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(ConfigurationError::InvalidDuration { seconds });
    }
    Ok(())
}

fn seconds_to_duration(seconds: f32) -> Duration {
    Duration::try_from_secs_f32(seconds).unwrap_or(Duration::ZERO)
}
