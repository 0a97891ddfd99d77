use std::{env, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    constants::{DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_TICK_MILLIS, MAX_DIMENSION},
    direction::Coord,
    maze::SeedPolicy,
    search::Mode,
};

pub const ROWS_VAR: &str = "MAZE_ROWS";
pub const COLS_VAR: &str = "MAZE_COLS";
pub const TICK_VAR: &str = "MAZE_TICK_MS";
pub const SEED_VAR: &str = "MAZE_SEED";
pub const SEED_POLICY_VAR: &str = "MAZE_SEED_POLICY";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a whole number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("grid dimensions must be between 1x1 and {max}x{max}, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize, max: usize },

    #[error("unknown traversal mode {0:?}, expected \"bfs\" or \"dfs\"")]
    UnknownMode(String),

    #[error("unknown seed policy {0:?}, expected \"independent\" or \"diagonal\"")]
    UnknownSeedPolicy(String),
}

/// Size of the logical maze. The rendered grid is `2 * rows + 1` by
/// `2 * cols + 1`. Only built through `Dimensions::new`, so both axes are
/// always within `1..=MAX_DIMENSION`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDimensions")]
pub struct Dimensions {
    rows: usize,
    cols: usize,
}

#[derive(Deserialize)]
struct RawDimensions {
    rows: usize,
    cols: usize,
}

impl TryFrom<RawDimensions> for Dimensions {
    type Error = ConfigError;

    fn try_from(raw: RawDimensions) -> Result<Self, Self::Error> {
        Dimensions::new(raw.rows, raw.cols)
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
        }
    }
}

impl Dimensions {
    pub fn new(rows: usize, cols: usize) -> Result<Self, ConfigError> {
        let valid = (1..=MAX_DIMENSION).contains(&rows) && (1..=MAX_DIMENSION).contains(&cols);
        if !valid {
            return Err(ConfigError::InvalidDimensions {
                rows,
                cols,
                max: MAX_DIMENSION,
            });
        }
        Ok(Self { rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn render_height(&self) -> usize {
        2 * self.rows + 1
    }

    pub fn render_width(&self) -> usize {
        2 * self.cols + 1
    }

    pub fn start(&self) -> Coord {
        Coord::new(1, 1)
    }

    pub fn goal(&self) -> Coord {
        Coord::new(2 * self.rows - 1, 2 * self.cols - 1)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub dimensions: Dimensions,
    pub tick: Duration, // Delay between two animation steps.
    pub seed: Option<u64>, // Fixed seed for reproducible mazes; random when absent.
    pub seed_policy: SeedPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dimensions: Dimensions::default(),
            tick: Duration::from_millis(DEFAULT_TICK_MILLIS),
            seed: None,
            seed_policy: SeedPolicy::default(),
        }
    }
}

impl Config {
    /// Reads `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let rows = parse_number(ROWS_VAR, lookup(ROWS_VAR))?
            .unwrap_or(defaults.dimensions.rows());
        let cols = parse_number(COLS_VAR, lookup(COLS_VAR))?
            .unwrap_or(defaults.dimensions.cols());
        let dimensions = Dimensions::new(rows, cols)?;

        let tick = parse_number(TICK_VAR, lookup(TICK_VAR))?
            .map(Duration::from_millis)
            .unwrap_or(defaults.tick);

        let seed = parse_number(SEED_VAR, lookup(SEED_VAR))?;

        let seed_policy = match lookup(SEED_POLICY_VAR) {
            Some(value) => SeedPolicy::from_str(value.trim())
                .map_err(|_| ConfigError::UnknownSeedPolicy(value))?,
            None => defaults.seed_policy,
        };

        Ok(Self {
            dimensions,
            tick,
            seed,
            seed_policy,
        })
    }
}

/// Validates a traversal mode before anything starts, so an unknown mode can
/// never leave a search without a removal discipline.
pub fn parse_mode(text: &str) -> Result<Mode, ConfigError> {
    Mode::from_str(text.trim()).map_err(|_| ConfigError::UnknownMode(text.to_string()))
}

fn parse_number<T: FromStr>(
    name: &'static str,
    value: Option<String>,
) -> Result<Option<T>, ConfigError> {
    match value {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
    }
}
