use std::io;

use crate::engine::Tile;

/// Errors raised when building a [`Grid`](crate::engine::Grid) from caller-supplied rows.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid has no rows")]
    Empty,
    #[error("row {row} has {len} cells, expected {expected}")]
    NotSquare { row: usize, len: usize, expected: usize },
    #[error("tile {value} at ({row}, {col}) is not a power of two >= 2")]
    InvalidTile { value: Tile, row: usize, col: usize },
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("grid size {0} is outside {min}..={max}", min = crate::config::MIN_GRID_SIZE, max = crate::config::MAX_GRID_SIZE)]
    GridSize(usize),
    #[error("four probability {0} is outside [0, 1]")]
    FourProbability(f64),
    #[error("{tiles} initial tiles do not fit a {size}x{size} grid")]
    InitialTiles { tiles: usize, size: usize },
}
