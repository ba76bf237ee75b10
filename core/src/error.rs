use crate::{CellCount, Coord, MAX_DIM, MIN_DIM};
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("rows and columns must be between {min} and {max}, got {rows}x{cols}", min = MIN_DIM, max = MAX_DIM)]
    InvalidSize { rows: Coord, cols: Coord },
    #[error("mine count must be between 1 and {max}, got {mines}")]
    InvalidMineCount { mines: CellCount, max: CellCount },
    #[error("invalid coordinates")]
    InvalidCoords,
}

pub type Result<T> = core::result::Result<T, GameError>;
