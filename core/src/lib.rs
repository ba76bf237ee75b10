use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use session::*;
pub use tile::*;
pub use types::*;

mod board;
mod error;
mod session;
mod tile;
mod types;

/// Smallest playable axis. A 1-wide board cannot keep a mine-free first
/// open meaningful, so the interactive path starts at 2.
pub const MIN_DIM: Coord = 2;

/// Largest playable axis, bounding grid memory.
pub const MAX_DIM: Coord = 30;

/// Validated board parameters: grid extents and mine count.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl BoardConfig {
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        if rows < MIN_DIM || rows > MAX_DIM || cols < MIN_DIM || cols > MAX_DIM {
            return Err(GameError::InvalidSize { rows, cols });
        }

        let max = mult(rows, cols) - 1;
        if mines < 1 || mines > max {
            return Err(GameError::InvalidMineCount { mines, max });
        }

        Ok(Self { rows, cols, mines })
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn max_mines(&self) -> CellCount {
        self.total_cells() - 1
    }
}
