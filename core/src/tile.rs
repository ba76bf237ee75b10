use serde::{Deserialize, Serialize};

/// Player-visible state of a single tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileState {
    Closed,
    Open,
    Marked,
}

impl TileState {
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }

    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

impl Default for TileState {
    fn default() -> Self {
        Self::Closed
    }
}

/// One grid cell: mine flag, display state, and neighbor-mine value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub(crate) is_mine: bool,
    pub(crate) state: TileState,
    pub(crate) value: i8,
}

impl Tile {
    pub const fn is_mine(self) -> bool {
        self.is_mine
    }

    pub const fn state(self) -> TileState {
        self.state
    }

    /// Neighbor-mine count of the tile, or -1 when the tile is a mine.
    /// Only meaningful once mines are placed and values computed.
    pub const fn value(self) -> i8 {
        self.value
    }
}
