use serde::{Deserialize, Serialize};

use crate::Board;

/// One play session: a named player and the board they are clearing.
///
/// The session owns exactly one board for its whole lifetime; the turn loop
/// driving it lives with the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    player_name: String,
    board: Board,
}

impl Session {
    pub fn new(player_name: impl Into<String>, board: Board) -> Self {
        Self {
            player_name: player_name.into(),
            board,
        }
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}
