use std::fmt::Write as _;

use minado_core::{Board, Tile, TileState};

/// Renders the grid with 1-based header labels and the fixed legend:
/// closed `-`, marked `!`, open mine `X`, open tile its numeric value.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    let _ = write!(out, "{:<3}", "");
    for col in 0..board.cols() {
        let _ = write!(out, "{} ", col + 1);
    }
    out.push('\n');

    for row in 0..board.rows() {
        let _ = write!(out, "{:<3}", row + 1);
        for col in 0..board.cols() {
            let _ = write!(out, "{} ", tile_char(board.tile_at((row, col))));
        }
        out.push('\n');
    }

    out
}

fn tile_char(tile: Tile) -> char {
    match tile.state() {
        TileState::Closed => '-',
        TileState::Marked => '!',
        TileState::Open if tile.is_mine() => 'X',
        TileState::Open => (b'0' + tile.value() as u8) as char,
    }
}
