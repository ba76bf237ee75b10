use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Outcome of marking a tile.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Outcome of opening a tile.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OpenOutcome {
    NoChange,
    Opened,
    Exploded,
}

impl OpenOutcome {
    pub const fn has_update(self) -> bool {
        use OpenOutcome::*;
        match self {
            NoChange => false,
            Opened => true,
            Exploded => true,
        }
    }
}

/// Rectangular tile grid with mine placement, value computation, and the
/// open/mark state transitions.
///
/// Setup is two-phase: construction allocates an all-closed, mine-free grid;
/// [`Board::place_mines`] then fills it while keeping the first-opened cell
/// safe, and [`Board::compute_values`] derives the per-tile counts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    rows: Coord,
    cols: Coord,
    mine_count: CellCount,
    grid: Array2<Tile>,
}

impl Board {
    /// Allocates the grid for an already validated configuration. No mines
    /// are placed yet.
    pub fn new(config: BoardConfig) -> Self {
        Self {
            rows: config.rows,
            cols: config.cols,
            mine_count: config.mines,
            grid: Array2::default((config.rows, config.cols).to_nd_index()),
        }
    }

    /// Validates the parameters and allocates the board in one step.
    pub fn create(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        BoardConfig::new(rows, cols, mines).map(Self::new)
    }

    /// Builds a board with an explicit mine layout, for callers that need a
    /// deterministic field. Values are not computed yet.
    pub fn with_mines(rows: Coord, cols: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut board = Self::create(rows, cols, mine_coords.len() as CellCount)?;
        for &coords in mine_coords {
            let coords = board.validate_coords(coords)?;
            board.grid[coords.to_nd_index()].is_mine = true;
        }
        board.mine_count = board
            .grid
            .iter()
            .filter(|tile| tile.is_mine)
            .count()
            .try_into()
            .unwrap();
        Ok(board)
    }

    pub fn rows(&self) -> Coord {
        self.rows
    }

    pub fn cols(&self) -> Coord {
        self.cols
    }

    pub fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub fn tile_at(&self, coords: Coord2) -> Tile {
        self.grid[coords.to_nd_index()]
    }

    pub fn is_in_bounds(&self, coords: Coord2) -> bool {
        coords.0 < self.rows && coords.1 < self.cols
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.is_in_bounds(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Whether a mine sits at `coords`; out-of-bounds positions hold no
    /// mine, so the answer there is `false` rather than an error.
    pub fn is_mine_at(&self, coords: Coord2) -> bool {
        self.is_in_bounds(coords) && self.grid[coords.to_nd_index()].is_mine
    }

    /// Fills the grid with exactly `mine_count` mines by uniform rejection
    /// sampling; `safe` is never selected. Terminates because the mine
    /// count is strictly below the cell count.
    pub fn place_mines<R: Rng>(&mut self, safe: Coord2, rng: &mut R) {
        let mut placed: CellCount = 0;
        while placed < self.mine_count {
            let coords = (
                rng.random_range(0..self.rows),
                rng.random_range(0..self.cols),
            );
            if coords == safe {
                continue;
            }

            let tile = &mut self.grid[coords.to_nd_index()];
            if tile.is_mine {
                continue;
            }

            tile.is_mine = true;
            placed += 1;
            log::trace!("mine placed at {:?}", coords);
        }
        log::debug!(
            "placed {} mines on a {}x{} board, safe cell {:?}",
            placed,
            self.rows,
            self.cols,
            safe
        );
    }

    /// Counts mined positions in the 3x3 block around `coords`. The block
    /// includes the center offset; call sites only ask about non-mine
    /// tiles, so the center never contributes.
    pub fn count_adjacent_mines(&self, coords: Coord2) -> u8 {
        self.grid
            .iter_block(coords)
            .filter(|&pos| self.is_mine_at(pos))
            .count()
            .try_into()
            .unwrap()
    }

    /// Derives every tile's value from the current mine layout: -1 for
    /// mines, the adjacent-mine count otherwise. Runs after
    /// [`Board::place_mines`]; idempotent while the layout is unchanged.
    pub fn compute_values(&mut self) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let coords = (row, col);
                let value = if self.grid[coords.to_nd_index()].is_mine {
                    -1
                } else {
                    self.count_adjacent_mines(coords) as i8
                };
                self.grid[coords.to_nd_index()].value = value;
            }
        }
    }

    /// Opens the tile at `coords`. Already-open tiles are left alone; a
    /// marked tile opens like a closed one.
    pub fn open(&mut self, coords: Coord2) -> Result<OpenOutcome> {
        use OpenOutcome::*;

        let coords = self.validate_coords(coords)?;

        let tile = &mut self.grid[coords.to_nd_index()];
        Ok(match tile.state {
            TileState::Open => NoChange,
            _ => {
                tile.state = TileState::Open;
                log::debug!("opened tile at {:?}, value {}", coords, tile.value);
                if tile.is_mine {
                    Exploded
                } else {
                    Opened
                }
            }
        })
    }

    /// Toggles the mark on a closed tile; open tiles cannot be marked.
    pub fn mark(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use MarkOutcome::*;

        let coords = self.validate_coords(coords)?;

        let tile = &mut self.grid[coords.to_nd_index()];
        Ok(match tile.state {
            TileState::Closed => {
                tile.state = TileState::Marked;
                Changed
            }
            TileState::Marked => {
                tile.state = TileState::Closed;
                Changed
            }
            TileState::Open => NoChange,
        })
    }

    /// Marks every tile still closed, leaving open tiles untouched. Runs
    /// as win confirmation once the board is solved.
    pub fn mark_all_closed(&mut self) {
        for tile in self.grid.iter_mut() {
            if tile.state.is_closed() {
                tile.state = TileState::Marked;
            }
        }
    }

    /// A board is solved once no tile is both closed and mine-free. On a
    /// win the remaining closed tiles (the mines) are marked as part of
    /// the confirmation; otherwise nothing changes.
    pub fn is_solved(&mut self) -> bool {
        let solved = self
            .grid
            .iter()
            .all(|tile| tile.is_mine || !tile.state.is_closed());

        if solved {
            log::debug!("board solved, marking remaining closed tiles");
            self.mark_all_closed();
        }
        solved
    }

    /// Opens every still-closed mine, revealing the layout after a loss.
    /// Non-mine tiles and already-open mines are untouched.
    pub fn open_all_mines(&mut self) {
        for tile in self.grid.iter_mut() {
            if tile.is_mine && tile.state.is_closed() {
                tile.state = TileState::Open;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn board_with_mines(rows: Coord, cols: Coord, mines: &[Coord2]) -> Board {
        let mut board = Board::with_mines(rows, cols, mines).unwrap();
        board.compute_values();
        board
    }

    fn count_mines(board: &Board) -> usize {
        board.grid.iter().filter(|tile| tile.is_mine).count()
    }

    #[test]
    fn create_rejects_out_of_range_rows() {
        assert_eq!(
            Board::create(31, 5, 5),
            Err(GameError::InvalidSize { rows: 31, cols: 5 })
        );
    }

    #[test]
    fn fresh_board_is_closed_and_mine_free() {
        let board = Board::create(5, 4, 3).unwrap();

        assert_eq!(board.size(), (5, 4));
        assert_eq!(board.mine_count(), 3);
        assert_eq!(count_mines(&board), 0);
        assert!(board
            .grid
            .iter()
            .all(|tile| tile.state == TileState::Closed));
    }

    #[test]
    fn place_mines_fills_exactly_the_requested_count() {
        for seed in 0..20 {
            let mut board = Board::create(5, 5, 5).unwrap();
            let mut rng = SmallRng::seed_from_u64(seed);

            board.place_mines((2, 2), &mut rng);

            assert_eq!(count_mines(&board), 5, "seed {}", seed);
            assert!(!board.is_mine_at((2, 2)), "seed {}", seed);
        }
    }

    #[test]
    fn place_mines_skips_already_mined_tiles() {
        let mut board = Board::create(2, 2, 1).unwrap();
        board.grid[[0, 0]].is_mine = true;
        board.grid[[0, 1]].is_mine = true;
        let mut rng = SmallRng::seed_from_u64(0);

        board.place_mines((1, 1), &mut rng);

        assert_eq!(count_mines(&board), 3);
        assert!(!board.is_mine_at((1, 1)));
    }

    #[test]
    fn place_mines_with_a_seeded_rng_is_reproducible() {
        let mut first = Board::create(8, 8, 10).unwrap();
        let mut second = Board::create(8, 8, 10).unwrap();

        first.place_mines((4, 4), &mut SmallRng::seed_from_u64(7));
        second.place_mines((4, 4), &mut SmallRng::seed_from_u64(7));

        assert_eq!(first, second);
    }

    #[test]
    fn compute_values_sets_counts_around_a_single_mine() {
        let board = board_with_mines(3, 3, &[(0, 0)]);

        assert_eq!(board.tile_at((0, 0)).value(), -1);
        assert_eq!(board.tile_at((0, 1)).value(), 1);
        assert_eq!(board.tile_at((1, 0)).value(), 1);
        assert_eq!(board.tile_at((1, 1)).value(), 1);
        assert_eq!(board.tile_at((0, 2)).value(), 0);
        assert_eq!(board.tile_at((2, 2)).value(), 0);
    }

    #[test]
    fn computed_values_match_a_direct_neighbor_scan() {
        let mut board = Board::create(6, 7, 9).unwrap();
        board.place_mines((3, 3), &mut SmallRng::seed_from_u64(99));
        board.compute_values();

        for row in 0..6 {
            for col in 0..7 {
                let tile = board.tile_at((row, col));
                if tile.is_mine() {
                    assert_eq!(tile.value(), -1);
                    continue;
                }

                let mut expected: i8 = 0;
                for drow in -1i16..=1 {
                    for dcol in -1i16..=1 {
                        if drow == 0 && dcol == 0 {
                            continue;
                        }
                        let nrow = i16::from(row) + drow;
                        let ncol = i16::from(col) + dcol;
                        if (0..6).contains(&nrow)
                            && (0..7).contains(&ncol)
                            && board.is_mine_at((nrow as Coord, ncol as Coord))
                        {
                            expected += 1;
                        }
                    }
                }
                assert_eq!(tile.value(), expected, "tile ({}, {})", row, col);
            }
        }
    }

    #[test]
    fn compute_values_is_idempotent() {
        let mut board = board_with_mines(4, 4, &[(1, 1), (2, 3)]);
        let snapshot = board.clone();

        board.compute_values();

        assert_eq!(board, snapshot);
    }

    #[test]
    fn count_adjacent_mines_sees_all_eight_neighbors() {
        let mines: Vec<Coord2> = (0..3)
            .flat_map(|row| (0..3).map(move |col| (row, col)))
            .filter(|&coords| coords != (1, 1))
            .collect();
        let board = board_with_mines(3, 3, &mines);

        assert_eq!(board.count_adjacent_mines((1, 1)), 8);
    }

    #[test]
    fn is_mine_at_is_false_out_of_bounds() {
        let board = board_with_mines(5, 5, &[(2, 3)]);

        assert!(board.is_mine_at((2, 3)));
        assert!(!board.is_mine_at((0, 5)));
        assert!(!board.is_mine_at((5, 5)));
        assert!(!board.is_mine_at((200, 0)));
    }

    #[test]
    fn validate_coords_accepts_only_the_grid_range() {
        let board = Board::create(10, 10, 5).unwrap();

        assert_eq!(board.validate_coords((0, 9)), Ok((0, 9)));
        assert_eq!(board.validate_coords((6, 11)), Err(GameError::InvalidCoords));
        assert_eq!(board.validate_coords((10, 0)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn open_rejects_out_of_bounds_coords() {
        let mut board = Board::create(3, 3, 1).unwrap();

        assert_eq!(board.open((3, 0)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn open_is_a_no_op_on_an_open_tile() {
        let mut board = board_with_mines(3, 3, &[(0, 0)]);

        assert_eq!(board.open((1, 1)), Ok(OpenOutcome::Opened));
        assert_eq!(board.open((1, 1)), Ok(OpenOutcome::NoChange));
        assert_eq!(board.tile_at((1, 1)).state(), TileState::Open);
    }

    #[test]
    fn open_reports_an_explosion_on_a_mine() {
        let mut board = board_with_mines(3, 3, &[(0, 0)]);

        assert_eq!(board.open((0, 0)), Ok(OpenOutcome::Exploded));
        assert_eq!(board.tile_at((0, 0)).state(), TileState::Open);
    }

    #[test]
    fn open_reveals_a_marked_tile() {
        let mut board = board_with_mines(3, 3, &[(0, 0)]);

        board.mark((1, 1)).unwrap();
        assert_eq!(board.open((1, 1)), Ok(OpenOutcome::Opened));
    }

    #[test]
    fn mark_toggles_between_closed_and_marked() {
        let mut board = Board::create(3, 3, 1).unwrap();

        assert_eq!(board.mark((1, 2)), Ok(MarkOutcome::Changed));
        assert_eq!(board.tile_at((1, 2)).state(), TileState::Marked);
        assert_eq!(board.mark((1, 2)), Ok(MarkOutcome::Changed));
        assert_eq!(board.tile_at((1, 2)).state(), TileState::Closed);
    }

    #[test]
    fn mark_leaves_open_tiles_alone() {
        let mut board = board_with_mines(3, 3, &[(0, 0)]);

        board.open((2, 2)).unwrap();
        assert_eq!(board.mark((2, 2)), Ok(MarkOutcome::NoChange));
        assert_eq!(board.tile_at((2, 2)).state(), TileState::Open);
    }

    #[test]
    fn is_solved_is_false_while_safe_tiles_remain_closed() {
        let mut board = board_with_mines(3, 3, &[(0, 0)]);

        assert!(!board.is_solved());

        board.open((1, 1)).unwrap();
        assert!(!board.is_solved());
        assert_eq!(board.tile_at((2, 2)).state(), TileState::Closed);
    }

    #[test]
    fn is_solved_marks_the_mines_once_every_safe_tile_is_open() {
        let mut board = board_with_mines(3, 3, &[(0, 0)]);
        for row in 0..3 {
            for col in 0..3 {
                if !board.is_mine_at((row, col)) {
                    board.open((row, col)).unwrap();
                }
            }
        }

        assert!(board.is_solved());
        assert_eq!(board.tile_at((0, 0)).state(), TileState::Marked);
    }

    #[test]
    fn mark_all_closed_spares_open_tiles() {
        let mut board = board_with_mines(3, 3, &[(0, 0)]);
        board.open((0, 1)).unwrap();

        board.mark_all_closed();

        assert_eq!(board.tile_at((0, 0)).state(), TileState::Marked);
        assert_eq!(board.tile_at((2, 2)).state(), TileState::Marked);
        assert_eq!(board.tile_at((0, 1)).state(), TileState::Open);
    }

    #[test]
    fn open_all_mines_reveals_the_layout_and_nothing_else() {
        let mut board = board_with_mines(4, 4, &[(0, 0), (3, 3)]);
        board.open((1, 2)).unwrap();

        board.open_all_mines();

        assert_eq!(board.tile_at((0, 0)).state(), TileState::Open);
        assert_eq!(board.tile_at((3, 3)).state(), TileState::Open);
        assert_eq!(board.tile_at((1, 2)).state(), TileState::Open);
        assert_eq!(board.tile_at((2, 2)).state(), TileState::Closed);
    }
}
