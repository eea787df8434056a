//! The well: a fixed grid of locked cells.
//!
//! Rows run top (0) to bottom (`BOARD_HEIGHT - 1`), columns left (0) to
//! right (`BOARD_WIDTH - 1`). Bounds checks belong to the collision engine;
//! the accessors here index directly and panic on a broken contract.

use crate::common::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::piece::Piece;

/// 0 for an empty cell, otherwise the id of the kind that locked there.
pub type Cell = u8;

pub const EMPTY: Cell = 0;
const MAX_CELL: Cell = 7;

#[derive(Clone, PartialEq, Debug)]
pub struct Board {
    rows: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Board {
    pub fn new() -> Self {
        Self {
            rows: [[EMPTY; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    pub fn width(&self) -> usize {
        BOARD_WIDTH
    }

    pub fn height(&self) -> usize {
        BOARD_HEIGHT
    }

    pub fn get(&self, col: usize, row: usize) -> Cell {
        self.rows[row][col]
    }

    pub fn set(&mut self, col: usize, row: usize, cell: Cell) {
        debug_assert!(cell <= MAX_CELL, "cell value {} out of range", cell);
        self.rows[row][col] = cell;
    }

    pub fn row(&self, row: usize) -> &[Cell; BOARD_WIDTH] {
        &self.rows[row]
    }

    pub fn row_is_full(&self, row: usize) -> bool {
        self.rows[row].iter().all(|&cell| cell != EMPTY)
    }

    /// Removes `row`, slides every row above it down by one and empties the
    /// top row.
    pub fn clear_and_shift(&mut self, row: usize) {
        self.rows.copy_within(0..row, 1);
        self.rows[0] = [EMPTY; BOARD_WIDTH];
    }

    pub fn reset(&mut self) {
        for row in self.rows.iter_mut() {
            row.fill(EMPTY);
        }
    }

    /// Writes the piece's kind into every cell it covers. Cells outside the
    /// well are dropped.
    pub fn merge(&mut self, piece: &Piece) {
        let cell = piece.kind.cell();
        for (x, y) in piece.cells() {
            if x >= 0 && (x as usize) < BOARD_WIDTH && y >= 0 && (y as usize) < BOARD_HEIGHT {
                self.set(x as usize, y as usize, cell);
            }
        }
    }

    pub fn occupied(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&cell| cell != EMPTY)
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::catalog::{PieceKind, Rotation};

    /// Builds a board from the bottom up: the last line of `art` lands on the
    /// bottom row. `#` locks a T cell, anything else is empty.
    pub(crate) fn board_from(art: &str) -> Board {
        let mut board = Board::new();
        let lines: Vec<&str> = art.trim().lines().map(str::trim).collect();
        let offset = BOARD_HEIGHT - lines.len();
        for (idx, line) in lines.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                if ch == '#' {
                    board.set(col, offset + idx, PieceKind::T.cell());
                }
            }
        }
        board
    }

    #[test]
    fn new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.width(), 10);
        assert_eq!(board.height(), 20);
        assert_eq!(board.occupied(), 0);
        for row in 0..BOARD_HEIGHT {
            assert!(!board.row_is_full(row));
        }
    }

    #[test]
    fn set_and_get() {
        let mut board = Board::new();
        board.set(4, 12, PieceKind::Z.cell());
        assert_eq!(board.get(4, 12), PieceKind::Z.cell());
        assert_eq!(board.get(5, 12), EMPTY);
        assert_eq!(board.occupied(), 1);
    }

    #[test]
    #[should_panic]
    fn get_out_of_range_panics() {
        Board::new().get(BOARD_WIDTH, 0);
    }

    #[test]
    fn full_row_detection() {
        let board = board_from(
            "
            #########.
            ##########
            ",
        );
        assert!(board.row_is_full(19));
        assert!(!board.row_is_full(18));
        assert!(!board.row_is_full(0));
    }

    #[test]
    fn clear_and_shift_drops_rows_above() {
        let mut board = board_from(
            "
            #.........
            .#........
            ##########
            ..#.......
            ",
        );
        let before = board.occupied();
        board.clear_and_shift(18);

        assert_eq!(board.occupied(), before - BOARD_WIDTH);
        assert_eq!(board, board_from(
            "
            #.........
            .#........
            ..#.......
            ",
        ));
    }

    #[test]
    fn clear_and_shift_top_row() {
        let mut board = Board::new();
        for row in 0..BOARD_HEIGHT {
            board.rows[row] = [PieceKind::I.cell(); BOARD_WIDTH];
        }
        board.rows[1][3] = EMPTY;
        board.clear_and_shift(0);
        assert_eq!(board.row(0), &[EMPTY; BOARD_WIDTH]);
        assert!(!board.row_is_full(1));
        assert!(board.row_is_full(2));
    }

    #[test]
    fn clear_keeps_relative_order() {
        let mut board = board_from(
            "
            #.........
            ##########
            .#........
            ##########
            ..#.......
            ",
        );
        board.clear_and_shift(18);
        board.clear_and_shift(17);
        assert_eq!(board, board_from(
            "
            #.........
            .#........
            ..#.......
            ",
        ));
    }

    #[test]
    fn reset_empties_everything() {
        let mut board = board_from(
            "
            ###.......
            ##########
            ",
        );
        board.reset();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn merge_writes_kind_id() {
        let mut board = Board::new();
        let piece = Piece::new(PieceKind::L, Rotation::new(0), 0, 18);
        board.merge(&piece);

        assert_eq!(board.occupied(), 4);
        assert_eq!(board.get(2, 18), PieceKind::L.cell());
        assert_eq!(board.get(0, 19), PieceKind::L.cell());
        assert_eq!(board.get(1, 19), PieceKind::L.cell());
        assert_eq!(board.get(2, 19), PieceKind::L.cell());
        assert!(!board.row_is_full(19));
    }
}
