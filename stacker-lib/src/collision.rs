use crate::board::{Board, EMPTY};
use crate::catalog::{PieceKind, Rotation};
use crate::common::{BOARD_HEIGHT, BOARD_WIDTH};

/// True when the piece placed with its box at `(x, y)` pokes through a wall
/// or the floor, or overlaps a locked cell. Cells above the top edge are
/// allowed as long as they stay between the walls.
pub fn collides(board: &Board, kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> bool {
    for (col, row) in kind.mask(rotation).cells() {
        let bx = x + col as i8;
        let by = y + row as i8;

        if bx < 0 || bx >= BOARD_WIDTH as i8 || by >= BOARD_HEIGHT as i8 {
            return true;
        }

        if by >= 0 && board.get(bx as usize, by as usize) != EMPTY {
            return true;
        }
    }
    false
}
