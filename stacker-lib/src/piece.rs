use crate::board::Board;
use crate::catalog::{PieceKind, Rotation};
use crate::collision::collides;
use crate::common::{SPAWN_X, SPAWN_Y};

/// A piece placed on the board: kind, rotation and the top-left corner of
/// its 4x4 box.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    pub fn new(kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation,
            x,
            y,
        }
    }

    pub fn spawned(kind: PieceKind) -> Self {
        Self::new(kind, Rotation::default(), SPAWN_X, SPAWN_Y)
    }

    /// Absolute board coordinates of the occupied cells.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        self.kind
            .mask(self.rotation)
            .cells()
            .map(move |(col, row)| (x + col as i8, y + row as i8))
    }

    pub fn collides(&self, board: &Board) -> bool {
        collides(board, self.kind, self.rotation, self.x, self.y)
    }
}

/// Owns the falling piece and the next-piece preview. Every request is
/// checked against the board first; a blocked request leaves the piece as it
/// was.
pub struct Controller {
    piece: Piece,
    next: PieceKind,
}

impl Controller {
    pub fn new(current: PieceKind, next: PieceKind) -> Self {
        Self {
            piece: Piece::spawned(current),
            next,
        }
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    pub fn next(&self) -> PieceKind {
        self.next
    }

    pub fn set_next(&mut self, kind: PieceKind) {
        self.next = kind;
    }

    /// Returns whether the piece moved.
    pub fn move_by(&mut self, board: &Board, dx: i8, dy: i8) -> bool {
        let x = self.piece.x + dx;
        let y = self.piece.y + dy;
        if collides(board, self.piece.kind, self.piece.rotation, x, y) {
            return false;
        }
        self.piece.x = x;
        self.piece.y = y;
        true
    }

    /// Quarter turn clockwise in place; no kicks are tried.
    pub fn rotate(&mut self, board: &Board) -> bool {
        let rotation = self.piece.rotation.next();
        if collides(board, self.piece.kind, rotation, self.piece.x, self.piece.y) {
            return false;
        }
        self.piece.rotation = rotation;
        true
    }

    /// Places `kind` at the spawn point. The piece is placed even when it
    /// overlaps, so the failed spawn stays visible; the return value tells
    /// whether the placement is legal.
    pub fn try_spawn(&mut self, board: &Board, kind: PieceKind) -> bool {
        self.piece = Piece::spawned(kind);
        !self.piece.collides(board)
    }

    /// Swaps `fresh` into the preview slot and hands back the kind it held.
    pub fn promote(&mut self, fresh: PieceKind) -> PieceKind {
        core::mem::replace(&mut self.next, fresh)
    }
}
