use core::fmt;

use smart_leds::RGB8;

use crate::board::{Cell, EMPTY};
use crate::mask::Mask;

// SHAPES: [[Mask; 4]; 7], generated by build.rs from ASCII art
include!(concat!(env!("OUT_DIR"), "/shapes.rs"));

pub const KIND_COUNT: usize = 7;
pub const ROTATIONS: u8 = 4;

pub const CYAN: RGB8 = RGB8::new(0, 255, 255);
pub const YELLOW: RGB8 = RGB8::new(255, 255, 0);
pub const PURPLE: RGB8 = RGB8::new(128, 0, 128);
pub const GREEN: RGB8 = RGB8::new(0, 255, 0);
pub const RED: RGB8 = RGB8::new(255, 0, 0);
pub const BLUE: RGB8 = RGB8::new(0, 0, 255);
pub const ORANGE: RGB8 = RGB8::new(255, 165, 0);

const PIECE_COLORS: [RGB8; KIND_COUNT] = [CYAN, YELLOW, PURPLE, GREEN, RED, BLUE, ORANGE];

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    pub const ALL: [PieceKind; KIND_COUNT] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    pub fn from_index(idx: u8) -> Option<Self> {
        Self::ALL.get(idx as usize).copied()
    }

    pub fn wrapping_at(idx: u8) -> Self {
        Self::ALL[idx as usize % KIND_COUNT]
    }

    /// Kind that locked a board cell, `None` for an empty one.
    pub fn from_cell(cell: Cell) -> Option<Self> {
        match cell {
            EMPTY => None,
            id => Self::from_index(id - 1),
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Value written into the board when this kind locks.
    pub fn cell(self) -> Cell {
        self as u8 + 1
    }

    pub fn mask(self, rotation: Rotation) -> Mask {
        SHAPES[self.index()][rotation.index()]
    }

    pub fn color(self) -> RGB8 {
        PIECE_COLORS[self.index()]
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        };
        f.write_str(name)
    }
}

/// Rotation state, always kept in `0..4`.
#[derive(Default, Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub struct Rotation(u8);

impl Rotation {
    pub const fn new(turns: u8) -> Self {
        Self(turns % ROTATIONS)
    }

    /// One quarter turn clockwise.
    pub fn next(self) -> Self {
        Self::new(self.0 + 1)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}
