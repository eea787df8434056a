#![cfg_attr(not(test), allow(dead_code))]

use no_std_strings::str32;

/// Side of the square box every rotation state is drawn in.
pub const MASK_SIDE: u8 = 4;

/// 4x4 occupancy mask, bit `row * 4 + col` set for an occupied cell.
#[derive(Default, Copy, Clone, PartialEq, Eq, Debug)]
pub struct Mask {
    pub bits: u16,
}

impl Mask {
    pub const fn new(bits: u16) -> Self {
        Self { bits }
    }

    /// Parses ASCII art where `#` marks an occupied cell. Anything beyond
    /// the 4x4 box is ignored.
    pub fn from_str(art: &str) -> Self {
        let mut bits = 0;
        for (row, line) in art.lines().take(MASK_SIDE as usize).enumerate() {
            for (col, ch) in line.chars().take(MASK_SIDE as usize).enumerate() {
                if ch == '#' {
                    bits |= 1u16 << (row * MASK_SIDE as usize + col);
                }
            }
        }
        Self { bits }
    }

    pub fn get_bit(&self, col: u8, row: u8) -> bool {
        if col >= MASK_SIDE || row >= MASK_SIDE {
            return false;
        }
        self.bits & (1u16 << (row * MASK_SIDE + col)) != 0
    }

    /// Occupied cells as `(col, row)` offsets inside the box.
    pub fn cells(self) -> impl Iterator<Item = (u8, u8)> {
        (0..MASK_SIDE * MASK_SIDE)
            .filter(move |idx| self.bits & (1u16 << idx) != 0)
            .map(|idx| (idx % MASK_SIDE, idx / MASK_SIDE))
    }

    pub fn count(&self) -> u32 {
        self.bits.count_ones()
    }

    pub fn str(&self) -> str32 {
        let mut repr = str32::new();
        for row in 0..MASK_SIDE {
            for col in 0..MASK_SIDE {
                repr.push(if self.get_bit(col, row) { "#" } else { "." });
            }
            repr.push("\n");
        }
        repr
    }
}
