pub const GLYPH_WIDTH: u8 = 3;
pub const GLYPH_HEIGHT: u8 = 5;

/// A 3x5 bitmap, rows stored most significant first, 3 bits per row.
#[derive(Default, Copy, Clone, PartialEq, Eq, Debug)]
pub struct Glyph {
    pub data: u16,
}

impl Glyph {
    pub fn get_bit(&self, col: u8, row: u8) -> bool {
        if col >= GLYPH_WIDTH || row >= GLYPH_HEIGHT {
            return false;
        }
        let bit_idx = (GLYPH_HEIGHT - 1 - row) * GLYPH_WIDTH + (GLYPH_WIDTH - 1 - col);
        self.data & (1u16 << bit_idx) != 0
    }
}

// For example, digit 1:
//  0 1 0  -> 010
//  1 1 0  -> 110
//  0 1 0  -> 010
//  0 1 0  -> 010
//  0 1 0  -> 010
const DIGITS_DATA: [Glyph; 10] = [
    // 0
    Glyph {
        data: 0b111_101_101_101_111,
    },
    // 1
    Glyph {
        data: 0b010_110_010_010_010,
    },
    // 2
    Glyph {
        data: 0b111_001_111_100_111,
    },
    // 3
    Glyph {
        data: 0b111_001_111_001_111,
    },
    // 4
    Glyph {
        data: 0b101_101_111_001_001,
    },
    // 5
    Glyph {
        data: 0b111_100_111_001_111,
    },
    // 6
    Glyph {
        data: 0b111_100_111_101_111,
    },
    // 7
    Glyph {
        data: 0b111_001_001_001_001,
    },
    // 8
    Glyph {
        data: 0b111_101_111_101_111,
    },
    // 9
    Glyph {
        data: 0b111_101_111_001_111,
    },
];

#[derive(Default)]
pub struct Digits([Glyph; 10]);

impl Digits {
    pub const fn new(data: [Glyph; 10]) -> Self {
        Self(data)
    }

    pub fn wrapping_at(&self, idx: u8) -> &Glyph {
        &self.0[idx as usize % 10]
    }
}

pub const DIGITS: Digits = Digits::new(DIGITS_DATA);
