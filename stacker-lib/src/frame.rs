use smart_leds::RGB8;

use crate::board::EMPTY;
use crate::catalog::{Rotation, BLUE, CYAN, GREEN, ORANGE, PURPLE, RED, YELLOW};
use crate::common::{RandomSource, BOARD_HEIGHT, BOARD_WIDTH};
use crate::digits::{Glyph, DIGITS, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::game::Stacker;
use crate::mask::Mask;

//  Panel layout
//        x
//     0 ---------------------> 33
//    0+----------+
//     |          |  next
//     |   well   |  score
//   y |  10 x 20 |  lines
//     |          |  level
//   21+----------+

pub const SCREEN_WIDTH: usize = 34;
pub const SCREEN_HEIGHT: usize = 22;
pub const SCREEN_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

// Top-left of the well interior
const WELL_X: usize = 1;
const WELL_Y: usize = 1;

const PANEL_X: usize = BOARD_WIDTH + 3;
const NEXT_Y: usize = 1;
const SCORE_Y: usize = 4;
const LINES_Y: usize = 10;
const LEVEL_Y: usize = 16;

const SCORE_DIGITS: u8 = 5;
const LINES_DIGITS: u8 = 5;
const LEVEL_DIGITS: u8 = 2;

const BLINK_MILLIS: u64 = 500;

pub const BLACK: RGB8 = RGB8::new(0, 0, 0);
pub const GRAY: RGB8 = RGB8::new(96, 96, 96);
pub const WHITE: RGB8 = RGB8::new(255, 255, 255);

// Color indices; 1..=7 are the board cell ids
pub const BLACK_IDX: u8 = 0;
pub const BORDER_IDX: u8 = 8;
pub const TEXT_IDX: u8 = 9;

pub type PaletteType = [RGB8; 10];
pub const PALETTE: PaletteType = [
    BLACK, CYAN, YELLOW, PURPLE, GREEN, RED, BLUE, ORANGE, GRAY, WHITE,
];

trait PaletteIndexer {
    fn at(&self, idx: u8) -> RGB8;
}

impl PaletteIndexer for PaletteType {
    fn at(&self, idx: u8) -> RGB8 {
        self[idx as usize % self.len()]
    }
}

/// Color-index image of the whole panel, redrawn from the game every frame.
pub struct FrameBuffer {
    content: [u8; SCREEN_SIZE],
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            content: [BLACK_IDX; SCREEN_SIZE],
        }
    }

    pub fn clear(&mut self) {
        self.content.fill(BLACK_IDX);
    }

    pub fn set(&mut self, x: usize, y: usize, color: u8) {
        if x < SCREEN_WIDTH && y < SCREEN_HEIGHT {
            self.content[y * SCREEN_WIDTH + x] = color;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x < SCREEN_WIDTH && y < SCREEN_HEIGHT {
            self.content[y * SCREEN_WIDTH + x]
        } else {
            BLACK_IDX
        }
    }

    pub fn draw_mask(&mut self, x: usize, y: usize, mask: Mask, color: u8) {
        for (col, row) in mask.cells() {
            self.set(x + col as usize, y + row as usize, color);
        }
    }

    pub fn draw_glyph(&mut self, x: usize, y: usize, glyph: &Glyph, color: u8) {
        for row in 0..GLYPH_HEIGHT {
            for col in 0..GLYPH_WIDTH {
                if glyph.get_bit(col, row) {
                    self.set(x + col as usize, y + row as usize, color);
                }
            }
        }
    }

    /// Draws the lowest `digits` decimal digits of `value`, zero padded.
    pub fn draw_number(&mut self, x: usize, y: usize, value: u32, digits: u8, color: u8) {
        let mut rest = value;
        for idx in (0..digits as usize).rev() {
            let glyph = DIGITS.wrapping_at((rest % 10) as u8);
            self.draw_glyph(x + idx * (GLYPH_WIDTH as usize + 1), y, glyph, color);
            rest /= 10;
        }
    }

    pub fn draw_border(&mut self, color: u8) {
        let right = WELL_X + BOARD_WIDTH;
        let bottom = WELL_Y + BOARD_HEIGHT;
        for y in 0..=bottom {
            self.set(0, y, color);
            self.set(right, y, color);
        }
        for x in 0..=right {
            self.set(x, 0, color);
            self.set(x, bottom, color);
        }
    }

    /// Lights the well frame, used to flag a line clear.
    pub fn highlight_border(&mut self) {
        self.draw_border(TEXT_IDX);
    }

    /// Draws the well, the falling piece, the preview and the counters. After
    /// game over the last piece blinks.
    pub fn compose<R: RandomSource>(&mut self, game: &Stacker<R>, now_ms: u64) {
        self.clear();
        self.draw_border(BORDER_IDX);

        let board = game.board();
        for row in 0..BOARD_HEIGHT {
            for (col, &cell) in board.row(row).iter().enumerate() {
                if cell != EMPTY {
                    self.set(WELL_X + col, WELL_Y + row, cell);
                }
            }
        }

        let blink_off = game.is_game_over() && (now_ms / BLINK_MILLIS) % 2 == 1;
        if !blink_off {
            let piece = game.piece();
            for (x, y) in piece.cells() {
                if x >= 0 && (x as usize) < BOARD_WIDTH && y >= 0 && (y as usize) < BOARD_HEIGHT {
                    self.set(WELL_X + x as usize, WELL_Y + y as usize, piece.kind.cell());
                }
            }
        }

        let next = game.next();
        self.draw_mask(PANEL_X, NEXT_Y, next.mask(Rotation::default()), next.cell());

        self.draw_number(PANEL_X, SCORE_Y, game.score(), SCORE_DIGITS, TEXT_IDX);
        self.draw_number(PANEL_X, LINES_Y, game.lines(), LINES_DIGITS, TEXT_IDX);
        self.draw_number(PANEL_X, LEVEL_Y, game.level(), LEVEL_DIGITS, TEXT_IDX);
    }

    pub fn render(&self, pixels: &mut [RGB8]) {
        for (pixel, &color_idx) in pixels.iter_mut().zip(self.content.iter()) {
            *pixel = PALETTE.at(color_idx);
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
