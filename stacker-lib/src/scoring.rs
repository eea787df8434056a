//! Line clearing and the score / level / gravity bookkeeping that follows a
//! lock.

use crate::board::Board;
use crate::common::{
    BASE_GRAVITY_MS, BOARD_HEIGHT, GRAVITY_STEP_MS, LINES_PER_LEVEL, MIN_GRAVITY_MS,
};

/// Points per lock, indexed by rows cleared; multiplied by the level.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Points for each row a piece is pushed down by hand.
pub const SOFT_DROP_SCORE: u32 = 1;

pub fn line_score(lines: u8, level: u32) -> u32 {
    LINE_SCORES
        .get(lines as usize)
        .copied()
        .unwrap_or(0)
        .saturating_mul(level)
}

pub fn level_for(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + 1
}

pub fn gravity_interval(level: u32) -> u32 {
    let slowdown = level.saturating_sub(1).saturating_mul(GRAVITY_STEP_MS);
    BASE_GRAVITY_MS.saturating_sub(slowdown).max(MIN_GRAVITY_MS)
}

/// Removes every full row, bottom to top. A row index is checked again after
/// a clear because the row that slid into it may be full as well.
pub fn clear_full_rows(board: &mut Board) -> u8 {
    let mut cleared = 0;
    let mut row = BOARD_HEIGHT;
    while row > 0 {
        if board.row_is_full(row - 1) {
            board.clear_and_shift(row - 1);
            cleared += 1;
        } else {
            row -= 1;
        }
    }
    cleared
}

/// Score, line count and the values derived from them.
#[derive(Default, Copy, Clone, PartialEq, Eq, Debug)]
pub struct Session {
    score: u32,
    lines: u32,
}

impl Session {
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        level_for(self.lines)
    }

    pub fn gravity_interval(&self) -> u32 {
        gravity_interval(self.level())
    }

    /// Books a lock that cleared `cleared` rows. Points use the level the
    /// piece was played at; the level moves up afterwards.
    pub fn record_clear(&mut self, cleared: u8) {
        if cleared == 0 {
            return;
        }
        self.score = self.score.saturating_add(line_score(cleared, self.level()));
        self.lines += cleared as u32;
    }

    pub fn record_soft_drop(&mut self) {
        self.score = self.score.saturating_add(SOFT_DROP_SCORE);
    }
}
