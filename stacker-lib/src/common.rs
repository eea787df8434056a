use smart_leds::RGB8;

use crate::input::Buttons;

pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

// Top-left of a freshly spawned piece's 4x4 box.
pub const SPAWN_X: i8 = BOARD_WIDTH as i8 / 2 - 2;
pub const SPAWN_Y: i8 = 0;

// Gravity, all in milliseconds
pub const BASE_GRAVITY_MS: u32 = 500;
pub const GRAVITY_STEP_MS: u32 = 40;
pub const MIN_GRAVITY_MS: u32 = 100;
pub const FAST_DROP_MS: u32 = 50;

pub const LINES_PER_LEVEL: u32 = 10;

/// Cadence of the shell loop.
pub const FRAME_MILLIS: u64 = 20;

/// Source of piece picks, consulted once per spawn.
pub trait RandomSource {
    /// Uniform value in `0..max`; 0 when `max` is 0.
    fn next_range(&mut self, max: u8) -> u8;
}

// Simple PRNG implementation
pub struct Prng {
    state: u32,
}

impl Prng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u8 {
        self.state = self.state.wrapping_mul(1103515245).wrapping_add(12345);
        (self.state >> 16) as u8
    }
}

impl RandomSource for Prng {
    fn next_range(&mut self, max: u8) -> u8 {
        if max == 0 {
            return 0;
        }
        self.next() % max
    }
}

/// Monotonically non-decreasing millisecond counter.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

// Timer abstraction trait
pub trait Timer {
    async fn sleep_millis(&self, millis: u64);
}

/// Trait for the pixel panel the shell draws on
pub trait PixelDisplay {
    async fn write(&mut self, pixels: &[RGB8]);
}

/// Trait for the button pad: reports which buttons are held right now
pub trait ButtonPad {
    async fn poll(&mut self) -> Buttons;
}
