use smart_leds::RGB8;
use std::io::{self, Write};
use stacker_lib::common::PixelDisplay;
use stacker_lib::frame::{SCREEN_HEIGHT, SCREEN_WIDTH};

const CONTROLS: &str =
    "Controls: A/D = move, W/Space = rotate, S = drop, F = fast drop, Enter = restart, Q = quit";

// Roughly the escape sequence length per pixel
const SCREEN_SIZE_HINT: usize = SCREEN_WIDTH * SCREEN_HEIGHT * 24;

// Simple console display implementation
pub struct ConsoleDisplay {
    first_frame: bool,
}

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self { first_frame: true }
    }
}

/// Builds one ANSI frame; each pixel is two truecolor block characters wide.
fn frame_text(pixels: &[RGB8]) -> String {
    let mut out = String::with_capacity(SCREEN_SIZE_HINT);
    for y in 0..SCREEN_HEIGHT {
        for x in 0..SCREEN_WIDTH {
            match pixels.get(y * SCREEN_WIDTH + x) {
                Some(color) => out.push_str(&format!(
                    "\x1b[38;2;{};{};{}m\u{2588}\u{2588}\x1b[0m",
                    color.r, color.g, color.b
                )),
                None => out.push_str("  "),
            }
        }
        out.push('\n');
    }
    out.push_str(CONTROLS);
    out.push('\n');
    out
}

impl PixelDisplay for ConsoleDisplay {
    async fn write(&mut self, pixels: &[RGB8]) {
        let mut stdout = io::stdout();
        if !self.first_frame {
            // Move cursor up to overwrite previous frame
            let _ = stdout.write_all(format!("\x1b[{}A", SCREEN_HEIGHT + 1).as_bytes());
        }
        self.first_frame = false;

        let _ = stdout.write_all(frame_text(pixels).as_bytes());
        let _ = stdout.flush();
    }
}
