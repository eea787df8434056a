use smart_leds::RGB8;

use crate::common::{ButtonPad, Clock, PixelDisplay, Prng, Timer, FRAME_MILLIS};
use crate::frame::{FrameBuffer, SCREEN_SIZE};
use crate::game::{Outcome, Stacker};
use crate::log::info;

// How long the well frame stays lit after a line clear
const FLASH_MILLIS: u64 = 100;

/// Drives one block-stacker session forever: sample the pad, advance the
/// engine, redraw, then yield to the platform timer until the next frame.
pub async fn run_stacker<D, P, C, T, F>(
    display: &mut D,
    pad: &mut P,
    clock: &C,
    timer: &T,
    seed_fn: F,
) where
    D: PixelDisplay,
    P: ButtonPad,
    C: Clock,
    T: Timer,
    F: Fn() -> u32,
{
    let mut pixels: [RGB8; SCREEN_SIZE] = [RGB8::default(); SCREEN_SIZE];
    let mut screen = FrameBuffer::new();
    let mut game = Stacker::new(Prng::new(seed_fn()), clock.now_millis());
    let mut flash_until = 0;

    info!("block stacker running");

    loop {
        let buttons = pad.poll().await;
        let now = clock.now_millis();

        match game.tick(buttons, now) {
            Outcome::Locked { lines } if lines > 0 => flash_until = now + FLASH_MILLIS,
            Outcome::Restarted => flash_until = 0,
            _ => {}
        }

        screen.compose(&game, now);
        if now < flash_until {
            screen.highlight_border();
        }
        screen.render(&mut pixels);
        display.write(&pixels).await;

        timer.sleep_millis(FRAME_MILLIS).await;
    }
}
