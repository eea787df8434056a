use std::time::{Duration, Instant};
use stacker_lib::common::{Clock, Timer};
use stacker_lib::shell::run_stacker;

mod control;
mod display;

use control::{enable_raw_mode, restore_terminal, ConsoleButtonPad};
use display::ConsoleDisplay;

// Console timer implementation
pub struct ConsoleTimer;

impl Timer for ConsoleTimer {
    async fn sleep_millis(&self, millis: u64) {
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }
}

/// Milliseconds since the console started.
pub struct ConsoleClock {
    start: Instant,
}

impl ConsoleClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for ConsoleClock {
    fn now_millis(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

fn seed() -> u32 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u32)
        .unwrap_or(1)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    enable_raw_mode();

    // Set up Ctrl+C handler to restore terminal
    ctrlc::set_handler(move || {
        restore_terminal();
        println!("\nTerminal restored. Goodbye!");
        std::process::exit(0);
    })?;

    let mut display = ConsoleDisplay::new();
    let mut pad = ConsoleButtonPad::new();
    let clock = ConsoleClock::new();
    let timer = ConsoleTimer;

    log::info!("starting console block stacker");
    run_stacker(&mut display, &mut pad, &clock, &timer, seed).await;

    Ok(())
}
