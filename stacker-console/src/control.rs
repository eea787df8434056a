use std::io::{self, Read};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use stacker_lib::common::ButtonPad;
use stacker_lib::Buttons;

// Store original terminal state for restoration
static mut ORIGINAL_TERMIOS: Option<libc::termios> = None;

// Platform-specific raw terminal setup
#[cfg(unix)]
pub fn enable_raw_mode() {
    use std::os::unix::io::AsRawFd;
    unsafe {
        let fd = io::stdin().as_raw_fd();
        let mut termios: libc::termios = std::mem::zeroed();
        libc::tcgetattr(fd, &mut termios);

        ORIGINAL_TERMIOS = Some(termios);

        termios.c_lflag &= !(libc::ICANON | libc::ECHO);
        termios.c_cc[libc::VMIN] = 0;
        termios.c_cc[libc::VTIME] = 0;

        libc::tcsetattr(fd, libc::TCSANOW, &termios);

        let flags = libc::fcntl(fd, libc::F_GETFL);
        libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK);
    }
}

#[cfg(unix)]
pub fn restore_terminal() {
    use std::os::unix::io::AsRawFd;
    unsafe {
        if let Some(original) = ORIGINAL_TERMIOS {
            let fd = io::stdin().as_raw_fd();
            libc::tcsetattr(fd, libc::TCSANOW, &original);

            let flags = libc::fcntl(fd, libc::F_GETFL);
            libc::fcntl(fd, libc::F_SETFL, flags & !libc::O_NONBLOCK);
        }
    }
}

#[cfg(not(unix))]
pub fn enable_raw_mode() {
    // No-op for non-Unix systems
}

#[cfg(not(unix))]
pub fn restore_terminal() {
    // No-op for non-Unix systems
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum KeyEvent {
    Left,
    Right,
    Rotate,
    Drop,
    FastToggle,
    Restart,
    Quit,
    None,
}

/// A terminal only reports key presses, never releases. Every press is
/// reported as held for exactly one poll, with a released poll in between
/// when the same key repeats. Fast-drop has no natural "held" on a keyboard
/// so `f` toggles it.
#[derive(Default)]
struct PadState {
    pending: Buttons,
    last: Buttons,
    fast: bool,
}

impl PadState {
    fn press(&mut self, key: KeyEvent) {
        match key {
            KeyEvent::Left => self.pending.left = true,
            KeyEvent::Right => self.pending.right = true,
            KeyEvent::Rotate => self.pending.rotate = true,
            KeyEvent::Drop => self.pending.soft_drop = true,
            KeyEvent::Restart => self.pending.restart = true,
            KeyEvent::FastToggle => self.fast = !self.fast,
            KeyEvent::Quit | KeyEvent::None => {}
        }
    }

    fn take(&mut self) -> Buttons {
        let last = self.last;
        let pending = &mut self.pending;
        let out = Buttons {
            left: pulse(&mut pending.left, last.left),
            right: pulse(&mut pending.right, last.right),
            rotate: pulse(&mut pending.rotate, last.rotate),
            soft_drop: pulse(&mut pending.soft_drop, last.soft_drop),
            fast_drop: self.fast,
            restart: pulse(&mut pending.restart, last.restart),
        };
        self.last = out;
        out
    }
}

// Reports a pending press unless the key was already down on the last poll;
// in that case it is kept for the next one.
fn pulse(pending: &mut bool, was_down: bool) -> bool {
    if *pending && !was_down {
        *pending = false;
        true
    } else {
        false
    }
}

pub struct ConsoleButtonPad {
    state: Arc<Mutex<PadState>>,
    _input_thread: std::thread::JoinHandle<()>,
}

impl ConsoleButtonPad {
    pub fn new() -> Self {
        let state = Arc::new(Mutex::new(PadState::default()));
        let state_clone = state.clone();

        let input_thread = std::thread::spawn(move || loop {
            let key = Self::read_key();
            if key != KeyEvent::None {
                if key == KeyEvent::Quit {
                    restore_terminal();
                    println!("\nTerminal restored. Goodbye!");
                    std::process::exit(0);
                }
                if let Ok(mut state) = state_clone.lock() {
                    state.press(key);
                }
            }

            std::thread::sleep(Duration::from_millis(5));
        });

        Self {
            state,
            _input_thread: input_thread,
        }
    }

    fn read_key() -> KeyEvent {
        let mut buffer = [0; 1];
        let mut stdin = io::stdin();

        match stdin.read(&mut buffer) {
            Ok(1) => match buffer[0] {
                27 => {
                    let mut seq = [0; 2];
                    if stdin.read(&mut seq).unwrap_or(0) == 2 {
                        match seq {
                            [91, 65] => KeyEvent::Rotate, // [A
                            [91, 66] => KeyEvent::Drop,   // [B
                            [91, 67] => KeyEvent::Right,  // [C
                            [91, 68] => KeyEvent::Left,   // [D
                            _ => KeyEvent::None,
                        }
                    } else {
                        KeyEvent::None
                    }
                }
                b' ' | b'w' | b'W' => KeyEvent::Rotate,
                b'a' | b'A' => KeyEvent::Left,
                b'd' | b'D' => KeyEvent::Right,
                b's' | b'S' => KeyEvent::Drop,
                b'f' | b'F' => KeyEvent::FastToggle,
                b'\n' | b'\r' | b'r' | b'R' => KeyEvent::Restart,
                b'q' | b'Q' => KeyEvent::Quit,
                _ => KeyEvent::None,
            },
            _ => KeyEvent::None,
        }
    }
}

impl ButtonPad for ConsoleButtonPad {
    async fn poll(&mut self) -> Buttons {
        match self.state.lock() {
            Ok(mut state) => state.take(),
            Err(_) => Buttons::default(),
        }
    }
}
