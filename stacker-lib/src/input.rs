/// Logical buttons as sampled once per tick. `true` means held.
#[derive(Default, Copy, Clone, PartialEq, Eq, Debug)]
pub struct Buttons {
    pub left: bool,
    pub right: bool,
    pub rotate: bool,
    pub soft_drop: bool,
    pub fast_drop: bool,
    pub restart: bool,
}

/// Turns held buttons into presses by remembering the previous sample.
#[derive(Default)]
pub struct InputLatch {
    previous: Buttons,
}

impl InputLatch {
    /// Returns the buttons that went down since the last sample. Fast-drop
    /// is a held modifier and is passed through as is.
    pub fn update(&mut self, now: Buttons) -> Buttons {
        let prev = self.previous;
        self.previous = now;
        Buttons {
            left: now.left && !prev.left,
            right: now.right && !prev.right,
            rotate: now.rotate && !prev.rotate,
            soft_drop: now.soft_drop && !prev.soft_drop,
            fast_drop: now.fast_drop,
            restart: now.restart && !prev.restart,
        }
    }
}
