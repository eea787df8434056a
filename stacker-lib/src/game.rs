use crate::board::Board;
use crate::catalog::{PieceKind, KIND_COUNT};
use crate::common::{RandomSource, FAST_DROP_MS};
use crate::input::{Buttons, InputLatch};
use crate::log::{debug, info};
use crate::piece::{Controller, Piece};
use crate::scoring::{clear_full_rows, Session};

/// Where the game is. Only `Falling` and `GameOver` survive between ticks;
/// the others are passed through while a lock is being resolved.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum Phase {
    Spawning,
    Falling,
    Locking,
    Clearing,
    GameOver,
}

/// What a tick did, for shells that want to react (flash, sound, log).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Outcome {
    Idle,
    Locked { lines: u8 },
    GameOver,
    Restarted,
}

/// One block-stacker session. The shell owns it and calls [`Stacker::tick`]
/// once per frame with the held buttons and the current clock reading.
pub struct Stacker<R> {
    board: Board,
    controller: Controller,
    session: Session,
    phase: Phase,
    latch: InputLatch,
    last_step_ms: u64,
    random: R,
}

impl<R: RandomSource> Stacker<R> {
    pub fn new(random: R, now_ms: u64) -> Self {
        let mut game = Self {
            board: Board::new(),
            // placeholder until restart fills the preview and spawns
            controller: Controller::new(PieceKind::I, PieceKind::I),
            session: Session::default(),
            phase: Phase::Spawning,
            latch: InputLatch::default(),
            last_step_ms: now_ms,
            random,
        };
        game.restart(now_ms);
        game
    }

    /// Clears the well and the score and starts over with a fresh piece.
    pub fn restart(&mut self, now_ms: u64) {
        self.board.reset();
        self.session = Session::default();
        let first = self.draw();
        self.controller.set_next(first);
        self.phase = Phase::Spawning;
        self.settle();
        self.last_step_ms = now_ms;
        info!("new game");
    }

    pub fn tick(&mut self, buttons: Buttons, now_ms: u64) -> Outcome {
        let pressed = self.latch.update(buttons);
        match self.phase {
            Phase::GameOver => {
                if pressed.restart {
                    self.restart(now_ms);
                    Outcome::Restarted
                } else {
                    Outcome::Idle
                }
            }
            _ => self.fall(pressed, now_ms),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece(&self) -> &Piece {
        self.controller.piece()
    }

    pub fn next(&self) -> PieceKind {
        self.controller.next()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    pub fn lines(&self) -> u32 {
        self.session.lines()
    }

    pub fn level(&self) -> u32 {
        self.session.level()
    }

    pub fn gravity_interval(&self) -> u32 {
        self.session.gravity_interval()
    }

    fn draw(&mut self) -> PieceKind {
        PieceKind::wrapping_at(self.random.next_range(KIND_COUNT as u8))
    }

    fn fall(&mut self, pressed: Buttons, now_ms: u64) -> Outcome {
        if pressed.left {
            self.controller.move_by(&self.board, -1, 0);
        }
        if pressed.right {
            self.controller.move_by(&self.board, 1, 0);
        }
        if pressed.rotate {
            self.controller.rotate(&self.board);
        }
        if pressed.soft_drop && self.controller.move_by(&self.board, 0, 1) {
            self.session.record_soft_drop();
        }

        let interval = if pressed.fast_drop {
            FAST_DROP_MS
        } else {
            self.session.gravity_interval()
        };
        if now_ms.saturating_sub(self.last_step_ms) <= interval as u64 {
            return Outcome::Idle;
        }
        self.last_step_ms = now_ms;

        if self.controller.move_by(&self.board, 0, 1) {
            return Outcome::Idle;
        }
        self.phase = Phase::Locking;
        self.settle()
    }

    // Runs the pass-through phases until the game rests in Falling or
    // GameOver.
    fn settle(&mut self) -> Outcome {
        let mut cleared = 0;
        loop {
            self.phase = match self.phase {
                Phase::Locking => {
                    self.board.merge(self.controller.piece());
                    Phase::Clearing
                }
                Phase::Clearing => {
                    cleared = clear_full_rows(&mut self.board);
                    self.session.record_clear(cleared);
                    if cleared > 0 {
                        info!(
                            "cleared {} lines, score {} level {}",
                            cleared,
                            self.session.score(),
                            self.session.level()
                        );
                    }
                    Phase::Spawning
                }
                Phase::Spawning => {
                    let fresh = self.draw();
                    let kind = self.controller.promote(fresh);
                    if self.controller.try_spawn(&self.board, kind) {
                        debug!("spawned {}, next {}", kind, fresh);
                        Phase::Falling
                    } else {
                        info!("game over, score {}", self.session.score());
                        Phase::GameOver
                    }
                }
                Phase::Falling => return Outcome::Locked { lines: cleared },
                Phase::GameOver => return Outcome::GameOver,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tests::board_from;
    use crate::board::EMPTY;
    use crate::catalog::Rotation;
    use crate::common::BOARD_WIDTH;

    struct Script {
        kinds: &'static [PieceKind],
        pos: usize,
    }

    impl Script {
        fn new(kinds: &'static [PieceKind]) -> Self {
            Self { kinds, pos: 0 }
        }
    }

    impl RandomSource for Script {
        fn next_range(&mut self, _max: u8) -> u8 {
            let kind = self.kinds[self.pos % self.kinds.len()];
            self.pos += 1;
            kind.index() as u8
        }
    }

    fn idle() -> Buttons {
        Buttons::default()
    }

    fn left() -> Buttons {
        Buttons {
            left: true,
            ..Buttons::default()
        }
    }

    fn rotate() -> Buttons {
        Buttons {
            rotate: true,
            ..Buttons::default()
        }
    }

    fn soft_drop() -> Buttons {
        Buttons {
            soft_drop: true,
            ..Buttons::default()
        }
    }

    fn fast_drop() -> Buttons {
        Buttons {
            fast_drop: true,
            ..Buttons::default()
        }
    }

    fn restart() -> Buttons {
        Buttons {
            restart: true,
            ..Buttons::default()
        }
    }

    fn game(kinds: &'static [PieceKind]) -> Stacker<Script> {
        Stacker::new(Script::new(kinds), 0)
    }

    /// Sets the falling piece to `kind`, turned `turns` times, with its box at `(x, y)`.
    fn place(game: &mut Stacker<Script>, kind: PieceKind, turns: u8, x: i8, y: i8) {
        let next = game.next();
        game.controller = Controller::new(kind, next);
        for _ in 0..turns {
            assert!(game.controller.rotate(&game.board));
        }
        let spawn = *game.controller.piece();
        assert!(game.controller.move_by(&game.board, x - spawn.x, y - spawn.y));
    }

    #[test]
    fn new_game_spawns_first_pick() {
        let game = game(&[PieceKind::O, PieceKind::T, PieceKind::S]);
        assert_eq!(game.piece(), &Piece::new(PieceKind::O, Rotation::new(0), 3, 0));
        assert_eq!(game.next(), PieceKind::T);
        assert_eq!(game.phase(), Phase::Falling);
        assert_eq!(game.score(), 0);
        assert_eq!(game.lines(), 0);
        assert_eq!(game.level(), 1);
        assert_eq!(game.gravity_interval(), 500);
        assert_eq!(game.board().occupied(), 0);
    }

    #[test]
    fn gravity_waits_for_interval() {
        let mut game = game(&[PieceKind::T]);
        assert_eq!(game.tick(idle(), 500), Outcome::Idle);
        assert_eq!(game.piece().y, 0);
        game.tick(idle(), 501);
        assert_eq!(game.piece().y, 1);
        game.tick(idle(), 1001);
        assert_eq!(game.piece().y, 1);
        game.tick(idle(), 1002);
        assert_eq!(game.piece().y, 2);
    }

    #[test]
    fn fast_drop_shortens_interval() {
        let mut game = game(&[PieceKind::T]);
        game.tick(fast_drop(), 50);
        assert_eq!(game.piece().y, 0);
        game.tick(fast_drop(), 51);
        assert_eq!(game.piece().y, 1);
        game.tick(fast_drop(), 102);
        assert_eq!(game.piece().y, 2);
        // released: back to the level interval
        game.tick(idle(), 200);
        assert_eq!(game.piece().y, 2);
    }

    #[test]
    fn left_wall_rejects_move() {
        let mut game = game(&[PieceKind::J]);
        for t in 0..3 {
            game.tick(left(), t * 2);
            game.tick(idle(), t * 2 + 1);
        }
        assert_eq!(game.piece().x, 0);
        game.tick(left(), 10);
        assert_eq!(game.piece().x, 0);
        assert_eq!(game.piece().y, 0);
    }

    #[test]
    fn held_move_fires_once() {
        let mut game = game(&[PieceKind::T]);
        for t in 0..10 {
            game.tick(left(), t);
        }
        assert_eq!(game.piece().x, 2);
    }

    #[test]
    fn held_rotate_fires_once() {
        let mut game = game(&[PieceKind::T]);
        for t in 0..10 {
            game.tick(rotate(), t);
        }
        assert_eq!(game.piece().rotation, Rotation::new(1));
        game.tick(idle(), 11);
        game.tick(rotate(), 12);
        assert_eq!(game.piece().rotation, Rotation::new(2));
    }

    #[test]
    fn soft_drop_scores_per_row() {
        let mut game = game(&[PieceKind::T]);
        game.tick(soft_drop(), 1);
        game.tick(soft_drop(), 2);
        assert_eq!(game.piece().y, 1);
        assert_eq!(game.score(), 1);
        game.tick(idle(), 3);
        game.tick(soft_drop(), 4);
        assert_eq!(game.piece().y, 2);
        assert_eq!(game.score(), 2);
    }

    #[test]
    fn soft_drop_on_floor_neither_scores_nor_locks() {
        let mut game = game(&[PieceKind::O, PieceKind::T]);
        place(&mut game, PieceKind::O, 0, 3, 18);
        assert_eq!(game.tick(soft_drop(), 1), Outcome::Idle);
        assert_eq!(game.score(), 0);
        assert_eq!(game.piece().y, 18);
        assert_eq!(game.board().occupied(), 0);
    }

    #[test]
    fn piece_locks_when_gravity_is_blocked() {
        let mut game = game(&[PieceKind::O, PieceKind::T, PieceKind::S]);
        place(&mut game, PieceKind::O, 0, 3, 18);
        assert_eq!(game.tick(idle(), 501), Outcome::Locked { lines: 0 });
        assert_eq!(game.board().occupied(), 4);
        assert_eq!(game.board().get(4, 18), PieceKind::O.cell());
        assert_eq!(game.board().get(5, 19), PieceKind::O.cell());
        assert_eq!(game.piece(), &Piece::new(PieceKind::T, Rotation::new(0), 3, 0));
        assert_eq!(game.next(), PieceKind::S);
        assert_eq!(game.score(), 0);
        assert_eq!(game.phase(), Phase::Falling);
    }

    #[test]
    fn falls_to_floor_then_locks() {
        let mut game = game(&[PieceKind::O, PieceKind::I]);
        let mut now = 0;
        let mut outcome = Outcome::Idle;
        while outcome == Outcome::Idle {
            now += 501;
            outcome = game.tick(idle(), now);
        }
        assert_eq!(outcome, Outcome::Locked { lines: 0 });
        assert_eq!(now, 501 * 19);
        assert_eq!(game.board().get(4, 19), PieceKind::O.cell());
    }

    #[test]
    fn vertical_i_clears_three_rows() {
        let mut game = game(&[PieceKind::T, PieceKind::O]);
        game.board = board_from(
            "
            .#########
            .#########
            .#########
            ",
        );
        // upright I uses box column 2: column 0, rows 16..19
        place(&mut game, PieceKind::I, 1, -2, 16);

        assert_eq!(game.tick(idle(), 501), Outcome::Locked { lines: 3 });
        assert_eq!(game.score(), 500);
        assert_eq!(game.lines(), 3);
        assert_eq!(game.board().occupied(), 1);
        assert_eq!(game.board().get(0, 19), PieceKind::I.cell());
        for col in 1..BOARD_WIDTH {
            assert_eq!(game.board().get(col, 19), EMPTY);
        }
    }

    #[test]
    fn line_clear_pays_by_level() {
        let mut game = game(&[PieceKind::T, PieceKind::O]);
        for _ in 0..3 {
            game.session.record_clear(4);
        }
        assert_eq!(game.level(), 2);
        let before = game.score();
        game.board = board_from(
            "
            .#########
            .#########
            .#########
            ",
        );
        place(&mut game, PieceKind::I, 1, -2, 16);

        assert_eq!(game.tick(idle(), 501), Outcome::Locked { lines: 3 });
        assert_eq!(game.score() - before, 1000);
        assert_eq!(game.lines(), 15);
    }

    #[test]
    fn four_rows_in_one_lock() {
        let mut game = game(&[PieceKind::T]);
        game.board = board_from(
            "
            #########.
            #########.
            #########.
            #########.
            ",
        );
        place(&mut game, PieceKind::I, 1, 7, 16);
        assert_eq!(game.tick(idle(), 501), Outcome::Locked { lines: 4 });
        assert_eq!(game.score(), 800);
        assert_eq!(game.board().occupied(), 0);
    }

    fn blocked_well(game: &mut Stacker<Script>) {
        // rows 2..20 packed but never full, so nothing clears
        for row in 2..20 {
            for col in 0..BOARD_WIDTH - 1 {
                game.board.set(col, row, PieceKind::Z.cell());
            }
        }
    }

    #[test]
    fn blocked_spawn_ends_game() {
        let mut game = game(&[PieceKind::O, PieceKind::O, PieceKind::T]);
        blocked_well(&mut game);

        assert_eq!(game.tick(idle(), 501), Outcome::GameOver);
        assert!(game.is_game_over());
        assert_eq!(game.phase(), Phase::GameOver);
        // the piece that failed to spawn stays on show
        assert_eq!(game.piece(), &Piece::new(PieceKind::O, Rotation::new(0), 3, 0));
    }

    #[test]
    fn game_over_freezes_until_restart() {
        let mut game = game(&[PieceKind::O, PieceKind::O, PieceKind::T]);
        blocked_well(&mut game);
        game.tick(idle(), 501);

        let board = game.board().clone();
        let piece = *game.piece();
        assert_eq!(game.tick(left(), 600), Outcome::Idle);
        assert_eq!(game.tick(soft_drop(), 5000), Outcome::Idle);
        assert_eq!(game.tick(fast_drop(), 9000), Outcome::Idle);
        assert_eq!(game.board(), &board);
        assert_eq!(game.piece(), &piece);

        assert_eq!(game.tick(restart(), 9001), Outcome::Restarted);
        assert_eq!(game.phase(), Phase::Falling);
        assert_eq!(game.board().occupied(), 0);
        assert_eq!(game.score(), 0);
        assert_eq!(game.piece().y, 0);
        // gravity timer restarts with the game
        game.tick(idle(), 9501);
        assert_eq!(game.piece().y, 0);
        game.tick(idle(), 9502);
        assert_eq!(game.piece().y, 1);
    }

    #[test]
    fn restart_held_through_game_over_needs_new_press() {
        let mut game = game(&[PieceKind::O, PieceKind::O, PieceKind::T]);
        blocked_well(&mut game);
        assert_eq!(game.tick(restart(), 501), Outcome::GameOver);
        assert_eq!(game.tick(restart(), 502), Outcome::Idle);
        assert_eq!(game.tick(idle(), 503), Outcome::Idle);
        assert_eq!(game.tick(restart(), 504), Outcome::Restarted);
    }

    #[test]
    fn restart_ignored_while_falling() {
        let mut game = game(&[PieceKind::T]);
        game.tick(soft_drop(), 1);
        assert_eq!(game.tick(restart(), 2), Outcome::Idle);
        assert_eq!(game.score(), 1);
        assert_eq!(game.piece().y, 1);
    }

    #[test]
    fn repeated_clock_reading_is_harmless() {
        let mut game = game(&[PieceKind::T]);
        game.tick(idle(), 501);
        assert_eq!(game.piece().y, 1);
        game.tick(idle(), 400);
        assert_eq!(game.piece().y, 1);
    }
}
