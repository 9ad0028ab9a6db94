//! Game state module - the event-ordered simulation engine
//!
//! `GameState` owns the matrix, the active/next/held/ghost pieces, the virtual
//! clock and the four competing timers. Time only moves inside [`GameState::tic`]:
//! each call advances the clock and then resolves every due event in time order
//! (repeat-translate, lock, fall, queued input; ties in that order). Support is
//! re-evaluated after every single event, so results never depend on how often the
//! host calls `tic`.

use std::collections::VecDeque;

use arrayvec::ArrayVec;

use crate::image::Matrix;
use crate::pieces::{get_kicks, t_spin_corners, Tetromino};
use crate::rng::PieceQueue;
use crate::scoring::{
    calculate_drop_score, calculate_level, calculate_score, fall_periods, ScoreMessage,
};
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Lateral keys physically held on the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct HeldKeys {
    left: bool,
    right: bool,
}

/// Directions the engine is currently acting on.
///
/// Differs from [`HeldKeys`] while both lateral keys are down: only the most
/// recently pressed one steers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Steering {
    left: bool,
    right: bool,
    down: bool,
}

impl Steering {
    fn direction(&self) -> i32 {
        self.right as i32 - self.left as i32
    }
}

/// Timed events, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimedEvent {
    RepeatTranslate,
    Lock,
    Fall,
    Input,
}

fn earliest(existing: Option<Micros>, candidate: Micros) -> Micros {
    existing.map_or(candidate, |t| t.min(candidate))
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    phase: Phase,
    alive: bool,
    /// Virtual game time in microseconds.
    clock: Micros,
    /// Time of the most recently resolved event; never exceeds `clock`.
    resolved_at: Micros,
    matrix: Matrix,
    active: Tetromino,
    held: Option<PieceKind>,
    ghost: Option<Tetromino>,
    queue: PieceQueue,
    can_hold: bool,

    start_level: u32,
    level: u32,
    normal_fall_period: Micros,
    short_fall_period: Micros,

    fall_at: Option<Micros>,
    /// The pending fall was scheduled by a held soft-drop key.
    soft_fall: bool,
    lock_at: Option<Micros>,
    repeat_at: Option<Micros>,
    keys: HeldKeys,
    steering: Steering,

    lowest_y: i32,
    moves_left: u8,
    last_move: TSpinKind,

    back_to_back: u32,
    score: u32,
    lines: u32,
    messages: ArrayVec<ScoreMessage, MESSAGE_LOG_CAPACITY>,
}

impl GameState {
    /// Create a session on the welcome screen, seeding the piece randomizer.
    pub fn new(seed: u32) -> Self {
        let (normal_fall_period, short_fall_period) = fall_periods(1);
        Self {
            phase: Phase::Welcome,
            alive: true,
            clock: 0,
            resolved_at: 0,
            matrix: Matrix::new(),
            active: Tetromino::new(PieceKind::I),
            held: None,
            ghost: None,
            queue: PieceQueue::new(seed),
            can_hold: true,
            start_level: 1,
            level: 1,
            normal_fall_period,
            short_fall_period,
            fall_at: None,
            soft_fall: false,
            lock_at: None,
            repeat_at: None,
            keys: HeldKeys::default(),
            steering: Steering::default(),
            lowest_y: 0,
            moves_left: MAX_LOCK_MOVES,
            last_move: TSpinKind::None,
            back_to_back: 0,
            score: 0,
            lines: 0,
            messages: ArrayVec::new(),
        }
    }

    /// Level used when a game is started from the welcome screen.
    ///
    /// Panics if `level` is outside `1..=MAX_LEVEL`.
    pub fn with_start_level(mut self, level: u32) -> Self {
        assert_level(level);
        self.start_level = level;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// False once a quit command has been processed.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn clock(&self) -> Micros {
        self.clock
    }

    /// `ceil(clock / FRAME_PERIOD_US)`; adapters stamp new input with `current_frame() + 1`.
    pub fn current_frame(&self) -> i64 {
        (self.clock + FRAME_PERIOD_US - 1) / FRAME_PERIOD_US
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// The falling piece, while a game is in progress.
    pub fn active(&self) -> Option<&Tetromino> {
        (self.phase == Phase::Play).then_some(&self.active)
    }

    pub fn ghost(&self) -> Option<&Tetromino> {
        self.ghost.as_ref()
    }

    /// The lookahead piece, once a game has started.
    pub fn next(&self) -> Option<PieceKind> {
        (self.phase != Phase::Welcome).then(|| self.queue.peek())
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.held
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Recent score messages, most recent first.
    pub fn messages(&self) -> &[ScoreMessage] {
        &self.messages
    }

    /// `(normal, short)` gravity intervals for the current level.
    pub fn fall_periods(&self) -> (Micros, Micros) {
        (self.normal_fall_period, self.short_fall_period)
    }

    /// Start a game at `level` and enter play.
    ///
    /// The piece queue carries over between games. Panics if `level` is outside
    /// `1..=MAX_LEVEL`.
    pub fn new_game(&mut self, level: u32) {
        assert_level(level);
        self.clock = 0;
        self.resolved_at = 0;
        self.score = 0;
        self.lines = 0;
        self.back_to_back = 0;
        self.messages.clear();

        self.matrix.clear();

        let current = self.queue.draw();
        self.held = None;

        self.start_level = level;
        self.set_level(level);

        self.can_hold = true;
        self.repeat_at = None;
        self.keys = HeldKeys::default();
        self.steering = Steering::default();

        self.spawn(current);
        self.phase = Phase::Play;

        // Arm gravity right away instead of waiting for the first event.
        self.settle(self.clock);
        self.ghost = self.project_ghost();
    }

    fn set_level(&mut self, level: u32) {
        self.level = level;
        (self.normal_fall_period, self.short_fall_period) = fall_periods(level);
    }

    /// Put a fresh `kind` at the spawn position and reset per-piece state.
    ///
    /// The back-to-back streak carries over; only line clears change it.
    fn spawn(&mut self, kind: PieceKind) {
        self.active = Tetromino::new(kind);
        self.fall_at = None;
        self.lock_at = None;
        self.soft_fall = false;
        self.lowest_y = self.active.pos.y;
        self.moves_left = MAX_LOCK_MOVES;
        self.last_move = TSpinKind::None;
    }

    /// Advance the virtual clock by `elapsed_us` and resolve everything that is due.
    ///
    /// Only events whose frame timestamp is at or before the new clock are taken
    /// from `inputs`. Returns whether the session should continue.
    pub fn tic(&mut self, elapsed_us: u64, inputs: &mut VecDeque<InputEvent>) -> bool {
        let elapsed = Micros::try_from(elapsed_us).unwrap_or(Micros::MAX);
        self.clock = self.clock.saturating_add(elapsed);

        if self.phase == Phase::Play {
            self.run_due_events(inputs);
        } else {
            self.handle_menu_inputs(inputs);
        }

        self.ghost = self.project_ghost();
        self.alive
    }

    /// Welcome and game-over screens: every queued event is consumed.
    fn handle_menu_inputs(&mut self, inputs: &mut VecDeque<InputEvent>) {
        while let Some(input) = inputs.pop_front() {
            match (input.command, input.state) {
                (Command::HardDrop, KeyState::Pressed) => match self.phase {
                    Phase::Welcome => self.new_game(self.start_level),
                    Phase::GameOver => self.phase = Phase::Welcome,
                    Phase::Play => {}
                },
                (Command::Quit, _) => self.alive = false,
                _ => {}
            }
        }
    }

    fn next_event(&self, input: Option<&InputEvent>) -> Option<(Micros, TimedEvent)> {
        [
            (self.repeat_at, TimedEvent::RepeatTranslate),
            (self.lock_at, TimedEvent::Lock),
            (self.fall_at, TimedEvent::Fall),
            (input.map(InputEvent::timestamp_us), TimedEvent::Input),
        ]
        .into_iter()
        .filter_map(|(at, event)| at.map(|at| (at, event)))
        .reduce(|best, candidate| if candidate.0 < best.0 { candidate } else { best })
    }

    fn run_due_events(&mut self, inputs: &mut VecDeque<InputEvent>) {
        while self.alive && self.phase == Phase::Play {
            let Some((now, event)) = self.next_event(inputs.front()) else {
                break;
            };
            if now > self.clock {
                break;
            }
            // Input stamped before an already resolved event runs at that event's time.
            let now = now.max(self.resolved_at);
            self.resolved_at = now;

            match event {
                TimedEvent::RepeatTranslate => {
                    self.translate(self.steering.direction(), now);
                    self.repeat_at = Some(now + REPEAT_TRANSLATE_PERIOD_US);
                }
                TimedEvent::Lock => self.lock(),
                TimedEvent::Fall => self.fall(now),
                TimedEvent::Input => {
                    if let Some(input) = inputs.pop_front() {
                        self.apply_input(input, now);
                    }
                }
            }

            if self.phase != Phase::Play {
                break;
            }
            self.settle(now);
        }
    }

    /// Re-arm the fall or lock timer depending on whether the piece is supported.
    fn settle(&mut self, now: Micros) {
        if self.can_fall() {
            self.fall_at = Some(earliest(self.fall_at, now + self.normal_fall_period));
            self.lock_at = None;
        } else {
            self.lock_at = Some(earliest(self.lock_at, now + LOCK_PERIOD_US));
            self.fall_at = None;
            self.soft_fall = false;
        }

        // Reaching a new lowest row restores the lock-delay move budget.
        if self.active.pos.y > self.lowest_y {
            self.lowest_y = self.active.pos.y;
            self.moves_left = MAX_LOCK_MOVES;
        }
    }

    fn fall(&mut self, now: Micros) {
        self.active.pos += SHIFT_DOWN;
        if self.soft_fall {
            self.score = self.score.saturating_add(calculate_drop_score(1, false));
        }
        if self.steering.down {
            self.soft_fall = true;
            self.fall_at = Some(now + self.short_fall_period);
        } else {
            self.soft_fall = false;
            self.fall_at = Some(now + self.normal_fall_period);
        }
    }

    fn apply_input(&mut self, input: InputEvent, now: Micros) {
        let pressed = input.is_pressed();
        match input.command {
            Command::Quit => {
                if !pressed {
                    self.alive = false;
                }
            }
            Command::MoveLeft => self.lateral_input(false, pressed, now),
            Command::MoveRight => self.lateral_input(true, pressed, now),
            Command::RotateLeft if pressed => self.rotate(false, now),
            Command::RotateRight if pressed => self.rotate(true, now),
            Command::HardDrop if pressed => self.hard_drop(),
            Command::SoftDrop => self.soft_drop(pressed, now),
            Command::Hold if pressed => self.hold(),
            Command::RotateLeft | Command::RotateRight | Command::HardDrop | Command::Hold => {}
        }
    }

    fn lateral_input(&mut self, right: bool, pressed: bool, now: Micros) {
        if right {
            self.keys.right = pressed;
            self.steering.right = pressed;
            self.steering.left = !pressed && self.keys.left;
        } else {
            self.keys.left = pressed;
            self.steering.left = pressed;
            self.steering.right = !pressed && self.keys.right;
        }

        if self.steering.left || self.steering.right {
            self.translate(self.steering.direction(), now);
            self.repeat_at = Some(now + REPEAT_TRANSLATE_GRACE_PERIOD_US);
        } else {
            self.repeat_at = None;
        }
    }

    fn translate(&mut self, shift: i32, now: Micros) {
        let target = self.active.pos + Point::new(shift, 0);
        if self.fits_at(&self.active, target) {
            self.active.pos = target;
            self.accept_move(TSpinKind::None, now);
        }
    }

    /// Bookkeeping after a successful translation or rotation.
    ///
    /// While grounded, each accepted move pushes the lock timer out to at least
    /// `now + LOCK_PERIOD_US`, as long as the move budget lasts.
    fn accept_move(&mut self, kind: TSpinKind, now: Micros) {
        if let Some(lock_at) = self.lock_at {
            if self.moves_left > 0 {
                self.moves_left -= 1;
                self.lock_at = Some(lock_at.max(now + LOCK_PERIOD_US));
            }
        }
        self.last_move = kind;
    }

    /// Rotate with wall kicks; the piece is untouched when no kick fits.
    fn rotate(&mut self, clockwise: bool, now: Micros) {
        let from = self.active.rotation;
        let to = if clockwise {
            from.rotate_cw()
        } else {
            from.rotate_ccw()
        };
        let kicks = get_kicks(self.active.kind, from, clockwise);

        self.active.rotate_to(to);
        for (index, kick) in kicks.iter().enumerate() {
            let target = self.active.pos + *kick;
            if self.fits_at(&self.active, target) {
                self.active.pos = target;
                let kind = self.t_spin_kind(index);
                self.accept_move(kind, now);
                return;
            }
        }
        self.active.rotate_to(from);
    }

    /// Classify a successful rotation of the active piece landed with kick `kick_index`.
    fn t_spin_kind(&self, kick_index: usize) -> TSpinKind {
        if self.active.kind != PieceKind::T {
            return TSpinKind::None;
        }
        let corners = *t_spin_corners(self.active.rotation);
        let [a, b, c, d] = corners.map(|p| self.matrix.occupied(self.active.pos + p));
        if kick_index == 4 || (a && b && (c || d)) {
            TSpinKind::Full
        } else if (a || b) && c && d {
            TSpinKind::Mini
        } else {
            TSpinKind::None
        }
    }

    fn hard_drop(&mut self) {
        let y = self.drop_row(&self.active);
        let rows = (y - self.active.pos.y) as u32;
        self.score = self.score.saturating_add(calculate_drop_score(rows, true));
        self.active.pos.y = y;
        self.lock();
    }

    fn soft_drop(&mut self, pressed: bool, now: Micros) {
        self.steering.down = pressed;
        if pressed {
            self.fall_at = Some(now);
            self.soft_fall = true;
        } else if self.soft_fall {
            // Back onto the normal schedule; the pending fall no longer scores.
            if let Some(fall_at) = self.fall_at {
                self.fall_at = Some(fall_at + self.normal_fall_period - self.short_fall_period);
            }
            self.soft_fall = false;
        }
    }

    fn hold(&mut self) {
        if !self.can_hold {
            return;
        }
        self.can_hold = false;
        let kind = match self.held.replace(self.active.kind) {
            Some(held) => held,
            None => self.queue.draw(),
        };
        self.spawn(kind);
    }

    /// Commit the active piece to the matrix, then clear, score and spawn the next one.
    fn lock(&mut self) {
        self.matrix.place(self.active.bitmap(), self.active.pos, 1, 0);

        if self.active.top_row() < (MATRIX_HEIGHT - SKYLINE) as i32 {
            self.phase = Phase::GameOver;
            return;
        }

        self.clear_rows();
        self.can_hold = true;
        let kind = self.queue.draw();
        self.spawn(kind);
    }

    fn clear_rows(&mut self) {
        let rows = self.matrix.remove_full_rows();
        self.lines += rows as u32;

        let result = calculate_score(self.last_move, rows, self.level, self.back_to_back);
        self.back_to_back = result.back_to_back;
        if let Some(message) = result.message {
            self.score = self.score.saturating_add(result.points);
            if self.messages.is_full() {
                self.messages.pop();
            }
            self.messages.insert(0, message);
        }

        self.set_level(calculate_level(self.lines, self.start_level));
    }

    fn fits_at(&self, piece: &Tetromino, pos: Point) -> bool {
        self.matrix.can_place(piece.bitmap(), pos, 1, 0)
    }

    fn can_fall(&self) -> bool {
        self.fits_at(&self.active, self.active.pos + SHIFT_DOWN)
    }

    /// Lowest row `piece` reaches by dropping straight down from its position.
    ///
    /// Returns the current row when the piece does not fit where it is.
    fn drop_row(&self, piece: &Tetromino) -> i32 {
        let mut landing = piece.pos.y;
        let mut y = piece.pos.y;
        while self.fits_at(piece, Point::new(piece.pos.x, y)) {
            landing = y;
            y += 1;
        }
        landing
    }

    fn project_ghost(&self) -> Option<Tetromino> {
        if self.phase != Phase::Play {
            return None;
        }
        let mut ghost = self.active;
        ghost.pos.y = self.drop_row(&self.active);
        ghost.recolor(Cell::Ghost);
        self.fits_at(&ghost, ghost.pos).then_some(ghost)
    }

    /// Copy of everything an adapter needs to draw the current frame.
    pub fn snapshot(&self) -> GameSnapshot {
        let mut snapshot = GameSnapshot::default();
        self.snapshot_into(&mut snapshot);
        snapshot
    }

    /// Fill an existing snapshot, reusing its storage.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.matrix = self.matrix;
        out.active = self.active().copied();
        out.ghost = self.ghost;
        out.next = self.next();
        out.held = self.held;
        out.can_hold = self.can_hold;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.back_to_back = self.back_to_back;
        out.messages.clear();
        out.messages.extend(self.messages.iter().copied());
        out.phase = self.phase;
        out.frame = self.current_frame();
        out.alive = self.alive;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(0)
    }
}

fn assert_level(level: u32) {
    assert!(
        (1..=MAX_LEVEL).contains(&level),
        "level {level} outside 1..={MAX_LEVEL}"
    );
}
