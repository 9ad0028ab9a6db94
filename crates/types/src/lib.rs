//! Core types module - shared data structures and constants
//!
//! Everything here is plain data with no external dependencies, so the engine, the
//! input mapping and the terminal renderer can all agree on one vocabulary.
//!
//! # Matrix Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 40 rows (indexed 0-39, row 0 at the top)
//! - **Skyline**: the bottom 20 rows are the visible playfield; rows 0-19 are hidden
//!   headroom used to detect game over
//! - **Spawn position**: (3, 18), top-left of the piece's 4x4 box
//!
//! # Timing Constants
//!
//! All times are in microseconds of virtual game time:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_PERIOD_US` | 16_666 | Logical frame used to timestamp inputs (60 Hz) |
//! | `LOCK_PERIOD_US` | 500_000 | Lock delay once a piece is grounded |
//! | `REPEAT_TRANSLATE_PERIOD_US` | 30_000 | Auto-repeat interval for held left/right |
//! | `REPEAT_TRANSLATE_GRACE_PERIOD_US` | 500_000 | Delay before auto-repeat starts |
//! | `MAX_LOCK_MOVES` | 15 | Lock-delay extensions per lowest row |
//! | `SOFT_FALL_DIVISOR` | 20 | Soft drop falls 20x faster than gravity |
//!
//! # Examples
//!
//! ```
//! use tetrino_types::{Command, InputEvent, KeyState, PieceKind, Rotation, FRAME_PERIOD_US};
//!
//! assert_eq!(PieceKind::ALL[PieceKind::T.index()], PieceKind::T);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//!
//! let ev = InputEvent::new(Command::HardDrop, KeyState::Pressed, 3);
//! assert_eq!(ev.timestamp_us(), 3 * FRAME_PERIOD_US);
//! ```

use std::ops::{Add, AddAssign, Sub};

/// Virtual time in microseconds.
pub type Micros = i64;

/// Matrix width in cells.
pub const MATRIX_WIDTH: usize = 10;

/// Matrix height in cells, including the hidden rows above the skyline.
pub const MATRIX_HEIGHT: usize = 40;

/// Number of visible rows at the bottom of the matrix.
pub const SKYLINE: usize = 20;

/// Side of the square bounding box every tetromino bitmap lives in.
pub const PIECE_SIZE: usize = 4;

/// Logical frame period (60 Hz).
pub const FRAME_PERIOD_US: Micros = 16_666;

/// Lock delay for a grounded piece.
pub const LOCK_PERIOD_US: Micros = 500_000;

/// Interval between auto-repeated lateral moves.
pub const REPEAT_TRANSLATE_PERIOD_US: Micros = 30_000;

/// Delay between a discrete lateral press and the first auto-repeat.
pub const REPEAT_TRANSLATE_GRACE_PERIOD_US: Micros = 500_000;

/// Maximum number of lock-delay extensions before the piece must reach a lower row.
pub const MAX_LOCK_MOVES: u8 = 15;

/// `short_fall_period = normal_fall_period / SOFT_FALL_DIVISOR`.
pub const SOFT_FALL_DIVISOR: Micros = 20;

/// Highest reachable level.
pub const MAX_LEVEL: u32 = 15;

/// Capacity of the recent score-message log.
pub const MESSAGE_LOG_CAPACITY: usize = 8;

/// Largest elapsed time the terminal front-end feeds into a single tic (two frames).
pub const MAX_TIC_ELAPSED_US: u64 = 2 * 1_000_000 / 60;

/// Integer point on the matrix (x to the right, y downwards).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        *self = *self + rhs;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// One row down.
pub const SHIFT_DOWN: Point = Point::new(0, 1);

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
/// - **O**: Yellow, 2x2 square
/// - **S**: Green, S-shaped
/// - **T**: Magenta, T-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Every kind, in rotation-table order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Position of this kind in [`PieceKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::J => 1,
            PieceKind::L => 2,
            PieceKind::O => 3,
            PieceKind::S => 4,
            PieceKind::T => 5,
            PieceKind::Z => 6,
        }
    }
}

/// Content of a single matrix or bitmap cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Piece(PieceKind),
    /// Landing preview of the active piece; never stored in the matrix.
    Ghost,
}

impl Cell {
    #[inline(always)]
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Rotation states, North being the spawn orientation
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrino_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (90°)
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Rotation index 0-3 (number of clockwise quarter turns from spawn).
    pub fn index(self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }
}

/// Commands an adapter can send to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    RotateLeft,
    RotateRight,
    MoveLeft,
    MoveRight,
    HardDrop,
    SoftDrop,
    Hold,
    Quit,
}

/// Edge of a key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    Pressed,
    Released,
}

/// A command edge scheduled for a logical frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputEvent {
    pub command: Command,
    pub state: KeyState,
    pub frame: i64,
}

impl InputEvent {
    pub fn new(command: Command, state: KeyState, frame: i64) -> Self {
        Self {
            command,
            state,
            frame,
        }
    }

    pub fn pressed(command: Command, frame: i64) -> Self {
        Self::new(command, KeyState::Pressed, frame)
    }

    pub fn released(command: Command, frame: i64) -> Self {
        Self::new(command, KeyState::Released, frame)
    }

    /// Logical time at which the engine applies this event.
    pub fn timestamp_us(&self) -> Micros {
        self.frame.saturating_mul(FRAME_PERIOD_US)
    }

    pub fn is_pressed(&self) -> bool {
        self.state == KeyState::Pressed
    }
}

/// Top-level mode of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Welcome,
    Play,
    GameOver,
}

/// Classification of the last accepted move, used for T-spin scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TSpinKind {
    #[default]
    None,
    Mini,
    Full,
}
