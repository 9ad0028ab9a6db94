//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds the whole simulation: the matrix, the pieces, the randomizer,
//! scoring and the event-ordered engine. It has **no dependencies** on terminals or
//! other I/O, which makes it:
//!
//! - **Deterministic**: same seed and same timestamped inputs give the same game,
//!   however the elapsed time is split across `tic` calls
//! - **Testable**: every rule is covered by unit tests next to the code
//! - **Allocation-free per tic**: images are fixed-size arrays and the message log
//!   is an `ArrayVec`
//!
//! # Module Structure
//!
//! - [`image`]: fixed-size cell grids (matrix and piece bitmaps), placement and rotation
//! - [`pieces`]: rotation table, wall kicks and T-spin corners
//! - [`rng`]: 7-bag piece generation
//! - [`scoring`]: line-clear awards, back-to-back streaks, level and gravity formulas
//! - [`game_state`]: the engine and its `tic` event loop
//! - [`snapshot`]: read-only copy of the state for renderers
//!
//! # Game Rules
//!
//! - **Matrix**: 10x40, with only the bottom 20 rows visible; locking above them ends the game
//! - **Lock Delay**: 500ms once grounded, extended by moves at most 15 times per lowest row
//! - **Auto-repeat**: held left/right repeats every 30ms after a 500ms grace period
//! - **Soft Drop**: 20x gravity, 1 point per row; **Hard Drop**: 2 points per row
//! - **Hold**: once per piece
//! - **T-Spins**: full and mini, from the four diagonal corners after a kicked rotation
//!
//! # Example
//!
//! ```
//! use std::collections::VecDeque;
//! use tetrino_core::GameState;
//! use tetrino_core::types::{Command, InputEvent, Phase};
//!
//! let mut game = GameState::new(0);
//! game.new_game(1);
//!
//! let mut inputs = VecDeque::from([
//!     InputEvent::pressed(Command::HardDrop, 1),
//!     InputEvent::released(Command::HardDrop, 1),
//! ]);
//! assert!(game.tic(20_000, &mut inputs));
//!
//! assert_eq!(game.phase(), Phase::Play);
//! assert_eq!(game.score(), 40); // 20 rows, 2 points each
//! ```

pub mod game_state;
pub mod image;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tetrino_types as types;

// Re-export commonly used types for convenience
pub use game_state::GameState;
pub use image::{Bitmap, Image, Matrix};
pub use pieces::{get_kicks, get_shape, Tetromino, SPAWN_POSITION};
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::{calculate_score, fall_periods, ScoreMessage, ScoreResult};
pub use snapshot::GameSnapshot;
