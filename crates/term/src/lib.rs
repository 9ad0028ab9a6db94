//! Terminal rendering for the tetrino engine.
//!
//! A small, game-oriented rendering layer: snapshots are painted into a plain
//! framebuffer of styled glyphs, which is then diffed and flushed to the terminal.
//! No widget toolkit is involved, so the layout is exact down to the column
//! (two columns per matrix cell).

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tetrino_core as core;
pub use tetrino_types as types;

pub use fb::{BoxTop, CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{AnchorY, GameView, Viewport, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
