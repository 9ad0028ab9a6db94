//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O) and unit-tested. The playfield and the preview
//! boxes are first composed as cell images with [`Image::place`], two columns per
//! matrix cell, and then painted glyph by glyph.

use crate::core::{GameSnapshot, Image, Tetromino};
use crate::fb::{BoxTop, CellStyle, FrameBuffer, Glyph, Rgb};
use crate::types::{Cell, Phase, PieceKind, Point, MATRIX_HEIGHT, MATRIX_WIDTH, PIECE_SIZE, SKYLINE};

/// Terminal columns per matrix cell.
pub const CELL_W: usize = 2;

/// The visible part of the matrix, two columns per cell.
pub type FieldImage = Image<{ MATRIX_WIDTH * CELL_W }, SKYLINE>;

/// A single piece in the held or next box.
pub type PreviewImage = Image<{ PIECE_SIZE * CELL_W }, PIECE_SIZE>;

/// Number of score messages shown under the score.
pub const VISIBLE_MESSAGES: usize = 5;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Screen rectangle, relative to the layout origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Panel {
    x: u16,
    y: u16,
    width: u16,
    height: u16,
}

const PREVIEW_W: u16 = (PIECE_SIZE * CELL_W) as u16 + 2;
const PREVIEW_H: u16 = PIECE_SIZE as u16 + 2;

const HELD: Panel = Panel {
    x: 1,
    y: 3,
    width: PREVIEW_W,
    height: PREVIEW_H,
};
const FIELD: Panel = Panel {
    x: HELD.x + HELD.width + 7,
    y: HELD.y,
    width: (MATRIX_WIDTH * CELL_W) as u16 + 2,
    height: SKYLINE as u16 + 1,
};
const NEXT: Panel = Panel {
    x: FIELD.x + FIELD.width + 2,
    y: HELD.y,
    width: PREVIEW_W,
    height: PREVIEW_H,
};
const TALLY: Panel = Panel {
    x: NEXT.x,
    y: NEXT.y + NEXT.height + 1,
    width: 24,
    height: VISIBLE_MESSAGES as u16 + 2,
};
const INFO: Panel = Panel {
    x: HELD.x,
    y: HELD.y + HELD.height + 1,
    width: HELD.width + 4,
    height: 2,
};

/// Width of the whole layout.
pub const SCREEN_WIDTH: u16 = TALLY.x + TALLY.width;
/// Height of the whole layout.
pub const SCREEN_HEIGHT: u16 = FIELD.y + FIELD.height;

const INTRO_W: u16 = 36;
const INTRO_H: u16 = 15;
const INTRO: Panel = Panel {
    x: (SCREEN_WIDTH - INTRO_W) / 2,
    y: (SCREEN_HEIGHT - INTRO_H) / 2,
    width: INTRO_W,
    height: INTRO_H,
};

const WELCOME_TEXT: &str = "Ready?\n\
Press space to start\n\
\n\
z:     rotate left\n\
x:     rotate right\n\
c:     hold\n\
left:  move left\n\
right: move right\n\
down:  soft drop\n\
space: hard drop\n\
q:     quit";

const GAME_OVER_TEXT: &str = "Game Over";

const TEXT: CellStyle = CellStyle::fg(Rgb::new(220, 220, 220));
const BORDER: CellStyle = CellStyle::fg(Rgb::new(200, 200, 200));
const GHOST: CellStyle = CellStyle::fg(Rgb::new(140, 140, 140));

fn piece_style(kind: PieceKind) -> CellStyle {
    let fg = match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::Z => Rgb::new(220, 80, 80),
    };
    CellStyle::fg(fg)
}

/// Glyph used to paint a composed image cell.
pub fn cell_glyph(cell: Cell) -> Glyph {
    match cell {
        Cell::Empty => Glyph::new(' ', TEXT),
        Cell::Piece(kind) => Glyph::new('█', piece_style(kind)),
        Cell::Ghost => Glyph::new('░', GHOST.dim()),
    }
}

/// Compose the visible playfield: locked cells, then the ghost, then the active piece.
///
/// Rows above the skyline are cropped; a piece partly above it shows only its
/// visible rows.
pub fn compose_field(snap: &GameSnapshot) -> FieldImage {
    let hidden = (MATRIX_HEIGHT - SKYLINE) as i32;
    let mut field = FieldImage::new();
    field.place(&snap.matrix, Point::new(0, 0), CELL_W, hidden as usize);
    for piece in [snap.ghost, snap.active].into_iter().flatten() {
        place_in_field(&mut field, &piece, hidden);
    }
    field
}

fn place_in_field(field: &mut FieldImage, piece: &Tetromino, hidden: i32) {
    let crop = (hidden - piece.pos.y).max(0);
    let at = Point::new(piece.pos.x * CELL_W as i32, piece.pos.y + crop - hidden);
    field.place(piece.bitmap(), at, CELL_W, crop as usize);
}

/// Compose a piece kind in spawn orientation for a preview box.
pub fn compose_preview(kind: PieceKind) -> PreviewImage {
    let mut preview = PreviewImage::new();
    preview.place(Tetromino::new(kind).bitmap(), Point::new(0, 0), CELL_W, 0);
    preview
}

/// A lightweight terminal renderer for the game screen.
pub struct GameView {
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Top-left corner of the layout inside `viewport`.
    pub fn origin(&self, viewport: Viewport) -> (u16, u16) {
        let x = viewport.width.saturating_sub(SCREEN_WIDTH) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(SCREEN_HEIGHT) / 2,
            AnchorY::Top => 0,
        };
        (x, y)
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// The framebuffer is resized to the viewport and fully repainted, so callers
    /// can reuse one buffer across frames.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let (ox, oy) = self.origin(viewport);
        let at = |panel: Panel| (ox + panel.x, oy + panel.y);

        let (x, y) = at(FIELD);
        fb.draw_box(x, y, FIELD.width, FIELD.height, BoxTop::Open, BORDER);
        let (x, y) = at(HELD);
        fb.draw_box(x, y, HELD.width, HELD.height, BoxTop::Closed, BORDER);
        fb.put_str(x + 3, y + HELD.height - 1, "Held", TEXT);
        let (x, y) = at(NEXT);
        fb.draw_box(x, y, NEXT.width, NEXT.height, BoxTop::Closed, BORDER);
        fb.put_str(x + 3, y + NEXT.height - 1, "Next", TEXT);

        // Row numbers, counting up from the floor.
        let (fx, fy) = at(FIELD);
        for i in 0..SKYLINE as u16 {
            let label_y = fy + FIELD.height - 2 - i;
            let label_x = fx.saturating_sub(3);
            if i + 1 < 10 {
                fb.put_char(label_x, label_y, ' ', TEXT.dim());
                fb.put_u32(label_x + 1, label_y, (i + 1) as u32, TEXT.dim());
            } else {
                fb.put_u32(label_x, label_y, (i + 1) as u32, TEXT.dim());
            }
        }

        self.draw_tally(fb, snap, at(TALLY));
        self.draw_info(fb, snap, at(INFO));

        let field = compose_field(snap);
        blit(fb, &field, fx + 1, fy);

        if let Some(next) = snap.next {
            let (x, y) = at(NEXT);
            blit(fb, &compose_preview(next), x + 1, y + 1);
        }
        if let Some(held) = snap.held {
            let (x, y) = at(HELD);
            let mut preview = compose_preview(held);
            if !snap.can_hold {
                preview.recolor(Cell::Ghost);
            }
            blit(fb, &preview, x + 1, y + 1);
        }

        let overlay = match snap.phase {
            Phase::Welcome => Some(WELCOME_TEXT),
            Phase::GameOver => Some(GAME_OVER_TEXT),
            Phase::Play => None,
        };
        if let Some(text) = overlay {
            let (x, y) = at(INTRO);
            fb.draw_box(x, y, INTRO.width, INTRO.height, BoxTop::Closed, BORDER);
            let lines = text.split('\n').count() as u16;
            fb.put_text(x + 4, y + (INTRO.height - lines) / 2, text, 0, TEXT.bold());
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_tally(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, (x, y): (u16, u16)) {
        let end = fb.put_str(x, y, "Score ", TEXT.bold());
        fb.put_u32(end, y, snap.score, TEXT);

        let mut line = String::with_capacity(TALLY.width as usize);
        for (i, message) in snap.messages.iter().take(VISIBLE_MESSAGES).enumerate() {
            use std::fmt::Write as _;
            line.clear();
            let _ = write!(line, "{message}");
            fb.put_text(x, y + 2 + i as u16, &line, TALLY.width, TEXT);
        }
    }

    fn draw_info(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, (x, y): (u16, u16)) {
        let end = fb.put_str(x, y, "Level ", TEXT);
        fb.put_u32(end, y, snap.level, TEXT);
        let end = fb.put_str(x, y + 1, "Cleared ", TEXT);
        fb.put_u32(end, y + 1, snap.lines, TEXT);
    }
}

/// Paint every non-empty cell of `image` with its top-left at `(x, y)`.
fn blit<const W: usize, const H: usize>(fb: &mut FrameBuffer, image: &Image<W, H>, x: u16, y: u16) {
    for p in image.filled() {
        fb.set(x + p.x as u16, y + p.y as u16, cell_glyph(image.get(p)));
    }
}
