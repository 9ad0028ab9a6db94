//! Pieces module - tetromino bitmaps, rotation table and wall kicks
//!
//! Every rotation bitmap is derived once from the spawn shape by rotating a
//! square window clockwise (4 for I, 3 for J/L/S/T/Z, 0 for O). The resulting
//! table lives in a `OnceLock` and is read-only afterwards, so rotating a live
//! piece is a table lookup.

use std::sync::OnceLock;

use crate::image::Bitmap;
use crate::types::{
    Cell, PieceKind, Point, Rotation, MATRIX_HEIGHT, MATRIX_WIDTH, PIECE_SIZE, SKYLINE,
};

/// Top-left corner of the bounding box of a freshly spawned piece.
pub const SPAWN_POSITION: Point = Point::new(
    ((MATRIX_WIDTH - PIECE_SIZE) / 2) as i32,
    (MATRIX_HEIGHT - SKYLINE - 2) as i32,
);

/// Spawn shape and rotation window of a piece kind.
fn spawn_art(kind: PieceKind) -> (&'static [&'static str], usize) {
    match kind {
        PieceKind::I => (&["    ", "####", "    ", "    "], 4),
        PieceKind::J => (&["#   ", "### ", "    ", "    "], 3),
        PieceKind::L => (&["  # ", "### ", "    ", "    "], 3),
        PieceKind::O => (&[" ## ", " ## ", "    ", "    "], 0),
        PieceKind::S => (&[" ## ", "##  ", "    ", "    "], 3),
        PieceKind::T => (&[" #  ", "### ", "    ", "    "], 3),
        PieceKind::Z => (&["##  ", " ## ", "    ", "    "], 3),
    }
}

type ShapeTable = [[Bitmap; 4]; 7];

fn shape_table() -> &'static ShapeTable {
    static TABLE: OnceLock<ShapeTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = [[Bitmap::new(); 4]; 7];
        for kind in PieceKind::ALL {
            let (art, window) = spawn_art(kind);
            let states = &mut table[kind.index()];
            states[0] = Bitmap::from_art(art, Cell::Piece(kind));
            for r in 1..4 {
                states[r] = states[r - 1];
                states[r].rotate_clockwise(window);
            }
        }
        table
    })
}

/// Bitmap for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> &'static Bitmap {
    &shape_table()[kind.index()][rotation.index()]
}

/// Wall kick offsets, tried in order after a rotation.
pub type Kicks = [Point; 5];

const fn kicks(offsets: [(i32, i32); 5]) -> Kicks {
    [
        Point::new(offsets[0].0, offsets[0].1),
        Point::new(offsets[1].0, offsets[1].1),
        Point::new(offsets[2].0, offsets[2].1),
        Point::new(offsets[3].0, offsets[3].1),
        Point::new(offsets[4].0, offsets[4].1),
    ]
}

/// Kick table indexed by `[is_i][clockwise][from_rotation]`.
///
/// Offsets use screen coordinates (+y is down).
const WALL_KICKS: [[[Kicks; 4]; 2]; 2] = [
    // J, L, S, T, Z
    [
        [
            kicks([(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)]), // 0 -> 3
            kicks([(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)]), // 1 -> 0
            kicks([(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)]), // 2 -> 1
            kicks([(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)]), // 3 -> 2
        ],
        [
            kicks([(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)]), // 0 -> 1
            kicks([(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)]), // 1 -> 2
            kicks([(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)]), // 2 -> 3
            kicks([(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)]), // 3 -> 0
        ],
    ],
    // I
    [
        [
            kicks([(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)]), // 0 -> 3
            kicks([(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)]), // 1 -> 0
            kicks([(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)]), // 2 -> 1
            kicks([(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)]), // 3 -> 2
        ],
        [
            kicks([(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)]), // 0 -> 1
            kicks([(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)]), // 1 -> 2
            kicks([(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)]), // 2 -> 3
            kicks([(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)]), // 3 -> 0
        ],
    ],
];

/// Kick candidates for rotating `kind` away from `from`.
pub fn get_kicks(kind: PieceKind, from: Rotation, clockwise: bool) -> &'static Kicks {
    &WALL_KICKS[(kind == PieceKind::I) as usize][clockwise as usize][from.index()]
}

// T corners, relative to the bounding box:
//
//   "A#B "
//   "### "
//   "C D "
//   "    "
//
// Listed per rotation as [front, front, back, back].
const T_SPIN_CORNERS: [[Point; 4]; 4] = [
    [Point::new(0, 0), Point::new(2, 0), Point::new(0, 2), Point::new(2, 2)],
    [Point::new(0, 2), Point::new(2, 2), Point::new(0, 0), Point::new(2, 0)],
    [Point::new(2, 0), Point::new(2, 2), Point::new(0, 0), Point::new(0, 2)],
    [Point::new(0, 0), Point::new(0, 2), Point::new(2, 0), Point::new(2, 2)],
];

/// Diagonal corners of a T in `rotation`: two front corners, then two back corners.
pub fn t_spin_corners(rotation: Rotation) -> &'static [Point; 4] {
    &T_SPIN_CORNERS[rotation.index()]
}

/// A tetromino: kind, rotation and position plus a copy of its current bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    /// Top-left corner of the 4x4 bounding box on the matrix.
    pub pos: Point,
    bitmap: Bitmap,
}

impl Tetromino {
    /// Create a tetromino in spawn orientation at the spawn position
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            pos: SPAWN_POSITION,
            bitmap: *get_shape(kind, Rotation::North),
        }
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    /// Switch to `rotation`, reloading the bitmap from the rotation table.
    pub fn rotate_to(&mut self, rotation: Rotation) {
        self.rotation = rotation;
        self.bitmap = *get_shape(self.kind, rotation);
    }

    /// Replace the bitmap's cells with `cell` (used for the ghost preview).
    pub fn recolor(&mut self, cell: Cell) {
        self.bitmap.recolor(cell);
    }

    /// Matrix coordinates of the four minos.
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.bitmap.filled().map(move |p| p + self.pos)
    }

    /// Smallest matrix row occupied by the piece.
    pub fn top_row(&self) -> i32 {
        self.cells().map(|p| p.y).min().unwrap_or(self.pos.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets(kind: PieceKind, rotation: Rotation) -> Vec<(i32, i32)> {
        get_shape(kind, rotation)
            .filled()
            .map(|p| (p.x, p.y))
            .collect()
    }

    #[test]
    fn test_every_rotation_has_four_minos() {
        for kind in PieceKind::ALL {
            for rotation in [
                Rotation::North,
                Rotation::East,
                Rotation::South,
                Rotation::West,
            ] {
                assert_eq!(get_shape(kind, rotation).filled().count(), 4, "{kind:?} {rotation:?}");
            }
        }
    }

    #[test]
    fn test_t_rotations() {
        assert_eq!(offsets(PieceKind::T, Rotation::North), vec![(1, 0), (0, 1), (1, 1), (2, 1)]);
        assert_eq!(offsets(PieceKind::T, Rotation::East), vec![(1, 0), (1, 1), (2, 1), (1, 2)]);
        assert_eq!(offsets(PieceKind::T, Rotation::South), vec![(0, 1), (1, 1), (2, 1), (1, 2)]);
        assert_eq!(offsets(PieceKind::T, Rotation::West), vec![(1, 0), (0, 1), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_i_rotations() {
        assert_eq!(offsets(PieceKind::I, Rotation::North), vec![(0, 1), (1, 1), (2, 1), (3, 1)]);
        assert_eq!(offsets(PieceKind::I, Rotation::East), vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
        assert_eq!(offsets(PieceKind::I, Rotation::South), vec![(0, 2), (1, 2), (2, 2), (3, 2)]);
        assert_eq!(offsets(PieceKind::I, Rotation::West), vec![(1, 0), (1, 1), (1, 2), (1, 3)]);
    }

    #[test]
    fn test_o_never_changes() {
        let north = get_shape(PieceKind::O, Rotation::North);
        for rotation in [Rotation::East, Rotation::South, Rotation::West] {
            assert_eq!(get_shape(PieceKind::O, rotation), north);
        }
    }

    #[test]
    fn test_bitmap_cells_carry_kind() {
        let shape = get_shape(PieceKind::S, Rotation::East);
        for p in shape.filled() {
            assert_eq!(shape.get(p), Cell::Piece(PieceKind::S));
        }
    }

    #[test]
    fn test_kick_lookup() {
        let k = get_kicks(PieceKind::T, Rotation::North, true);
        assert_eq!(k[1], Point::new(-1, 0));
        let k = get_kicks(PieceKind::I, Rotation::West, true);
        assert_eq!(k[4], Point::new(-2, -1));
        for kind in PieceKind::ALL {
            for from in [Rotation::North, Rotation::East] {
                assert_eq!(get_kicks(kind, from, false)[0], Point::new(0, 0));
            }
        }
    }

    #[test]
    fn test_spawn_position_and_top_row() {
        assert_eq!(SPAWN_POSITION, Point::new(3, 18));
        let piece = Tetromino::new(PieceKind::I);
        assert_eq!(piece.top_row(), 19);
        let piece = Tetromino::new(PieceKind::T);
        assert_eq!(piece.top_row(), 18);
    }

    #[test]
    fn test_rotate_to_reloads_bitmap() {
        let mut piece = Tetromino::new(PieceKind::L);
        piece.rotate_to(Rotation::South);
        assert_eq!(piece.bitmap(), get_shape(PieceKind::L, Rotation::South));
        piece.rotate_to(Rotation::North);
        assert_eq!(piece.bitmap(), get_shape(PieceKind::L, Rotation::North));
    }
}
