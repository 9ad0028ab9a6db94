//! Image module - fixed-size 2D cell buffers
//!
//! The same type backs the 10x40 matrix, the 4x4 tetromino bitmaps and the
//! composed playfield used by the terminal view. Storage is a plain nested array,
//! so images are `Copy` and never allocate.
//!
//! Coordinates: (x, y) where x grows to the right and y grows downwards; (0, 0)
//! is the top-left cell.

use crate::types::{Cell, Point, MATRIX_HEIGHT, MATRIX_WIDTH, PIECE_SIZE};

/// A `W` x `H` grid of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Image<const W: usize, const H: usize> {
    rows: [[Cell; W]; H],
}

/// The playing matrix, hidden rows included.
pub type Matrix = Image<MATRIX_WIDTH, MATRIX_HEIGHT>;

/// Bitmap of a single tetromino rotation.
pub type Bitmap = Image<PIECE_SIZE, PIECE_SIZE>;

impl<const W: usize, const H: usize> Image<W, H> {
    pub const WIDTH: usize = W;
    pub const HEIGHT: usize = H;

    /// Create an empty image
    pub fn new() -> Self {
        Self {
            rows: [[Cell::Empty; W]; H],
        }
    }

    /// Build an image from ASCII art: `#` becomes `fill`, anything else is empty.
    ///
    /// Panics if the art does not fit.
    pub fn from_art(art: &[&str], fill: Cell) -> Self {
        assert!(art.len() <= H, "art has {} rows, image has {}", art.len(), H);
        let mut image = Self::new();
        for (y, line) in art.iter().enumerate() {
            assert!(line.chars().count() <= W, "art row {} is wider than {}", y, W);
            for (x, ch) in line.chars().enumerate() {
                if ch == '#' {
                    image.rows[y][x] = fill;
                }
            }
        }
        image
    }

    pub fn width(&self) -> usize {
        W
    }

    pub fn height(&self) -> usize {
        H
    }

    /// Whether `p` lies inside the image.
    #[inline(always)]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < W && (p.y as usize) < H
    }

    /// Get the cell at `p`. Panics when out of bounds.
    #[inline(always)]
    pub fn get(&self, p: Point) -> Cell {
        self.check(p);
        self.rows[p.y as usize][p.x as usize]
    }

    /// Set the cell at `p`. Panics when out of bounds.
    #[inline(always)]
    pub fn set(&mut self, p: Point, cell: Cell) {
        self.check(p);
        self.rows[p.y as usize][p.x as usize] = cell;
    }

    #[inline(always)]
    fn check(&self, p: Point) {
        assert!(
            self.contains(p),
            "cell ({}, {}) outside {}x{} image",
            p.x,
            p.y,
            W,
            H
        );
    }

    /// True when `p` is off the image or holds a non-empty cell.
    ///
    /// Off-board counts as occupied so that walls and the floor take part in
    /// T-spin corner checks.
    pub fn occupied(&self, p: Point) -> bool {
        !self.contains(p) || !self.get(p).is_empty()
    }

    pub fn row(&self, y: usize) -> &[Cell; W] {
        &self.rows[y]
    }

    /// Fill every cell with `Cell::Empty`.
    pub fn clear(&mut self) {
        self.rows = [[Cell::Empty; W]; H];
    }

    /// Replace every non-empty cell with `cell`.
    pub fn recolor(&mut self, cell: Cell) {
        for c in self.rows.iter_mut().flatten() {
            if !c.is_empty() {
                *c = cell;
            }
        }
    }

    /// Positions of all non-empty cells, row by row.
    pub fn filled(&self) -> impl Iterator<Item = Point> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, c)| !c.is_empty())
                .map(move |(x, _)| Point::new(x as i32, y as i32))
        })
    }

    /// Whether the non-empty cells of `src`, overlaid at `at`, all land inside
    /// `self` on empty cells.
    ///
    /// Each source column is repeated `x_scale` times and the top `crop_top`
    /// source rows are skipped. Does not mutate anything.
    pub fn can_place<const SW: usize, const SH: usize>(
        &self,
        src: &Image<SW, SH>,
        at: Point,
        x_scale: usize,
        crop_top: usize,
    ) -> bool {
        overlay(src, at, x_scale, crop_top).all(|(p, _)| self.contains(p) && self.get(p).is_empty())
    }

    /// Write the non-empty cells of `src` into `self` at `at`.
    ///
    /// Same traversal as [`Image::can_place`], but cells falling outside `self`
    /// are dropped instead of failing; nothing is checked for overlap.
    pub fn place<const SW: usize, const SH: usize>(
        &mut self,
        src: &Image<SW, SH>,
        at: Point,
        x_scale: usize,
        crop_top: usize,
    ) {
        for (p, cell) in overlay(src, at, x_scale, crop_top) {
            if self.contains(p) {
                self.rows[p.y as usize][p.x as usize] = cell;
            }
        }
    }

    /// Rotate the top-left `window` x `window` square clockwise in place.
    ///
    /// A window of 0 or 1 leaves the image unchanged.
    pub fn rotate_clockwise(&mut self, window: usize) {
        assert!(
            window <= W && window <= H,
            "rotation window {} exceeds {}x{} image",
            window,
            W,
            H
        );
        // Transpose.
        for y in 0..window {
            for x in 0..y {
                let tmp = self.rows[y][x];
                self.rows[y][x] = self.rows[x][y];
                self.rows[x][y] = tmp;
            }
        }
        // Mirror horizontally.
        for row in self.rows.iter_mut().take(window) {
            row[..window].reverse();
        }
    }

    /// Whether row `y` has no empty cell.
    pub fn is_row_full(&self, y: usize) -> bool {
        y < H && self.rows[y].iter().all(|c| !c.is_empty())
    }

    /// Remove every full row and compact the remaining rows downwards.
    ///
    /// Kept rows preserve their relative order; vacated rows at the top are
    /// emptied. Returns the number of rows removed.
    pub fn remove_full_rows(&mut self) -> usize {
        let mut write_y = H;

        // Scan from bottom to top, moving kept rows down to the write position.
        for read_y in (0..H).rev() {
            if self.is_row_full(read_y) {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                self.rows[write_y] = self.rows[read_y];
            }
        }

        for row in &mut self.rows[..write_y] {
            *row = [Cell::Empty; W];
        }

        write_y
    }
}

impl<const W: usize, const H: usize> Default for Image<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Destination points and cells produced by overlaying `src` at `at`.
fn overlay<const SW: usize, const SH: usize>(
    src: &Image<SW, SH>,
    at: Point,
    x_scale: usize,
    crop_top: usize,
) -> impl Iterator<Item = (Point, Cell)> + '_ {
    assert!(x_scale >= 1, "x_scale must be at least 1");
    (crop_top.min(SH)..SH).flat_map(move |sy| {
        (0..SW * x_scale).filter_map(move |sx| {
            let cell = src.rows[sy][sx / x_scale];
            if cell.is_empty() {
                return None;
            }
            Some((at + Point::new(sx as i32, (sy - crop_top) as i32), cell))
        })
    })
}
