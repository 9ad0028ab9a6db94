//! Matrix tests: bounds, placement and line clears through the public API.

use tetrino::core::{get_shape, Matrix, Tetromino};
use tetrino::types::{Cell, PieceKind, Point, Rotation, MATRIX_HEIGHT, MATRIX_WIDTH};

const Z: Cell = Cell::Piece(PieceKind::Z);

fn fill_row(matrix: &mut Matrix, y: usize, except: Option<usize>) {
    for x in 0..MATRIX_WIDTH {
        if Some(x) != except {
            matrix.set(Point::new(x as i32, y as i32), Z);
        }
    }
}

#[test]
fn test_matrix_new_empty() {
    let matrix = Matrix::new();
    assert_eq!(matrix.width(), MATRIX_WIDTH);
    assert_eq!(matrix.height(), MATRIX_HEIGHT);
    assert_eq!(matrix.filled().count(), 0);
    for y in 0..MATRIX_HEIGHT {
        assert!(!matrix.is_row_full(y));
    }
}

#[test]
fn test_contains_and_occupied_at_edges() {
    let matrix = Matrix::new();
    assert!(matrix.contains(Point::new(0, 0)));
    assert!(matrix.contains(Point::new(9, 39)));
    assert!(!matrix.contains(Point::new(-1, 0)));
    assert!(!matrix.contains(Point::new(10, 0)));
    assert!(!matrix.contains(Point::new(0, 40)));

    // Outside counts as occupied for collision purposes.
    assert!(matrix.occupied(Point::new(-1, 5)));
    assert!(matrix.occupied(Point::new(3, 40)));
    assert!(!matrix.occupied(Point::new(3, 39)));
}

#[test]
#[should_panic(expected = "outside")]
fn test_set_outside_panics() {
    let mut matrix = Matrix::new();
    matrix.set(Point::new(MATRIX_WIDTH as i32, 0), Z);
}

#[test]
fn test_can_place_rejects_walls_floor_and_overlap() {
    let mut matrix = Matrix::new();
    let i_east = get_shape(PieceKind::I, Rotation::East);

    // The vertical I sits in bitmap column 2.
    assert!(matrix.can_place(i_east, Point::new(-2, 0), 1, 0));
    assert!(!matrix.can_place(i_east, Point::new(-3, 0), 1, 0));
    assert!(matrix.can_place(i_east, Point::new(7, 36), 1, 0));
    assert!(!matrix.can_place(i_east, Point::new(8, 36), 1, 0));
    assert!(!matrix.can_place(i_east, Point::new(7, 37), 1, 0));

    matrix.set(Point::new(9, 38), Z);
    assert!(!matrix.can_place(i_east, Point::new(7, 36), 1, 0));
    assert!(matrix.can_place(i_east, Point::new(7, 34), 1, 0));
}

#[test]
fn test_place_drops_cells_outside() {
    let mut matrix = Matrix::new();
    let piece = Tetromino::new(PieceKind::O);
    matrix.place(piece.bitmap(), Point::new(8, 39), 1, 0);
    // Only the in-bounds bottom-left mino of the O lands.
    assert_eq!(matrix.filled().collect::<Vec<_>>(), vec![Point::new(9, 39)]);
    assert_eq!(matrix.get(Point::new(9, 39)), Cell::Piece(PieceKind::O));
}

#[test]
fn test_remove_full_rows_shifts_down() {
    let mut matrix = Matrix::new();
    fill_row(&mut matrix, 39, None);
    fill_row(&mut matrix, 38, Some(4));
    fill_row(&mut matrix, 37, None);
    matrix.set(Point::new(0, 36), Cell::Piece(PieceKind::T));

    assert_eq!(matrix.remove_full_rows(), 2);

    // The partial row drops to the floor, the lone cell above it lands on top.
    assert!(!matrix.is_row_full(39));
    assert!(matrix.get(Point::new(4, 39)).is_empty());
    assert_eq!(matrix.get(Point::new(5, 39)), Z);
    assert_eq!(matrix.get(Point::new(0, 38)), Cell::Piece(PieceKind::T));
    assert_eq!(matrix.filled().count(), MATRIX_WIDTH - 1 + 1);
    assert_eq!(matrix.row(0), &[Cell::Empty; MATRIX_WIDTH]);
}

#[test]
fn test_remove_full_rows_without_full_rows_is_noop() {
    let mut matrix = Matrix::new();
    fill_row(&mut matrix, 39, Some(0));
    let before = matrix;
    assert_eq!(matrix.remove_full_rows(), 0);
    assert_eq!(matrix, before);
}
