//! Rotation table and wall kick tests.

use tetrino::core::{get_kicks, get_shape, Tetromino, SPAWN_POSITION};
use tetrino::types::{Cell, PieceKind, Point, Rotation};

fn cells(kind: PieceKind, rotation: Rotation) -> Vec<(i32, i32)> {
    get_shape(kind, rotation).filled().map(|p| (p.x, p.y)).collect()
}

const ROTATIONS: [Rotation; 4] = [Rotation::North, Rotation::East, Rotation::South, Rotation::West];

// ============== Shape Tests ==============

#[test]
fn test_i_piece_shapes() {
    assert_eq!(cells(PieceKind::I, Rotation::North), [(0, 1), (1, 1), (2, 1), (3, 1)]);
    assert_eq!(cells(PieceKind::I, Rotation::East), [(2, 0), (2, 1), (2, 2), (2, 3)]);
    assert_eq!(cells(PieceKind::I, Rotation::South), [(0, 2), (1, 2), (2, 2), (3, 2)]);
    assert_eq!(cells(PieceKind::I, Rotation::West), [(1, 0), (1, 1), (1, 2), (1, 3)]);
}

#[test]
fn test_o_piece_never_changes() {
    let north = cells(PieceKind::O, Rotation::North);
    assert_eq!(north, [(1, 0), (2, 0), (1, 1), (2, 1)]);
    for rotation in ROTATIONS {
        assert_eq!(cells(PieceKind::O, rotation), north);
    }
}

#[test]
fn test_t_piece_shapes() {
    assert_eq!(cells(PieceKind::T, Rotation::North), [(1, 0), (0, 1), (1, 1), (2, 1)]);
    assert_eq!(cells(PieceKind::T, Rotation::East), [(1, 0), (1, 1), (2, 1), (1, 2)]);
    assert_eq!(cells(PieceKind::T, Rotation::South), [(0, 1), (1, 1), (2, 1), (1, 2)]);
    assert_eq!(cells(PieceKind::T, Rotation::West), [(1, 0), (0, 1), (1, 1), (1, 2)]);
}

#[test]
fn test_every_shape_has_four_minos_of_its_kind() {
    for kind in PieceKind::ALL {
        for rotation in ROTATIONS {
            let shape = get_shape(kind, rotation);
            let filled: Vec<Point> = shape.filled().collect();
            assert_eq!(filled.len(), 4, "{kind:?} {rotation:?}");
            assert!(filled.iter().all(|&p| shape.get(p) == Cell::Piece(kind)));
        }
    }
}

// ============== Kick Tests ==============

#[test]
fn test_first_kick_is_in_place() {
    for kind in PieceKind::ALL {
        for rotation in ROTATIONS {
            for clockwise in [false, true] {
                assert_eq!(get_kicks(kind, rotation, clockwise)[0], Point::new(0, 0));
            }
        }
    }
}

#[test]
fn test_kicks_undo_reverse_rotation() {
    // Rotating back tries the mirrored offsets: kicks(A -> B) == -kicks(B -> A).
    for kind in [PieceKind::T, PieceKind::I] {
        for from in ROTATIONS {
            let forward = get_kicks(kind, from, true);
            let back = get_kicks(kind, from.rotate_cw(), false);
            for (a, b) in forward.iter().zip(back.iter()) {
                assert_eq!(*a + *b, Point::new(0, 0), "{kind:?} from {from:?}");
            }
        }
    }
}

#[test]
fn test_jlstz_share_a_table() {
    for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::Z] {
        assert_eq!(
            get_kicks(kind, Rotation::East, true),
            get_kicks(PieceKind::T, Rotation::East, true)
        );
    }
    assert_ne!(
        get_kicks(PieceKind::I, Rotation::East, true),
        get_kicks(PieceKind::T, Rotation::East, true)
    );
}

// ============== Tetromino Tests ==============

#[test]
fn test_new_tetromino_spawns_north_at_spawn_position() {
    let piece = Tetromino::new(PieceKind::L);
    assert_eq!(piece.rotation, Rotation::North);
    assert_eq!(piece.pos, SPAWN_POSITION);
    assert_eq!(SPAWN_POSITION, Point::new(3, 18));
    assert_eq!(piece.top_row(), 18);
}

#[test]
fn test_rotate_to_reloads_bitmap() {
    let mut piece = Tetromino::new(PieceKind::I);
    piece.rotate_to(Rotation::East);
    assert_eq!(piece.bitmap(), get_shape(PieceKind::I, Rotation::East));
    assert_eq!(piece.top_row(), SPAWN_POSITION.y);

    piece.rotate_to(Rotation::North);
    assert_eq!(piece, Tetromino::new(PieceKind::I));
}
