//! Piece tests - shape catalog, rotation and spawn

use tetris_duel::core::{shape_count, shape_masks, Grid, Piece};
use tetris_duel::types::{PieceKind, SPAWN_X, SPAWN_Y};

#[test]
fn test_every_kind_spawns_valid_on_empty_grid() {
    let grid = Grid::new();
    for kind in PieceKind::ALL {
        let piece = Piece::new(kind);
        assert_eq!((piece.x, piece.y), (SPAWN_X, SPAWN_Y));
        assert!(grid.is_valid_position(&piece), "{:?} spawn", kind);
    }
}

#[test]
fn test_rotation_cycles_back_to_start() {
    for kind in PieceKind::ALL {
        let start = Piece::new(kind);
        let mut piece = start;
        for _ in 0..shape_count(kind) {
            piece.rotate();
        }
        assert_eq!(piece, start, "{:?}", kind);
    }
}

#[test]
fn test_rotation_index_always_in_range() {
    for kind in PieceKind::ALL {
        for r in 0..8u8 {
            let piece = Piece::new(kind).with_rotation(r);
            assert!(piece.rotation < shape_count(kind));
            assert_eq!(piece.shape(), shape_masks(kind)[(r % shape_count(kind)) as usize]);
        }
    }
}

#[test]
fn test_z_is_mirror_of_s() {
    let z = shape_masks(PieceKind::Z);
    let s = shape_masks(PieceKind::S);
    assert_eq!(z.len(), 2);
    assert_ne!(z[0], z[1]);
    for (zr, sr) in z[0].rows().iter().zip(s[0].rows()) {
        let mirrored: Vec<u8> = sr.iter().rev().copied().collect();
        assert_eq!(zr.to_vec(), mirrored);
    }
}

#[test]
fn test_i_states() {
    let flat: Vec<_> = Piece::at(PieceKind::I, 0, 0, 0).cells().collect();
    assert_eq!(flat, vec![(0, 1), (1, 1), (2, 1), (3, 1)]);
    let upright: Vec<_> = Piece::at(PieceKind::I, 1, 0, 0).cells().collect();
    assert_eq!(upright, vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
}

#[test]
fn test_special_pieces_are_single_state() {
    for kind in PieceKind::SPECIAL {
        let mut piece = Piece::new(kind);
        piece.rotate();
        assert_eq!(piece.rotation, 0);
        assert_eq!(piece.color, kind.color());
    }
}
