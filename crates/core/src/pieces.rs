//! Pieces module - shape catalog and the falling piece value
//!
//! Every kind owns a fixed, ordered list of shape masks. Rotating a piece only
//! advances an index into that list, wrapping modulo its length, so kinds with
//! fewer states (O has one, I/S/Z two) simply cycle faster. The catalog is the
//! single place where shapes live; nothing is derived at runtime.

use crate::types::{Color, PieceKind, SPAWN_X, SPAWN_Y};

/// Immutable boolean matrix, one row per slice, `1` = filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMask(&'static [&'static [u8]]);

impl ShapeMask {
    pub fn rows(&self) -> &'static [&'static [u8]] {
        self.0
    }

    pub fn height(&self) -> usize {
        self.0.len()
    }

    pub fn width(&self) -> usize {
        self.0.first().map_or(0, |row| row.len())
    }

    pub fn is_filled(&self, dx: usize, dy: usize) -> bool {
        self.0
            .get(dy)
            .and_then(|row| row.get(dx))
            .is_some_and(|&v| v != 0)
    }

    /// Offsets `(dx, dy)` of every filled cell, row by row.
    pub fn offsets(&self) -> impl Iterator<Item = (i8, i8)> + 'static {
        let rows = self.0;
        rows.iter().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, &v)| v != 0)
                .map(move |(dx, _)| (dx as i8, dy as i8))
        })
    }

    pub fn filled_count(&self) -> usize {
        self.offsets().count()
    }
}

static I_SHAPES: [ShapeMask; 2] = [
    ShapeMask(&[&[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0], &[0, 0, 0, 0]]),
    ShapeMask(&[&[0, 0, 1, 0], &[0, 0, 1, 0], &[0, 0, 1, 0], &[0, 0, 1, 0]]),
];

static J_SHAPES: [ShapeMask; 4] = [
    ShapeMask(&[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]]),
    ShapeMask(&[&[0, 1, 1], &[0, 1, 0], &[0, 1, 0]]),
    ShapeMask(&[&[0, 0, 0], &[1, 1, 1], &[0, 0, 1]]),
    ShapeMask(&[&[0, 1, 0], &[0, 1, 0], &[1, 1, 0]]),
];

static L_SHAPES: [ShapeMask; 4] = [
    ShapeMask(&[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]]),
    ShapeMask(&[&[0, 1, 0], &[0, 1, 0], &[0, 1, 1]]),
    ShapeMask(&[&[0, 0, 0], &[1, 1, 1], &[1, 0, 0]]),
    ShapeMask(&[&[1, 1, 0], &[0, 1, 0], &[0, 1, 0]]),
];

static O_SHAPES: [ShapeMask; 1] = [ShapeMask(&[&[1, 1], &[1, 1]])];

static S_SHAPES: [ShapeMask; 2] = [
    ShapeMask(&[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]]),
    ShapeMask(&[&[0, 1, 0], &[0, 1, 1], &[0, 0, 1]]),
];

static T_SHAPES: [ShapeMask; 4] = [
    ShapeMask(&[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]]),
    ShapeMask(&[&[0, 1, 0], &[0, 1, 1], &[0, 1, 0]]),
    ShapeMask(&[&[0, 0, 0], &[1, 1, 1], &[0, 1, 0]]),
    ShapeMask(&[&[0, 1, 0], &[1, 1, 0], &[0, 1, 0]]),
];

static Z_SHAPES: [ShapeMask; 2] = [
    ShapeMask(&[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]]),
    ShapeMask(&[&[0, 0, 1], &[0, 1, 1], &[0, 1, 0]]),
];

static HEART_SHAPES: [ShapeMask; 1] = [ShapeMask(&[
    &[0, 1, 0, 1, 0],
    &[1, 1, 1, 1, 1],
    &[1, 1, 1, 1, 1],
    &[0, 1, 1, 1, 0],
    &[0, 0, 1, 0, 0],
])];

static STAR_SHAPES: [ShapeMask; 1] = [ShapeMask(&[
    &[0, 0, 1, 0, 0],
    &[0, 1, 1, 1, 0],
    &[1, 1, 1, 1, 1],
    &[0, 1, 1, 1, 0],
    &[0, 0, 1, 0, 0],
])];

/// All rotation states of a kind, in rotation order.
pub fn shape_masks(kind: PieceKind) -> &'static [ShapeMask] {
    match kind {
        PieceKind::I => &I_SHAPES,
        PieceKind::J => &J_SHAPES,
        PieceKind::L => &L_SHAPES,
        PieceKind::O => &O_SHAPES,
        PieceKind::S => &S_SHAPES,
        PieceKind::T => &T_SHAPES,
        PieceKind::Z => &Z_SHAPES,
        PieceKind::Heart => &HEART_SHAPES,
        PieceKind::Star => &STAR_SHAPES,
    }
}

/// Number of distinct rotation states of a kind.
pub fn shape_count(kind: PieceKind) -> u8 {
    shape_masks(kind).len() as u8
}

/// A piece on (or above) a grid
///
/// `x`/`y` anchor the top-left corner of the shape's bounding box and may be
/// negative while the piece is partly outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
    pub color: Color,
}

impl Piece {
    /// Create a piece at the spawn position in its first rotation state
    pub fn new(kind: PieceKind) -> Self {
        Self::at(kind, 0, SPAWN_X, SPAWN_Y)
    }

    /// Create a piece at an arbitrary position; `rotation` wraps.
    pub fn at(kind: PieceKind, rotation: u8, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation: rotation % shape_count(kind),
            x,
            y,
            color: kind.color(),
        }
    }

    pub fn shape_count(&self) -> u8 {
        shape_count(self.kind)
    }

    /// Mask of the current rotation state
    pub fn shape(&self) -> ShapeMask {
        let masks = shape_masks(self.kind);
        masks[self.rotation as usize % masks.len()]
    }

    /// Advance to the next rotation state. Does not check collisions.
    pub fn rotate(&mut self) {
        self.rotation = (self.rotation + 1) % self.shape_count();
    }

    pub fn with_rotation(self, rotation: u8) -> Self {
        Self {
            rotation: rotation % self.shape_count(),
            ..self
        }
    }

    pub fn moved_to(self, x: i8, y: i8) -> Self {
        Self { x, y, ..self }
    }

    pub fn shifted(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Absolute grid coordinates of every filled cell.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + 'static {
        let (x, y) = (self.x, self.y);
        self.shape()
            .offsets()
            .map(move |(dx, dy)| (x + dx, y + dy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_counts_per_kind() {
        let expected = [
            (PieceKind::I, 2),
            (PieceKind::J, 4),
            (PieceKind::L, 4),
            (PieceKind::O, 1),
            (PieceKind::S, 2),
            (PieceKind::T, 4),
            (PieceKind::Z, 2),
            (PieceKind::Heart, 1),
            (PieceKind::Star, 1),
        ];
        for (kind, count) in expected {
            assert_eq!(shape_count(kind), count, "{:?}", kind);
        }
    }

    #[test]
    fn standard_kinds_have_four_cells() {
        for kind in PieceKind::STANDARD {
            for mask in shape_masks(kind) {
                assert_eq!(mask.filled_count(), 4, "{:?}", kind);
            }
        }
    }

    #[test]
    fn special_kinds_are_five_by_five() {
        for kind in PieceKind::SPECIAL {
            let mask = shape_masks(kind)[0];
            assert_eq!((mask.width(), mask.height()), (5, 5));
        }
        assert_eq!(shape_masks(PieceKind::Heart)[0].filled_count(), 16);
        assert_eq!(shape_masks(PieceKind::Star)[0].filled_count(), 13);
    }

    #[test]
    fn masks_are_rectangular() {
        for kind in PieceKind::ALL {
            for mask in shape_masks(kind) {
                let w = mask.width();
                assert!(mask.rows().iter().all(|row| row.len() == w));
            }
        }
    }

    #[test]
    fn rotate_wraps_modulo_state_count() {
        let mut piece = Piece::new(PieceKind::S);
        piece.rotate();
        assert_eq!(piece.rotation, 1);
        piece.rotate();
        assert_eq!(piece.rotation, 0);

        let mut o = Piece::new(PieceKind::O);
        o.rotate();
        assert_eq!(o.rotation, 0);
    }

    #[test]
    fn with_rotation_reduces_out_of_range_indices() {
        let piece = Piece::new(PieceKind::I).with_rotation(3);
        assert_eq!(piece.rotation, 1);
        assert_eq!(piece.shape(), shape_masks(PieceKind::I)[1]);
    }

    #[test]
    fn cells_are_offset_by_anchor() {
        let piece = Piece::at(PieceKind::O, 0, 4, 18);
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(4, 18), (5, 18), (4, 19), (5, 19)]);
    }

    #[test]
    fn new_piece_spawns_at_origin_with_kind_color() {
        let piece = Piece::new(PieceKind::Z);
        assert_eq!((piece.x, piece.y, piece.rotation), (SPAWN_X, SPAWN_Y, 0));
        assert_eq!(piece.color, PieceKind::Z.color());
    }
}
