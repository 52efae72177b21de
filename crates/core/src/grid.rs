//! Grid module - one player's playfield
//!
//! A 10x20 matrix where each cell is empty or holds the color of a locked piece.
//! Cells live in a flat row-major array (`y * WIDTH + x`), row 0 at the top.
//! Pieces may hang above row 0 (negative y) while their columns are in range;
//! nothing below the floor or past the walls is ever valid or written.

use arrayvec::ArrayVec;

use crate::pieces::Piece;
use crate::types::{Cell, GRID_HEIGHT, GRID_WIDTH};

const WIDTH: usize = GRID_WIDTH as usize;
const HEIGHT: usize = GRID_HEIGHT as usize;
const GRID_SIZE: usize = WIDTH * HEIGHT;

/// Rows removed by one clear pass, bottom to top.
pub type ClearedRows = ArrayVec<usize, HEIGHT>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= GRID_WIDTH as i8 || y < 0 || y >= GRID_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    /// Cell at (x, y), or None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at (x, y). Returns false if out of bounds.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        y < HEIGHT && self.row(y).iter().all(|cell| cell.is_some())
    }

    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(WIDTH)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Whether every filled cell of the piece is inside the walls, above the
    /// floor, and (when on the grid) over an empty cell.
    ///
    /// Cells above the top edge are fine as long as their column is in range.
    pub fn is_valid_position(&self, piece: &Piece) -> bool {
        piece.cells().all(|(x, y)| {
            if x < 0 || x >= GRID_WIDTH as i8 || y >= GRID_HEIGHT as i8 {
                return false;
            }
            y < 0 || !self.is_occupied(x, y)
        })
    }

    /// Write the piece color into every in-bounds filled cell without clearing.
    pub fn stamp(&mut self, piece: &Piece) {
        for (x, y) in piece.cells() {
            self.set(x, y, Some(piece.color));
        }
    }

    /// Lock a piece into the grid and clear completed lines.
    /// Returns the number of lines cleared.
    pub fn lock_piece(&mut self, piece: &Piece) -> usize {
        self.stamp(piece);
        self.clear_lines()
    }

    pub fn clear_lines(&mut self) -> usize {
        self.clear_full_rows().len()
    }

    /// Clear all full rows and return their indices (bottom to top)
    ///
    /// Two-pointer compaction: non-full rows slide down over the removed ones
    /// in a single bottom-up pass, then the freed rows at the top are emptied.
    /// Non-contiguous full rows are handled in the same pass.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut write_y = HEIGHT;

        for read_y in (0..HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared.push(read_y);
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * WIDTH;
                self.cells.copy_within(src..src + WIDTH, write_y * WIDTH);
            }
        }

        self.cells[..write_y * WIDTH].fill(None);
        cleared
    }

    /// Per column: `height - topmost occupied row`, or 0 when empty.
    pub fn height_profile(&self) -> [u8; WIDTH] {
        let mut heights = [0u8; WIDTH];
        for (x, h) in heights.iter_mut().enumerate() {
            if let Some(top) = (0..HEIGHT).find(|&y| self.cells[y * WIDTH + x].is_some()) {
                *h = (HEIGHT - top) as u8;
            }
        }
        heights
    }

    /// Empty cells with at least one occupied cell above them in their column.
    pub fn hole_count(&self) -> u32 {
        let mut holes = 0;
        for x in 0..WIDTH {
            let mut covered = false;
            for y in 0..HEIGHT {
                if self.cells[y * WIDTH + x].is_some() {
                    covered = true;
                } else if covered {
                    holes += 1;
                }
            }
        }
        holes
    }

    pub fn aggregate_height(&self) -> u32 {
        self.height_profile().iter().map(|&h| h as u32).sum()
    }

    /// Sum of absolute height differences between neighbouring columns.
    pub fn bumpiness(&self) -> u32 {
        self.height_profile()
            .windows(2)
            .map(|w| (w[0] as i32 - w[1] as i32).unsigned_abs())
            .sum()
    }

    /// Number of complete rows currently on the grid (nothing is cleared).
    pub fn complete_line_count(&self) -> usize {
        (0..HEIGHT).filter(|&y| self.is_row_full(y)).count()
    }

    pub fn reset(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, PieceKind};
    use proptest::prelude::*;

    const RED: Cell = Some(Color::new(255, 0, 0));

    fn fill_row(grid: &mut Grid, y: i8) {
        for x in 0..GRID_WIDTH as i8 {
            grid.set(x, y, RED);
        }
    }

    #[test]
    fn test_grid_index_calculation() {
        assert_eq!(Grid::index(0, 0), Some(0));
        assert_eq!(Grid::index(9, 0), Some(9));
        assert_eq!(Grid::index(0, 1), Some(10));
        assert_eq!(Grid::index(9, 19), Some(199));
        assert_eq!(Grid::index(-1, 0), None);
        assert_eq!(Grid::index(10, 0), None);
        assert_eq!(Grid::index(0, 20), None);
    }

    #[test]
    fn test_piece_above_top_edge_is_valid() {
        let grid = Grid::new();
        let piece = Piece::at(PieceKind::I, 1, 0, -2);
        assert!(grid.is_valid_position(&piece));
    }

    #[test]
    fn test_piece_past_walls_or_floor_is_invalid() {
        let grid = Grid::new();
        assert!(!grid.is_valid_position(&Piece::at(PieceKind::O, 0, -1, 5)));
        assert!(!grid.is_valid_position(&Piece::at(PieceKind::O, 0, 9, 5)));
        assert!(!grid.is_valid_position(&Piece::at(PieceKind::O, 0, 4, 19)));
        assert!(grid.is_valid_position(&Piece::at(PieceKind::O, 0, 8, 18)));
    }

    #[test]
    fn test_empty_mask_columns_do_not_count() {
        // I in rotation 1 only fills column x+2, so x = -2 is still in bounds.
        let grid = Grid::new();
        assert!(grid.is_valid_position(&Piece::at(PieceKind::I, 1, -2, 0)));
        assert!(!grid.is_valid_position(&Piece::at(PieceKind::I, 1, -3, 0)));
    }

    #[test]
    fn test_stamp_clips_out_of_bounds_cells() {
        let mut grid = Grid::new();
        grid.stamp(&Piece::at(PieceKind::O, 0, 9, -1));
        assert!(grid.is_occupied(9, 0));
        assert_eq!(grid.cells().iter().filter(|c| c.is_some()).count(), 1);
    }

    #[test]
    fn test_clear_full_rows_non_contiguous() {
        let mut grid = Grid::new();
        fill_row(&mut grid, 19);
        fill_row(&mut grid, 17);
        grid.set(0, 18, RED);
        grid.set(3, 16, RED);

        let cleared = grid.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[19, 17]);
        assert!(grid.is_occupied(0, 19));
        assert!(grid.is_occupied(3, 18));
        assert_eq!(grid.cells().iter().filter(|c| c.is_some()).count(), 2);
    }

    #[test]
    fn test_metrics_on_small_stack() {
        let mut grid = Grid::new();
        // Column 0 height 3 with a hole at y=18, column 1 height 1.
        grid.set(0, 17, RED);
        grid.set(0, 19, RED);
        grid.set(1, 19, RED);

        let heights = grid.height_profile();
        assert_eq!(heights[0], 3);
        assert_eq!(heights[1], 1);
        assert!(heights[2..].iter().all(|&h| h == 0));
        assert_eq!(grid.hole_count(), 1);
        assert_eq!(grid.aggregate_height(), 4);
        assert_eq!(grid.bumpiness(), 2 + 1);
    }

    #[test]
    fn test_reset_empties_every_cell() {
        let mut grid = Grid::new();
        fill_row(&mut grid, 10);
        grid.reset();
        assert!(grid.cells().iter().all(|c| c.is_none()));
    }

    proptest! {
        #[test]
        fn test_holes_plus_filled_equals_aggregate_height(
            cells in prop::collection::vec((0i8..10, 0i8..20), 0..80)
        ) {
            let mut grid = Grid::new();
            for (x, y) in cells {
                grid.set(x, y, RED);
            }
            let filled = grid.cells().iter().filter(|c| c.is_some()).count() as u32;
            prop_assert_eq!(grid.hole_count() + filled, grid.aggregate_height());
            prop_assert!(grid.height_profile().iter().all(|&h| h as usize <= HEIGHT));
        }
    }
}
