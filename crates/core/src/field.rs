//! Player field module - one side of the duel
//!
//! A [`PlayerField`] bundles the grid, the falling piece, the preview kind and
//! the score of a single player. It owns the lock sequence:
//!
//! 1. write the piece and clear complete rows
//! 2. add line-clear points and detect score-threshold crossings
//! 3. on a funny-piece crossing, replace the preview with a special kind
//! 4. promote the preview to the falling piece and draw a new standard preview
//! 5. check whether the new piece fits at spawn
//!
//! Effects that reach the other player (soft pause, gift, game over) are only
//! reported through [`LockOutcome`]; the field never sees its opponent.

use log::trace;

use crate::grid::Grid;
use crate::pieces::Piece;
use crate::rng::PieceSource;
use crate::scoring::calculate_score;
use crate::types::PieceKind;

/// Everything that happened during one lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockOutcome {
    pub lines_cleared: usize,
    pub points: u32,
    pub score_before: u32,
    pub score_after: u32,
    pub soft_pause_triggered: bool,
    /// The preview was replaced by a special kind (already applied).
    pub funny_piece_triggered: bool,
    /// The opponent's preview should become an easy kind.
    pub gift_for_opponent: bool,
    /// The new falling piece collides at spawn.
    pub topped_out: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerField {
    grid: Grid,
    current: Piece,
    next: PieceKind,
    score: u32,
}

impl PlayerField {
    /// Fresh empty field with two standard draws
    pub fn new(source: &mut PieceSource) -> Self {
        let current = Piece::new(source.standard());
        let next = source.standard();
        Self::from_parts(Grid::new(), current, next, 0)
    }

    /// Build a field from explicit state (tests and replays).
    pub fn from_parts(grid: Grid, current: Piece, next: PieceKind, score: u32) -> Self {
        Self {
            grid,
            current,
            next,
            score,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn set_current(&mut self, piece: Piece) {
        self.current = piece;
    }

    pub fn next(&self) -> PieceKind {
        self.next
    }

    pub fn set_next(&mut self, kind: PieceKind) {
        self.next = kind;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn can_move(&self, dx: i8, dy: i8) -> bool {
        self.grid.is_valid_position(&self.current.shifted(dx, dy))
    }

    /// Move the falling piece if the target fits.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let moved = self.current.shifted(dx, dy);
        if !self.grid.is_valid_position(&moved) {
            return false;
        }
        self.current = moved;
        true
    }

    /// Advance the rotation state, reverting on collision. No wall kicks.
    pub fn try_rotate(&mut self) -> bool {
        let mut rotated = self.current;
        rotated.rotate();
        if !self.grid.is_valid_position(&rotated) {
            return false;
        }
        self.current = rotated;
        true
    }

    /// Move down until blocked. Returns the number of rows moved.
    pub fn drop_to_rest(&mut self) -> u8 {
        let mut rows = 0u8;
        while self.try_move(0, 1) {
            rows = rows.saturating_add(1);
        }
        rows
    }

    pub fn spawn_is_valid(&self) -> bool {
        self.grid.is_valid_position(&self.current)
    }

    /// Lock the falling piece where it is and bring in the next one.
    pub fn lock_current(&mut self, source: &mut PieceSource) -> LockOutcome {
        let lines_cleared = self.grid.lock_piece(&self.current);
        let result = calculate_score(lines_cleared, self.score);
        self.score = result.score_after;

        if result.funny_piece {
            self.next = source.special();
        }

        self.current = Piece::new(self.next);
        self.next = source.standard();
        let topped_out = !self.spawn_is_valid();

        trace!(
            "lock: lines={} points={} score={} next={}",
            lines_cleared,
            result.points,
            self.score,
            self.next.as_str()
        );

        LockOutcome {
            lines_cleared,
            points: result.points,
            score_before: result.score_before,
            score_after: result.score_after,
            soft_pause_triggered: result.soft_pause,
            funny_piece_triggered: result.funny_piece,
            gift_for_opponent: result.gift,
            topped_out,
        }
    }

    /// Empty grid, zero score, fresh pieces.
    pub fn reset(&mut self, source: &mut PieceSource) {
        *self = Self::new(source);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, GRID_WIDTH};

    const GREY: Option<Color> = Some(Color::new(0x80, 0x80, 0x80));

    fn field_with(kind: PieceKind, next: PieceKind) -> PlayerField {
        PlayerField::from_parts(Grid::new(), Piece::new(kind), next, 0)
    }

    #[test]
    fn test_try_move_blocked_by_wall() {
        let mut field = field_with(PieceKind::O, PieceKind::T);
        field.set_current(Piece::at(PieceKind::O, 0, 0, 0));
        assert!(!field.try_move(-1, 0));
        assert_eq!(field.current().x, 0);
        assert!(field.try_move(1, 0));
        assert_eq!(field.current().x, 1);
    }

    #[test]
    fn test_rotate_reverts_on_collision() {
        let mut field = field_with(PieceKind::I, PieceKind::T);
        // Flat I on the floor: the vertical state would poke through it.
        field.set_current(Piece::at(PieceKind::I, 0, 3, 18));
        assert!(!field.try_rotate());
        assert_eq!(field.current().rotation, 0);
    }

    #[test]
    fn test_drop_to_rest_counts_rows() {
        let mut field = field_with(PieceKind::O, PieceKind::T);
        assert_eq!(field.drop_to_rest(), 18);
        assert_eq!(field.current().y, 18);
        assert!(!field.can_move(0, 1));
    }

    #[test]
    fn test_lock_advances_next_into_current() {
        let mut source = PieceSource::new(3);
        let mut field = field_with(PieceKind::O, PieceKind::L);
        field.drop_to_rest();
        let outcome = field.lock_current(&mut source);

        assert_eq!(outcome.lines_cleared, 0);
        assert!(!outcome.topped_out);
        assert_eq!(field.current().kind, PieceKind::L);
        assert!(!field.next().is_special());
        assert!(field.grid().is_occupied(3, 19));
    }

    #[test]
    fn test_double_clear_flags_gift() {
        let mut source = PieceSource::new(5);
        let mut grid = Grid::new();
        for y in 18..20 {
            for x in 0..GRID_WIDTH as i8 {
                if x != 4 && x != 5 {
                    grid.set(x, y, GREY);
                }
            }
        }
        let mut field = PlayerField::from_parts(grid, Piece::at(PieceKind::O, 0, 4, 0), PieceKind::T, 0);
        field.drop_to_rest();
        let outcome = field.lock_current(&mut source);

        assert_eq!(outcome.lines_cleared, 2);
        assert_eq!(outcome.points, 150);
        assert!(outcome.gift_for_opponent);
        assert_eq!(field.score(), 150);
    }

    #[test]
    fn test_funny_piece_becomes_current() {
        let mut source = PieceSource::new(11);
        let mut grid = Grid::new();
        for x in 0..GRID_WIDTH as i8 {
            if x != 0 {
                grid.set(x, 19, GREY);
            }
        }
        let current = Piece::at(PieceKind::I, 1, -2, 0);
        let mut field = PlayerField::from_parts(grid, current, PieceKind::T, 2990);
        field.drop_to_rest();
        let outcome = field.lock_current(&mut source);

        assert_eq!(outcome.lines_cleared, 1);
        assert_eq!(outcome.score_after, 3040);
        assert!(outcome.funny_piece_triggered);
        assert!(outcome.soft_pause_triggered);
        assert!(field.current().kind.is_special());
    }

    #[test]
    fn test_topped_out_when_spawn_blocked() {
        let mut source = PieceSource::new(1);
        let mut grid = Grid::new();
        for x in 0..GRID_WIDTH as i8 {
            for y in 0..3 {
                if x != 9 {
                    grid.set(x, y, GREY);
                }
            }
        }
        let mut field =
            PlayerField::from_parts(grid, Piece::at(PieceKind::O, 0, 0, 5), PieceKind::T, 0);
        let outcome = field.lock_current(&mut source);
        assert!(outcome.topped_out);
        assert!(!field.spawn_is_valid());
    }

    #[test]
    fn test_reset_clears_grid_and_score() {
        let mut source = PieceSource::new(2);
        let mut field = field_with(PieceKind::O, PieceKind::T);
        field.grid_mut().set(0, 19, GREY);
        field.reset(&mut source);
        assert_eq!(field.score(), 0);
        assert!(field.grid().cells().iter().all(|c| c.is_none()));
    }
}
