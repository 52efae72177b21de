//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of a single player's side of the duel. It has
//! no dependency on timing, UI, or I/O:
//!
//! - **Deterministic**: a seeded [`PieceSource`] replays the same piece sequence
//! - **Testable**: every rule is a plain function or method on owned state
//! - **Allocation-free hot paths**: the grid is a fixed array and line clears
//!   report into an `ArrayVec`
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 playfield with collision, line clearing and surface metrics
//! - [`pieces`]: shape catalog (seven tetrominoes plus Heart and Star) and [`Piece`]
//! - [`rng`]: seeded piece draws and the agent's score [`Jitter`]
//! - [`scoring`]: line-clear points and score-threshold crossings
//! - [`field`]: one player's grid, falling piece, preview and score
//!
//! # Example
//!
//! ```
//! use tetris_duel_core::{PieceSource, PlayerField};
//!
//! let mut source = PieceSource::new(12345);
//! let mut field = PlayerField::new(&mut source);
//!
//! field.try_move(1, 0);
//! field.drop_to_rest();
//! let outcome = field.lock_current(&mut source);
//!
//! assert_eq!(outcome.lines_cleared, 0);
//! assert!(!outcome.topped_out);
//! ```

pub mod field;
pub mod grid;
pub mod pieces;
pub mod rng;
pub mod scoring;

pub use tetris_duel_types as types;

pub use field::{LockOutcome, PlayerField};
pub use grid::{ClearedRows, Grid};
pub use pieces::{shape_count, shape_masks, Piece, ShapeMask};
pub use rng::{Jitter, NoJitter, PieceSource, RandomJitter};
pub use scoring::{calculate_score, crossed_threshold, line_clear_points, ScoreResult};
