//! Tetris Duel (workspace facade crate).
//!
//! Re-exports the member crates under one name and hosts the async
//! [`runtime`] that drives a [`engine::Match`] against wall-clock time.

pub mod runtime;

pub use tetris_duel_core as core;
pub use tetris_duel_engine as engine;
pub use tetris_duel_input as input;
pub use tetris_duel_term as term;
pub use tetris_duel_types as types;
