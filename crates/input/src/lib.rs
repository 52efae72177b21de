//! Terminal input mapping.
//!
//! Turns `crossterm` key events into [`crate::types::MatchCommand`]s for the
//! human player. There is no auto-repeat handling here: the terminal's own key
//! repeat drives held keys, and release events are ignored.

pub mod map;

pub use tetris_duel_types as types;

pub use map::{handle_key_event, should_quit};
