//! Terminal front end for the duel.
//!
//! A small, game-oriented rendering layer: snapshots are drawn into a plain
//! framebuffer, which a crossterm-backed renderer flushes as diffs. No widget
//! toolkit, no game logic.
//!
//! - [`fb`]: framebuffer of styled glyphs
//! - [`duel_view`]: snapshot to framebuffer (pure, unit-tested)
//! - [`renderer`]: raw-mode terminal session and diff encoding

pub mod duel_view;
pub mod fb;
pub mod renderer;

pub use tetris_duel_engine as engine;
pub use tetris_duel_types as types;

pub use duel_view::{hsv_to_rgb, rainbow_color, DuelView, Viewport};
pub use fb::{FrameBuffer, Glyph, Style};
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, Run, TerminalRenderer};
