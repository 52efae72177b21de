//! Match engine - the duel on top of the core rules
//!
//! This crate turns two [`core::PlayerField`]s into a match:
//!
//! - [`search`]: the heuristic placement search that drives the agent
//! - [`rules`]: soft-pause and rainbow timers on the match clock
//! - [`match_state`]: the [`Match`] controller (ticks, commands, lock side effects)
//! - [`snapshot`]: serializable read-only views for renderers and logs
//! - [`config`]: [`MatchConfig`] with environment overrides
//!
//! # Example
//!
//! ```
//! use tetris_duel_engine::{Agent, Match, MatchConfig, MatchPhase, MatchStatus};
//! use tetris_duel_engine::types::MatchCommand;
//!
//! let config = MatchConfig::default().with_seed(7);
//! let mut duel = Match::with_agent(&config, 7, Agent::deterministic());
//!
//! duel.apply(MatchCommand::MoveRight);
//! duel.tick(500); // both players take one step
//!
//! assert_eq!(duel.status(), MatchStatus::Running);
//! assert_eq!(duel.snapshot().phase, MatchPhase::Running);
//! ```

pub mod config;
pub mod match_state;
pub mod rules;
pub mod search;
pub mod snapshot;

pub use tetris_duel_core as core;
pub use tetris_duel_types as types;

pub use config::MatchConfig;
pub use match_state::{Match, MatchStatus};
pub use rules::SpecialRules;
pub use search::{best_move, best_move_with, evaluate, Agent, Placement, Weights};
pub use snapshot::{MatchPhase, MatchSnapshot, PieceSnapshot, PlayerSnapshot};
