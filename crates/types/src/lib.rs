//! Shared types and constants for the duel.
//!
//! Everything in here is plain data: piece kinds, player identities, colors,
//! input commands, and the numeric rules of the match. The core, engine, input
//! and terminal crates all speak in these types.
//!
//! # Grid Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn position**: (3, 0) for every kind, special pieces included
//!
//! # Match Timing
//!
//! Timing values are in milliseconds of match time (the clock stops while paused):
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_TICK_MS` | 500 | Interval between two steps of one player |
//! | `SOFT_PAUSE_DURATION_MS` | 10000 | How long a soft pause slows both players |
//! | `RAINBOW_INTERVAL_MS` | 120000 | Match time between two rainbow windows |
//! | `RAINBOW_DURATION_MS` | 20000 | Length of a rainbow window |
//!
//! # Special Rules
//!
//! | Rule | Trigger | Effect |
//! |------|---------|--------|
//! | Soft pause | score crosses a multiple of 1000 | both players tick 1.2x slower for 10s |
//! | Funny piece | score crosses a multiple of 3000 | own next piece becomes Heart or Star |
//! | Gift | a lock clears exactly 2 lines | opponent's next piece becomes O or I |
//! | Rainbow | every 120s of match time | cosmetic color cycling for 20s |
//!
//! # Examples
//!
//! ```
//! use tetris_duel_types::{MatchCommand, PieceKind, Player, GRID_HEIGHT, GRID_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("heart"), Some(PieceKind::Heart));
//! assert_eq!(Player::Human.opponent(), Player::Agent);
//! assert_eq!(MatchCommand::from_str("hardDrop"), Some(MatchCommand::HardDrop));
//! assert_eq!((GRID_WIDTH, GRID_HEIGHT), (10, 20));
//! ```

use std::fmt;

use serde::{Serialize, Serializer};

/// Grid width in cells (10 columns)
pub const GRID_WIDTH: u8 = 10;

/// Grid height in cells (20 rows)
pub const GRID_HEIGHT: u8 = 20;

/// Column of the top-left corner of a freshly spawned piece
pub const SPAWN_X: i8 = 3;

/// Row of the top-left corner of a freshly spawned piece
pub const SPAWN_Y: i8 = 0;

/// Default interval between two steps of the same player
pub const BASE_TICK_MS: u32 = 500;

/// Soft pause fires each time a score crosses a multiple of this.
pub const SOFT_PAUSE_SCORE_STEP: u32 = 1000;

/// Duration of a soft pause.
pub const SOFT_PAUSE_DURATION_MS: u64 = 10_000;

/// Soft pause slowdown as a ratio (6/5 = 1.2x the base interval).
pub const SOFT_PAUSE_NUMERATOR: u32 = 6;

/// Soft pause slowdown denominator
pub const SOFT_PAUSE_DENOMINATOR: u32 = 5;

/// Funny piece fires each time a score crosses a multiple of this.
pub const FUNNY_PIECE_SCORE_STEP: u32 = 3000;

/// Number of lines a single lock must clear to send a gift to the opponent.
pub const GIFT_LINES: usize = 2;

/// Match time between two rainbow windows.
pub const RAINBOW_INTERVAL_MS: u64 = 120_000;

/// Length of one rainbow window.
pub const RAINBOW_DURATION_MS: u64 = 20_000;

/// Points per lock event, indexed by lines cleared.
///
/// 50 per line plus a bonus of 50/200/300 for 2/3/4 lines.
pub const LINE_SCORES: [u32; 5] = [0, 50, 150, 350, 500];

/// 24-bit RGB color tag carried by pieces and written into the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Colors serialize as `#RRGGBB` strings.
impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(Color)`: Cell filled by a locked piece of that color
pub type Cell = Option<Color>;

/// The nine piece kinds
///
/// The seven standard tetrominoes plus two 5x5 bonus shapes that only
/// appear through the funny-piece rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
    Heart,
    Star,
}

impl PieceKind {
    /// Every kind, standard ones first.
    pub const ALL: [PieceKind; 9] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
        PieceKind::Heart,
        PieceKind::Star,
    ];

    /// Kinds drawn for normal play.
    pub const STANDARD: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Kinds handed out by the gift rule.
    pub const EASY: [PieceKind; 2] = [PieceKind::O, PieceKind::I];

    /// Kinds handed out by the funny-piece rule.
    pub const SPECIAL: [PieceKind; 2] = [PieceKind::Heart, PieceKind::Star];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_duel_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Star"), Some(PieceKind::Star));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            "heart" => Some(PieceKind::Heart),
            "star" => Some(PieceKind::Star),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
            PieceKind::Heart => "heart",
            PieceKind::Star => "star",
        }
    }

    /// Fixed color of each kind.
    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::new(0x00, 0xFF, 0xFF),
            PieceKind::J => Color::new(0x00, 0x00, 0xFF),
            PieceKind::L => Color::new(0xFF, 0x80, 0x00),
            PieceKind::O => Color::new(0xFF, 0xFF, 0x00),
            PieceKind::S => Color::new(0x00, 0xFF, 0x00),
            PieceKind::T => Color::new(0x80, 0x00, 0xFF),
            PieceKind::Z => Color::new(0xFF, 0x00, 0x00),
            PieceKind::Heart => Color::new(0xFF, 0x00, 0xFF),
            PieceKind::Star => Color::new(0xFF, 0xFF, 0xFF),
        }
    }

    pub fn is_special(&self) -> bool {
        matches!(self, PieceKind::Heart | PieceKind::Star)
    }
}

/// The two sides of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Human,
    Agent,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::Human, Player::Agent];

    pub fn opponent(&self) -> Self {
        match self {
            Player::Human => Player::Agent,
            Player::Agent => Player::Human,
        }
    }

    /// Stable index for per-player arrays.
    pub fn index(&self) -> usize {
        match self {
            Player::Human => 0,
            Player::Agent => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Player::Human => "human",
            Player::Agent => "agent",
        }
    }
}

/// Commands the input side can send to the match.
///
/// Each maps to exactly one operation of the match controller.
/// Movement commands only ever affect the human player's piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchCommand {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Advance to the next rotation state
    Rotate,
    /// Drop to rest and lock immediately
    HardDrop,
    /// Pause or resume both players
    TogglePause,
    /// Reset both grids, scores and timers
    Restart,
}

impl MatchCommand {
    /// Parse command from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_duel_types::MatchCommand;
    ///
    /// assert_eq!(MatchCommand::from_str("moveLeft"), Some(MatchCommand::MoveLeft));
    /// assert_eq!(MatchCommand::from_str("togglepause"), Some(MatchCommand::TogglePause));
    /// assert_eq!(MatchCommand::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(MatchCommand::MoveLeft),
            "moveright" => Some(MatchCommand::MoveRight),
            "softdrop" => Some(MatchCommand::SoftDrop),
            "rotate" => Some(MatchCommand::Rotate),
            "harddrop" => Some(MatchCommand::HardDrop),
            "togglepause" | "pause" => Some(MatchCommand::TogglePause),
            "restart" => Some(MatchCommand::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchCommand::MoveLeft => "moveLeft",
            MatchCommand::MoveRight => "moveRight",
            MatchCommand::SoftDrop => "softDrop",
            MatchCommand::Rotate => "rotate",
            MatchCommand::HardDrop => "hardDrop",
            MatchCommand::TogglePause => "togglePause",
            MatchCommand::Restart => "restart",
        }
    }
}
