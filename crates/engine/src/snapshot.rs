//! Read-only views of a match for renderers, logs and tests.
//!
//! Snapshots are plain owned data and serialize to JSON with `serde`.

use serde::Serialize;

use crate::core::{Piece, PlayerField};
use crate::types::{Cell, Color, PieceKind, Player, GRID_HEIGHT, GRID_WIDTH};

pub type GridCells = [[Cell; GRID_WIDTH as usize]; GRID_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    Running,
    Paused,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
    pub color: Color,
}

impl PieceSnapshot {
    /// Rebuild the piece, e.g. to walk its cells.
    pub fn to_piece(&self) -> Piece {
        Piece::at(self.kind, self.rotation, self.x, self.y)
    }
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            color: value.color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSnapshot {
    pub player: Player,
    pub grid: GridCells,
    pub current: PieceSnapshot,
    pub next: PieceKind,
    pub score: u32,
    pub soft_pause_remaining_ms: u64,
    pub tick_interval_ms: u32,
}

impl PlayerSnapshot {
    pub fn capture(
        player: Player,
        field: &PlayerField,
        soft_pause_remaining_ms: u64,
        tick_interval_ms: u32,
    ) -> Self {
        let mut grid: GridCells = [[None; GRID_WIDTH as usize]; GRID_HEIGHT as usize];
        for (dst, src) in grid.iter_mut().zip(field.grid().rows()) {
            dst.copy_from_slice(src);
        }

        Self {
            player,
            grid,
            current: (*field.current()).into(),
            next: field.next(),
            score: field.score(),
            soft_pause_remaining_ms,
            tick_interval_ms,
        }
    }

    pub fn soft_pause_active(&self) -> bool {
        self.soft_pause_remaining_ms > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSnapshot {
    pub phase: MatchPhase,
    pub winner: Option<Player>,
    pub clock_ms: u64,
    pub rainbow_active: bool,
    pub rainbow_remaining_ms: u64,
    pub next_rainbow_in_ms: u64,
    pub human: PlayerSnapshot,
    pub agent: PlayerSnapshot,
}

impl MatchSnapshot {
    pub fn player(&self, player: Player) -> &PlayerSnapshot {
        match player {
            Player::Human => &self.human,
            Player::Agent => &self.agent,
        }
    }

    pub fn playable(&self) -> bool {
        self.phase == MatchPhase::Running
    }
}
