//! Snapshot JSON shape - what renderers and the snapshot log consume

use serde_json::Value;

use tetris_duel::core::Piece;
use tetris_duel::engine::{Agent, Match, MatchConfig};
use tetris_duel::types::{Color, PieceKind, Player};

fn snapshot_json(duel: &Match) -> Value {
    serde_json::to_value(duel.snapshot()).unwrap()
}

#[test]
fn test_top_level_fields() {
    let duel = Match::with_agent(&MatchConfig::default(), 1, Agent::deterministic());
    let v = snapshot_json(&duel);

    assert_eq!(v["phase"], "running");
    assert!(v["winner"].is_null());
    assert_eq!(v["clock_ms"], 0);
    assert_eq!(v["rainbow_active"], false);
    assert_eq!(v["next_rainbow_in_ms"], 120_000);
    assert_eq!(v["human"]["player"], "human");
    assert_eq!(v["agent"]["player"], "agent");
}

#[test]
fn test_grid_cells_are_hex_or_null() {
    let mut duel = Match::with_agent(&MatchConfig::default(), 1, Agent::deterministic());
    duel.field_mut(Player::Human)
        .grid_mut()
        .set(2, 19, Some(Color::new(0xFF, 0x80, 0x00)));
    let v = snapshot_json(&duel);

    let grid = v["human"]["grid"].as_array().unwrap();
    assert_eq!(grid.len(), 20);
    assert!(grid.iter().all(|row| row.as_array().unwrap().len() == 10));
    assert_eq!(grid[19][2], "#FF8000");
    assert!(grid[0][0].is_null());
}

#[test]
fn test_current_piece_and_next() {
    let mut duel = Match::with_agent(&MatchConfig::default(), 1, Agent::deterministic());
    duel.field_mut(Player::Agent)
        .set_current(Piece::at(PieceKind::Heart, 0, 2, -1));
    duel.field_mut(Player::Agent).set_next(PieceKind::O);
    let v = snapshot_json(&duel);

    let current = &v["agent"]["current"];
    assert_eq!(current["kind"], "heart");
    assert_eq!(current["x"], 2);
    assert_eq!(current["y"], -1);
    assert_eq!(current["color"], "#FF00FF");
    assert_eq!(v["agent"]["next"], "o");
}

#[test]
fn test_paused_phase_and_piece_rebuild() {
    let mut duel = Match::with_agent(&MatchConfig::default(), 1, Agent::deterministic());
    duel.toggle_pause();
    assert_eq!(snapshot_json(&duel)["phase"], "paused");

    let snap = duel.snapshot();
    let piece = snap.human.current.to_piece();
    assert_eq!(piece, *duel.field(Player::Human).current());
}
