//! Match controller - two fields, one clock
//!
//! The [`Match`] owns both players' fields, the shared piece source, the
//! agent, and the special-rule timers. Time only moves through
//! [`Match::tick`]: the caller reports elapsed milliseconds and every player
//! whose step deadline has passed takes exactly one step (no catch-up).
//!
//! Cross-player effects are applied here, from the [`LockOutcome`] a field
//! reports after each lock:
//!
//! - soft pause: both players slowed for 10 s
//! - gift: the opponent's preview becomes O or I
//! - top out: the opponent wins

use log::{debug, info};

use crate::config::MatchConfig;
use crate::core::{LockOutcome, PieceSource, PlayerField};
use crate::rules::SpecialRules;
use crate::search::Agent;
use crate::snapshot::{MatchPhase, MatchSnapshot, PlayerSnapshot};
use crate::types::{MatchCommand, Player};

/// Mixed into the piece seed so agent jitter is not correlated with piece draws.
const JITTER_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    Running,
    Paused,
    GameOver { winner: Player },
}

#[derive(Debug)]
pub struct Match {
    base_tick_ms: u32,
    seed: u64,
    source: PieceSource,
    agent: Agent,
    fields: [PlayerField; 2],
    rules: SpecialRules,
    status: MatchStatus,
    clock_ms: u64,
    next_step_at: [u64; 2],
    lock_count: u64,
}

impl Match {
    /// New running match. Without a configured seed one is drawn from entropy.
    pub fn new(config: &MatchConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self::with_agent(config, seed, Agent::seeded(seed ^ JITTER_SEED_SALT))
    }

    pub fn with_agent(config: &MatchConfig, seed: u64, agent: Agent) -> Self {
        let mut source = PieceSource::new(seed);
        let human = PlayerField::new(&mut source);
        let opponent = PlayerField::new(&mut source);
        let base_tick_ms = config.base_tick_ms.max(1);

        info!("match start: seed={} tick={}ms", seed, base_tick_ms);

        Self {
            base_tick_ms,
            seed,
            source,
            agent,
            fields: [human, opponent],
            rules: SpecialRules::new(0),
            status: MatchStatus::Running,
            clock_ms: 0,
            next_step_at: [base_tick_ms as u64; 2],
            lock_count: 0,
        }
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == MatchStatus::Running
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn base_tick_ms(&self) -> u32 {
        self.base_tick_ms
    }

    /// Total locks since creation (not reset by restart).
    pub fn lock_count(&self) -> u64 {
        self.lock_count
    }

    pub fn field(&self, player: Player) -> &PlayerField {
        &self.fields[player.index()]
    }

    pub fn field_mut(&mut self, player: Player) -> &mut PlayerField {
        &mut self.fields[player.index()]
    }

    pub fn rules(&self) -> &SpecialRules {
        &self.rules
    }

    /// Current step interval of `player`, including soft-pause slowdown.
    pub fn tick_interval_ms(&self, player: Player) -> u32 {
        self.rules
            .tick_interval_ms(player, self.base_tick_ms, self.clock_ms)
    }

    /// Match time until the earliest step deadline, `None` unless running.
    pub fn ms_until_next_step(&self) -> Option<u64> {
        if !self.is_running() {
            return None;
        }
        self.next_step_at
            .iter()
            .map(|&at| at.saturating_sub(self.clock_ms))
            .min()
    }

    /// Advance the match clock and run due steps (human first).
    ///
    /// Returns true if at least one player stepped. Does nothing unless running.
    pub fn tick(&mut self, elapsed_ms: u64) -> bool {
        if !self.is_running() {
            return false;
        }

        self.clock_ms += elapsed_ms;
        if self.rules.update(self.clock_ms) {
            info!("rainbow mode at {}ms", self.clock_ms);
        }

        let mut stepped = false;
        for player in Player::ALL {
            if !self.is_running() {
                break;
            }
            let idx = player.index();
            if self.clock_ms < self.next_step_at[idx] {
                continue;
            }
            match player {
                Player::Human => self.step_human(),
                Player::Agent => self.step_agent(),
            }
            self.next_step_at[idx] = self.clock_ms + self.tick_interval_ms(player) as u64;
            stepped = true;
        }
        stepped
    }

    fn step_human(&mut self) {
        if !self.fields[Player::Human.index()].try_move(0, 1) {
            self.lock(Player::Human);
        }
    }

    fn step_agent(&mut self) {
        let field = &mut self.fields[Player::Agent.index()];
        if let Some(placement) = self.agent.choose(field.current(), field.grid()) {
            let piece = field
                .current()
                .with_rotation(placement.rotation)
                .moved_to(placement.column, 0);
            field.set_current(piece);
            field.drop_to_rest();
        }
        self.lock(Player::Agent);
    }

    fn lock(&mut self, player: Player) -> LockOutcome {
        let outcome = self.fields[player.index()].lock_current(&mut self.source);
        self.lock_count += 1;

        debug!(
            "{} lock: lines={} points={} score={}",
            player.as_str(),
            outcome.lines_cleared,
            outcome.points,
            outcome.score_after
        );

        if outcome.soft_pause_triggered {
            self.rules.trigger_soft_pause(self.clock_ms);
            info!(
                "soft pause: {} reached {} points",
                player.as_str(),
                outcome.score_after
            );
        }
        if outcome.funny_piece_triggered {
            info!(
                "funny piece for {}: {}",
                player.as_str(),
                self.fields[player.index()].current().kind.as_str()
            );
        }
        if outcome.gift_for_opponent {
            let opponent = player.opponent();
            let gift = self.source.easy();
            self.fields[opponent.index()].set_next(gift);
            info!(
                "gift from {}: {} gets {}",
                player.as_str(),
                opponent.as_str(),
                gift.as_str()
            );
        }
        if outcome.topped_out {
            let winner = player.opponent();
            self.status = MatchStatus::GameOver { winner };
            info!(
                "game over: {} topped out, {} wins ({} - {})",
                player.as_str(),
                winner.as_str(),
                self.fields[Player::Human.index()].score(),
                self.fields[Player::Agent.index()].score()
            );
        }
        outcome
    }

    /// Move the human piece. False unless running and the target fits.
    pub fn move_piece(&mut self, dx: i8, dy: i8) -> bool {
        self.is_running() && self.fields[Player::Human.index()].try_move(dx, dy)
    }

    pub fn move_left(&mut self) -> bool {
        self.move_piece(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.move_piece(1, 0)
    }

    pub fn soft_drop(&mut self) -> bool {
        self.move_piece(0, 1)
    }

    pub fn rotate(&mut self) -> bool {
        self.is_running() && self.fields[Player::Human.index()].try_rotate()
    }

    /// Drop the human piece to rest and lock it.
    pub fn hard_drop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.fields[Player::Human.index()].drop_to_rest();
        self.lock(Player::Human);
        true
    }

    /// Running <-> Paused. Resuming makes both players due at once.
    pub fn toggle_pause(&mut self) -> bool {
        match self.status {
            MatchStatus::Running => {
                self.status = MatchStatus::Paused;
                info!("paused at {}ms", self.clock_ms);
                true
            }
            MatchStatus::Paused => {
                self.status = MatchStatus::Running;
                self.next_step_at = [self.clock_ms; 2];
                info!("resumed at {}ms", self.clock_ms);
                true
            }
            MatchStatus::GameOver { .. } => false,
        }
    }

    /// Fresh fields, scores, timers and clock. Allowed from any state.
    pub fn restart(&mut self) -> bool {
        for field in &mut self.fields {
            field.reset(&mut self.source);
        }
        self.rules.reset(0);
        self.clock_ms = 0;
        self.next_step_at = [self.base_tick_ms as u64; 2];
        self.status = MatchStatus::Running;
        info!("match restarted");
        true
    }

    /// Dispatch one input command.
    pub fn apply(&mut self, command: MatchCommand) -> bool {
        match command {
            MatchCommand::MoveLeft => self.move_left(),
            MatchCommand::MoveRight => self.move_right(),
            MatchCommand::SoftDrop => self.soft_drop(),
            MatchCommand::Rotate => self.rotate(),
            MatchCommand::HardDrop => self.hard_drop(),
            MatchCommand::TogglePause => self.toggle_pause(),
            MatchCommand::Restart => self.restart(),
        }
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        let (phase, winner) = match self.status {
            MatchStatus::Running => (MatchPhase::Running, None),
            MatchStatus::Paused => (MatchPhase::Paused, None),
            MatchStatus::GameOver { winner } => (MatchPhase::GameOver, Some(winner)),
        };
        let player = |p: Player| {
            PlayerSnapshot::capture(
                p,
                self.field(p),
                self.rules.soft_pause_remaining_ms(p, self.clock_ms),
                self.tick_interval_ms(p),
            )
        };

        MatchSnapshot {
            phase,
            winner,
            clock_ms: self.clock_ms,
            rainbow_active: self.rules.rainbow_active(self.clock_ms),
            rainbow_remaining_ms: self.rules.rainbow_remaining_ms(self.clock_ms),
            next_rainbow_in_ms: self.rules.next_rainbow_in_ms(self.clock_ms),
            human: player(Player::Human),
            agent: player(Player::Agent),
        }
    }
}
