//! Special-rule timers
//!
//! Only timestamps on the match clock are stored. Whether a rule is active and
//! how long it has left are computed from the current clock value, so pausing
//! (which freezes the clock) freezes every timer for free.

use crate::core::scoring::slowed_interval_ms;
use crate::types::{Player, RAINBOW_DURATION_MS, RAINBOW_INTERVAL_MS, SOFT_PAUSE_DURATION_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialRules {
    /// Match start, restart, or the last rainbow trigger.
    rainbow_epoch_ms: u64,
    rainbow_until_ms: Option<u64>,
    soft_pause_until_ms: [Option<u64>; 2],
}

impl SpecialRules {
    pub fn new(now_ms: u64) -> Self {
        Self {
            rainbow_epoch_ms: now_ms,
            rainbow_until_ms: None,
            soft_pause_until_ms: [None; 2],
        }
    }

    pub fn reset(&mut self, now_ms: u64) {
        *self = Self::new(now_ms);
    }

    /// Fire the rainbow window if its interval has elapsed. Returns true on trigger.
    pub fn update(&mut self, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.rainbow_epoch_ms) < RAINBOW_INTERVAL_MS {
            return false;
        }
        self.rainbow_epoch_ms = now_ms;
        self.rainbow_until_ms = Some(now_ms + RAINBOW_DURATION_MS);
        true
    }

    /// Slow both players for the next 10 seconds (re-triggering extends).
    pub fn trigger_soft_pause(&mut self, now_ms: u64) {
        let until = Some(now_ms + SOFT_PAUSE_DURATION_MS);
        self.soft_pause_until_ms = [until; 2];
    }

    pub fn soft_pause_active(&self, player: Player, now_ms: u64) -> bool {
        self.soft_pause_remaining_ms(player, now_ms) > 0
    }

    pub fn soft_pause_remaining_ms(&self, player: Player, now_ms: u64) -> u64 {
        self.soft_pause_until_ms[player.index()].map_or(0, |until| until.saturating_sub(now_ms))
    }

    pub fn rainbow_active(&self, now_ms: u64) -> bool {
        self.rainbow_remaining_ms(now_ms) > 0
    }

    pub fn rainbow_remaining_ms(&self, now_ms: u64) -> u64 {
        self.rainbow_until_ms.map_or(0, |until| until.saturating_sub(now_ms))
    }

    pub fn next_rainbow_in_ms(&self, now_ms: u64) -> u64 {
        (self.rainbow_epoch_ms + RAINBOW_INTERVAL_MS).saturating_sub(now_ms)
    }

    /// Step interval for `player`, slowed while its soft pause runs.
    pub fn tick_interval_ms(&self, player: Player, base_ms: u32, now_ms: u64) -> u32 {
        if self.soft_pause_active(player, now_ms) {
            slowed_interval_ms(base_ms)
        } else {
            base_ms
        }
    }
}

impl Default for SpecialRules {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_pause_applies_to_both_and_expires() {
        let mut rules = SpecialRules::new(0);
        rules.trigger_soft_pause(1_000);

        for player in Player::ALL {
            assert!(rules.soft_pause_active(player, 1_000));
            assert_eq!(rules.tick_interval_ms(player, 500, 5_000), 600);
            assert_eq!(rules.soft_pause_remaining_ms(player, 6_000), 5_000);
            assert!(!rules.soft_pause_active(player, 11_000));
            assert_eq!(rules.tick_interval_ms(player, 500, 11_000), 500);
        }
    }

    #[test]
    fn test_rainbow_fires_every_interval() {
        let mut rules = SpecialRules::new(0);
        assert!(!rules.update(119_999));
        assert_eq!(rules.next_rainbow_in_ms(119_999), 1);

        assert!(rules.update(120_000));
        assert!(rules.rainbow_active(120_000));
        assert_eq!(rules.rainbow_remaining_ms(130_000), 10_000);
        assert!(!rules.rainbow_active(140_000));

        assert!(!rules.update(200_000));
        assert!(rules.update(240_000));
    }

    #[test]
    fn test_reset_restarts_rainbow_interval() {
        let mut rules = SpecialRules::new(0);
        rules.trigger_soft_pause(0);
        rules.reset(100_000);
        assert!(!rules.update(200_000));
        assert!(rules.update(220_000));
        assert_eq!(rules.soft_pause_remaining_ms(Player::Human, 100_000), 0);
    }
}
