//! RNG module - piece draws and search jitter
//!
//! All randomness in a match flows through two seedable sources:
//!
//! - [`PieceSource`]: uniform draws from the standard, easy (gift) and
//!   special (funny piece) kind pools.
//! - [`Jitter`]: the small perturbation the agent applies to its best score
//!   so it does not play identically every game. [`NoJitter`] turns it off.
//!
//! Both wrap `rand`'s `StdRng`, so a fixed seed replays the same match.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::PieceKind;

/// Probability that a recorded best score gets perturbed.
pub const JITTER_CHANCE: f64 = 0.1;

/// Half-width of the uniform perturbation.
pub const JITTER_SPREAD: f64 = 0.1;

/// Seedable piece generator
#[derive(Debug, Clone)]
pub struct PieceSource {
    rng: StdRng,
}

impl PieceSource {
    /// Create a source with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Uniform over the seven standard kinds.
    pub fn standard(&mut self) -> PieceKind {
        self.pick(&PieceKind::STANDARD)
    }

    /// Uniform over O and I.
    pub fn easy(&mut self) -> PieceKind {
        self.pick(&PieceKind::EASY)
    }

    /// Uniform over Heart and Star.
    pub fn special(&mut self) -> PieceKind {
        self.pick(&PieceKind::SPECIAL)
    }

    fn pick(&mut self, pool: &[PieceKind]) -> PieceKind {
        pool[self.rng.gen_range(0..pool.len())]
    }
}

/// Perturbation applied to a candidate score when it becomes the new best.
pub trait Jitter: Send {
    fn jitter(&mut self, score: f64) -> f64;
}

/// 10% of the time, offsets the score by a uniform value in `[-0.1, 0.1)`.
#[derive(Debug, Clone)]
pub struct RandomJitter {
    rng: StdRng,
}

impl RandomJitter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Jitter for RandomJitter {
    fn jitter(&mut self, score: f64) -> f64 {
        if self.rng.gen_bool(JITTER_CHANCE) {
            score + self.rng.gen_range(-JITTER_SPREAD..JITTER_SPREAD)
        } else {
            score
        }
    }
}

/// Identity jitter for reproducible searches.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl Jitter for NoJitter {
    fn jitter(&mut self, score: f64) -> f64 {
        score
    }
}
