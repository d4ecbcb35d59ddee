//! Seeded stand-in for keyboard input.

use maze_chase_core::Heading;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Picks a fresh wished heading every `interval` ticks.
#[derive(Debug)]
pub(crate) struct Autopilot {
    rng: ChaCha8Rng,
    interval: u64,
}

impl Autopilot {
    pub(crate) fn new(seed: u64, interval: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            interval: interval.max(1),
        }
    }

    /// Wished heading for `tick`, or `None` when the previous wish still stands.
    pub(crate) fn wish(&mut self, tick: u64) -> Option<Heading> {
        if tick % self.interval != 1 % self.interval {
            return None;
        }
        let index = self.rng.gen_range(0..Heading::ARCADE_ORDER.len());
        Heading::ARCADE_ORDER.get(index).copied()
    }
}
