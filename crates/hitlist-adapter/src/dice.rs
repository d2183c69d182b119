//! Dice - Random sources behind the domain's RollSource port

use hitlist_domain::RollSource;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Reproducible dice: the same seed replays the same raid
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: ChaCha8Rng,
}

impl SeededDice {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RollSource for SeededDice {
    fn roll(&mut self) -> f64 {
        self.rng.gen()
    }

    fn pick_zone(&mut self, zone_count: u32) -> u32 {
        self.rng.gen_range(1..=zone_count.max(1))
    }
}

/// Dice seeded from the operating system
#[derive(Debug, Clone)]
pub struct EntropyDice {
    rng: ChaCha8Rng,
}

impl EntropyDice {
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl Default for EntropyDice {
    fn default() -> Self {
        Self::new()
    }
}

impl RollSource for EntropyDice {
    fn roll(&mut self) -> f64 {
        self.rng.gen()
    }

    fn pick_zone(&mut self, zone_count: u32) -> u32 {
        self.rng.gen_range(1..=zone_count.max(1))
    }
}
