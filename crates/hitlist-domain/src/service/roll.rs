//! RollSource - Where combat randomness comes from
//!
//! Fairness is not a goal here; a source only needs to be uniform enough
//! for a game. Production code plugs in a seeded RNG from the adapter
//! crate, tests plug in [`FixedRolls`].

/// A stream of random draws
pub trait RollSource: Send {
    /// Uniform draw in `[0, 1)`
    fn roll(&mut self) -> f64;

    /// Uniform zone number in `1..=zone_count`
    ///
    /// Callers never pass 0.
    fn pick_zone(&mut self, zone_count: u32) -> u32;
}

/// Replays a fixed list of draws
///
/// Once the list runs out the last draw repeats. Zone picks walk
/// round-robin through the zones starting at 1.
#[derive(Debug, Clone)]
pub struct FixedRolls {
    rolls: Vec<f64>,
    next: usize,
    next_zone: u32,
}

impl FixedRolls {
    pub fn new(rolls: impl Into<Vec<f64>>) -> Self {
        Self {
            rolls: rolls.into(),
            next: 0,
            next_zone: 0,
        }
    }

    /// Every draw returns `value`
    pub fn always(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// How many draws have been consumed so far
    pub fn consumed(&self) -> usize {
        self.next
    }
}

impl RollSource for FixedRolls {
    fn roll(&mut self) -> f64 {
        let value = match self.rolls.get(self.next) {
            Some(value) => *value,
            None => self.rolls.last().copied().unwrap_or(0.0),
        };
        self.next += 1;
        value
    }

    fn pick_zone(&mut self, zone_count: u32) -> u32 {
        let zone = self.next_zone % zone_count.max(1) + 1;
        self.next_zone += 1;
        zone
    }
}
