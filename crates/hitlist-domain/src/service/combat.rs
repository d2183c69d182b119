//! Combat - Odds and casualties for a single zone fight
//!
//! Everything here is a pure function of team size, the zone's guards and
//! the chosen tactic. The one random draw is passed in by the caller.
//!
//! ```text
//! power_ratio    = team_alive / (guard_strength + 1)
//! success_chance = max(base × min(power_ratio, 2) − 0.05 × snipers, 0.1)
//! loss_rate      = base_loss × (1 − 0.1 × shielders) / max(power_ratio, 0.5)
//! ```

use crate::model::guard::GuardType;
use crate::model::tactic::Tactic;

/// Upper bound on how much numbers alone can help
pub const POWER_RATIO_CAP: f64 = 2.0;

/// Lower bound used when scaling casualties by power ratio
pub const POWER_RATIO_LOSS_FLOOR: f64 = 0.5;

/// No zone is ever hopeless
pub const MIN_SUCCESS_CHANCE: f64 = 0.1;

pub const SNIPER_PENALTY: f64 = 0.05;

pub const SHIELDER_REDUCTION: f64 = 0.1;

fn base_success(tactic: Tactic) -> f64 {
    match tactic {
        Tactic::Aggressive => 0.5,
        Tactic::Defensive => 0.3,
    }
}

fn base_loss_on_win(tactic: Tactic) -> f64 {
    match tactic {
        Tactic::Aggressive => 0.35,
        Tactic::Defensive => 0.10,
    }
}

fn base_loss_on_fail(tactic: Tactic) -> f64 {
    match tactic {
        Tactic::Aggressive => 0.40,
        Tactic::Defensive => 0.20,
    }
}

/// Outcome of one zone fight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneClash {
    /// Zone taken; `losses` teammates died doing it
    Won { losses: u32 },
    /// Zone held; `losses` teammates died trying
    Lost { losses: u32 },
}

/// Odds for one zone fight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneOdds {
    pub guard_strength: f64,
    pub power_ratio: f64,
    pub success_chance: f64,
    pub loss_rate_on_win: f64,
    pub loss_rate_on_fail: f64,
    pub snipers: usize,
    pub shielders: usize,
}

impl ZoneOdds {
    pub fn compute(team_alive: u32, guards: &[GuardType], tactic: Tactic) -> Self {
        let guard_strength: f64 = guards.iter().map(|g| g.strength()).sum();
        let snipers = guards.iter().filter(|g| **g == GuardType::Sniper).count();
        let shielders = guards.iter().filter(|g| **g == GuardType::Shielder).count();

        // +1 keeps an unguarded zone from dividing by zero
        let power_ratio = f64::from(team_alive) / (guard_strength + 1.0);

        let success_chance = (base_success(tactic) * power_ratio.min(POWER_RATIO_CAP)
            - SNIPER_PENALTY * snipers as f64)
            .max(MIN_SUCCESS_CHANCE);

        // At most 5 guards are visible per zone, so this stays positive
        let shielder_factor = 1.0 - SHIELDER_REDUCTION * shielders as f64;
        let loss_scale = shielder_factor / power_ratio.max(POWER_RATIO_LOSS_FLOOR);

        Self {
            guard_strength,
            power_ratio,
            success_chance,
            loss_rate_on_win: base_loss_on_win(tactic) * loss_scale,
            loss_rate_on_fail: base_loss_on_fail(tactic) * loss_scale,
            snipers,
            shielders,
        }
    }

    /// Settle the fight with one uniform draw
    ///
    /// The zone falls iff `roll <= success_chance`. At least one teammate
    /// dies either way, and never more than are alive.
    pub fn clash(&self, team_alive: u32, roll: f64) -> ZoneClash {
        if roll <= self.success_chance {
            ZoneClash::Won {
                losses: casualties(team_alive, self.loss_rate_on_win),
            }
        } else {
            ZoneClash::Lost {
                losses: casualties(team_alive, self.loss_rate_on_fail),
            }
        }
    }
}

fn casualties(team_alive: u32, rate: f64) -> u32 {
    let scaled = (f64::from(team_alive) * rate).floor() as u32;
    scaled.max(1).min(team_alive)
}
