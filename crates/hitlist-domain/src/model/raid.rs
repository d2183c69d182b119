//! RaidAttempt - One assassination attempt in flight
//!
//! A RaidAttempt is an Entity keyed by its attacker: a player runs at most
//! one raid at a time, and the raid keeps its identity while the team
//! shrinks and the zone pointer moves forward.

use super::method::MethodTier;
use super::tactic::Tactic;
use super::user::UserId;
use super::zone::ZoneDefense;

/// Where the raid is in its tactic/resolve cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RaidPhase {
    /// Waiting for the attacker to pick a tactic for the current zone
    AwaitingTactic,
    /// A tactic has been locked in and the zone is being fought
    Resolving,
}

impl core::fmt::Display for RaidPhase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RaidPhase::AwaitingTactic => write!(f, "awaiting tactic"),
            RaidPhase::Resolving => write!(f, "resolving"),
        }
    }
}

/// RaidAttempt - The central entity of the raid engine
#[derive(Debug, Clone, PartialEq)]
pub struct RaidAttempt {
    attacker: UserId,
    target: UserId,
    method: MethodTier,
    team_alive: u32,
    zones: ZoneDefense,
    /// 0-based; equal to `zones.len()` once every zone has fallen
    current_zone: usize,
    phase: RaidPhase,
    tactic: Option<Tactic>,
}

impl RaidAttempt {
    /// Create a raid with a full team, waiting for the first tactic
    pub fn new(attacker: UserId, target: UserId, method: MethodTier, zones: ZoneDefense) -> Self {
        Self {
            attacker,
            target,
            method,
            team_alive: method.team_size(),
            zones,
            current_zone: 0,
            phase: RaidPhase::AwaitingTactic,
            tactic: None,
        }
    }

    // ========== Getters ==========

    pub fn attacker(&self) -> &UserId {
        &self.attacker
    }

    pub fn target(&self) -> &UserId {
        &self.target
    }

    pub fn method(&self) -> MethodTier {
        self.method
    }

    pub fn team_size(&self) -> u32 {
        self.method.team_size()
    }

    pub fn team_alive(&self) -> u32 {
        self.team_alive
    }

    pub fn zones(&self) -> &ZoneDefense {
        &self.zones
    }

    pub fn current_zone(&self) -> usize {
        self.current_zone
    }

    pub fn phase(&self) -> RaidPhase {
        self.phase
    }

    pub fn tactic(&self) -> Option<Tactic> {
        self.tactic
    }

    /// Every zone has been taken; the next resolution is the kill
    pub fn all_zones_cleared(&self) -> bool {
        self.current_zone >= self.zones.len()
    }

    // ========== State Transitions ==========

    /// Lock in a tactic for the current zone
    pub fn choose_tactic(&mut self, tactic: Tactic) -> Result<(), RaidError> {
        match self.phase {
            RaidPhase::AwaitingTactic => {
                self.tactic = Some(tactic);
                self.phase = RaidPhase::Resolving;
                Ok(())
            }
            actual => Err(RaidError::WrongPhase {
                expected: RaidPhase::AwaitingTactic,
                actual,
            }),
        }
    }

    /// Zone taken or auto-cleared: move on and wait for the next tactic
    pub(crate) fn advance(&mut self) {
        self.current_zone += 1;
        self.phase = RaidPhase::AwaitingTactic;
    }

    /// Zone held: stay put and wait for another tactic
    pub(crate) fn retry(&mut self) {
        self.phase = RaidPhase::AwaitingTactic;
    }

    /// Remove fallen teammates, returning how many remain
    pub(crate) fn bury(&mut self, losses: u32) -> u32 {
        self.team_alive = self.team_alive.saturating_sub(losses);
        self.team_alive
    }

    pub(crate) fn clear_current_zone(&mut self) {
        self.zones.clear(self.current_zone);
    }

    pub(crate) fn ensure_resolving(&self) -> Result<Tactic, RaidError> {
        match (self.phase, self.tactic) {
            (RaidPhase::Resolving, Some(tactic)) => Ok(tactic),
            (RaidPhase::Resolving, None) => Err(RaidError::MissingTactic),
            (actual, _) => Err(RaidError::WrongPhase {
                expected: RaidPhase::Resolving,
                actual,
            }),
        }
    }
}

/// Errors that can occur during RaidAttempt transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaidError {
    WrongPhase {
        expected: RaidPhase,
        actual: RaidPhase,
    },
    MissingTactic,
}

impl core::fmt::Display for RaidError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RaidError::WrongPhase { expected, actual } => {
                write!(f, "raid is {} (expected {})", actual, expected)
            }
            RaidError::MissingTactic => write!(f, "no tactic chosen for this zone"),
        }
    }
}

impl std::error::Error for RaidError {}
