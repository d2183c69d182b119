//! Raid events - What the chat layer tells the players
//!
//! Zone numbers in events are 1-based, the way players count them.

use hitlist_domain::{RaidStep, Tactic, UserId};
use shared::Money;

#[derive(Debug, Clone, PartialEq)]
pub enum RaidEvent {
    RaidStarted {
        attacker: UserId,
        target: UserId,
        method: &'static str,
        zone_count: usize,
        team_size: u32,
    },
    TacticPrompt {
        zone: usize,
        retry: bool,
    },
    TacticChosen {
        zone: usize,
        tactic: Tactic,
    },
    ZoneCleared {
        zone: usize,
    },
    ZoneTaken {
        zone: usize,
        tactic: Tactic,
        guards_defeated: usize,
        losses: u32,
        team_alive: u32,
    },
    ZoneHeld {
        zone: usize,
        losses: u32,
        team_alive: u32,
    },
    TargetEliminated {
        target: UserId,
    },
    BountyPaid {
        killer: UserId,
        target: UserId,
        amount: u64,
    },
    MissionFailed {
        zone: usize,
        zone_taken: bool,
    },
    SettlementTrouble {
        step: &'static str,
    },
}

impl RaidEvent {
    /// Events for a non-settlement step of the machine
    pub(crate) fn from_step(step: &RaidStep) -> Vec<RaidEvent> {
        match step {
            RaidStep::Won { target } => vec![RaidEvent::TargetEliminated {
                target: target.clone(),
            }],
            RaidStep::ZoneCleared { zone } => vec![
                RaidEvent::ZoneCleared { zone: zone + 1 },
                RaidEvent::TacticPrompt {
                    zone: zone + 2,
                    retry: false,
                },
            ],
            RaidStep::ZoneTaken {
                zone,
                tactic,
                guards_defeated,
                losses,
                team_alive,
                ..
            } => vec![
                RaidEvent::ZoneTaken {
                    zone: zone + 1,
                    tactic: *tactic,
                    guards_defeated: *guards_defeated,
                    losses: *losses,
                    team_alive: *team_alive,
                },
                RaidEvent::TacticPrompt {
                    zone: zone + 2,
                    retry: false,
                },
            ],
            RaidStep::ZoneHeld {
                zone,
                losses,
                team_alive,
                ..
            } => vec![
                RaidEvent::ZoneHeld {
                    zone: zone + 1,
                    losses: *losses,
                    team_alive: *team_alive,
                },
                RaidEvent::TacticPrompt {
                    zone: zone + 1,
                    retry: true,
                },
            ],
            RaidStep::Failed {
                zone, zone_taken, ..
            } => vec![RaidEvent::MissionFailed {
                zone: zone + 1,
                zone_taken: *zone_taken,
            }],
        }
    }
}

impl std::fmt::Display for RaidEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RaidEvent::RaidStarted {
                attacker,
                target,
                method,
                zone_count,
                team_size,
            } => write!(
                f,
                "🚨 {} started a `{}` assassination on {} with {} operatives!\n🗺️ Target has `{}` defensive zones.",
                attacker, method, target, team_size, zone_count
            ),
            RaidEvent::TacticPrompt { zone, retry: false } => write!(
                f,
                "Choose your tactic for zone {}: `siper` or `charge`",
                zone
            ),
            RaidEvent::TacticPrompt { zone, retry: true } => write!(
                f,
                "🔁 Choose a new tactic to retry zone {}: `siper` or `charge`",
                zone
            ),
            RaidEvent::TacticChosen { zone, tactic } => write!(
                f,
                "⚔️ You chose **{}** tactic for zone {}. Battle starting...",
                tactic, zone
            ),
            RaidEvent::ZoneCleared { zone } => {
                write!(f, "✅ Zone {} is clear, moving to next zone...", zone)
            }
            RaidEvent::ZoneTaken {
                zone,
                tactic,
                guards_defeated,
                losses,
                team_alive,
            } => write!(
                f,
                "✅ Zone {}: You defeated all {} guards with **{}** tactic!\n⚠️ You lost {} teammates. {} remain alive.",
                zone, guards_defeated, tactic, losses, team_alive
            ),
            RaidEvent::ZoneHeld {
                zone,
                losses,
                team_alive,
            } => write!(
                f,
                "❌ Your attack failed in zone {}!\n💥 You lost {} teammates. {} remain alive.",
                zone, losses, team_alive
            ),
            RaidEvent::TargetEliminated { target } => {
                write!(f, "☠️ You eliminated your target {} successfully!", target)
            }
            RaidEvent::BountyPaid {
                killer,
                target,
                amount,
            } => write!(
                f,
                "💰 {} earned a **{}** bounty for eliminating {}!",
                killer,
                Money(*amount),
                target
            ),
            RaidEvent::MissionFailed {
                zone_taken: true, ..
            } => write!(
                f,
                "☠️ All your teammates died during the assault. Mission failed!"
            ),
            RaidEvent::MissionFailed {
                zone,
                zone_taken: false,
            } => write!(
                f,
                "❌ Your tactic failed and you lost your entire team in zone {}. Mission failed!",
                zone
            ),
            RaidEvent::SettlementTrouble { step } => write!(
                f,
                "⚠️ Part of the aftermath ({}) could not be recorded; an admin has been notified.",
                step
            ),
        }
    }
}

/// Where the raid stands after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaidStatus {
    /// Waiting for a tactic for `zone` (1-based)
    InProgress { zone: usize, team_alive: u32 },
    Succeeded,
    Failed,
}

/// Everything one raid command produced
#[derive(Debug, Clone, PartialEq)]
pub struct RaidReport {
    pub events: Vec<RaidEvent>,
    pub status: RaidStatus,
}

impl RaidReport {
    pub fn is_terminal(&self) -> bool {
        !matches!(self.status, RaidStatus::InProgress { .. })
    }

    /// Narrative for the chat channel, one event per line
    pub fn narrative(&self) -> String {
        self.events
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
