//! Raid Service - Launching raids and fighting them zone by zone
//!
//! The service owns the live [`RaidTable`] and the combat dice. Each
//! public method is one player command; it either fails without touching
//! anything, or runs to completion and returns the narrative.
//!
//! Per attacker, commands are serialized by the raid phase: while one
//! tactic is being resolved the raid sits in `Resolving` and any other
//! tactic for it is turned away.

use std::sync::{Mutex, MutexGuard};

use hitlist_domain::{
    AssassinationStats, DebitOutcome, MethodTier, RaidAttempt, RaidMachine, RaidStep,
    RollSource, Tactic, UserId, ZoneDefense,
};
use tracing::{debug, error, info, warn};

use crate::error::{GameError, Result, ValidationError};
use crate::events::{RaidEvent, RaidReport, RaidStatus};
use crate::ports::EconomyPorts;
use crate::raid_table::RaidTable;
use crate::settlement::{Settlement, SettlementReport};

pub struct RaidService {
    ports: EconomyPorts,
    table: RaidTable,
    machine: RaidMachine,
    settlement: Settlement,
    dice: Mutex<Box<dyn RollSource>>,
}

impl RaidService {
    pub fn new(ports: EconomyPorts, dice: Box<dyn RollSource>) -> Self {
        Self {
            settlement: Settlement::new(&ports),
            ports,
            table: RaidTable::new(),
            machine: RaidMachine::new(),
            dice: Mutex::new(dice),
        }
    }

    fn dice(&self) -> MutexGuard<'_, Box<dyn RollSource>> {
        self.dice
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // ========== Initiation ==========

    /// Hire a team and start a raid on `target`
    ///
    /// The tier cost is charged once, before the raid exists. Any
    /// rejection leaves the ledger and the raid table untouched.
    pub fn initiate(&self, attacker: &UserId, target: &UserId, method: &str) -> Result<RaidReport> {
        if attacker == target {
            return Err(reject(attacker, ValidationError::SelfTarget));
        }

        let tier = MethodTier::lookup(method).ok_or_else(|| {
            reject(
                attacker,
                ValidationError::UnknownMethod {
                    method: method.to_string(),
                    available: MethodTier::names(),
                },
            )
        })?;

        self.table
            .reserve(attacker)
            .map_err(|e| reject(attacker, e))?;

        match self.launch(attacker, target, tier) {
            Ok(report) => Ok(report),
            Err(e) => {
                self.table.release(attacker);
                Err(e)
            }
        }
    }

    fn launch(&self, attacker: &UserId, target: &UserId, tier: MethodTier) -> Result<RaidReport> {
        if let DebitOutcome::Insufficient { available } =
            self.ports.ledger.debit(attacker, tier.cost())?
        {
            debug!(attacker = %attacker, cost = tier.cost(), available, "raid rejected: insufficient funds");
            return Err(GameError::insufficient(tier.cost(), available));
        }

        let zones = match self.snapshot_defense(target) {
            Ok(zones) => zones,
            Err(e) => {
                self.refund(attacker, tier.cost());
                return Err(e);
            }
        };

        let raid = RaidAttempt::new(attacker.clone(), target.clone(), tier, zones);

        if let Err(e) = self.ports.stats.increment_attempt(attacker) {
            warn!(attacker = %attacker, error = %e, "could not record raid attempt");
        }

        info!(
            attacker = %attacker,
            victim = %target,
            method = tier.name(),
            zones = raid.zones().len(),
            guards = raid.zones().total_guards(),
            "raid started"
        );

        let report = RaidReport {
            events: vec![
                RaidEvent::RaidStarted {
                    attacker: attacker.clone(),
                    target: target.clone(),
                    method: tier.name(),
                    zone_count: raid.zones().len(),
                    team_size: raid.team_size(),
                },
                RaidEvent::TacticPrompt {
                    zone: 1,
                    retry: false,
                },
            ],
            status: RaidStatus::InProgress {
                zone: 1,
                team_alive: raid.team_alive(),
            },
        };

        self.table.store(raid);
        Ok(report)
    }

    fn snapshot_defense(&self, target: &UserId) -> Result<ZoneDefense> {
        let zone_count = self.ports.registry.zone_count(target)?;
        let guards = self.ports.registry.guards(target)?;
        let mut dice = self.dice();
        Ok(ZoneDefense::snapshot(zone_count, &guards, &mut **dice))
    }

    fn refund(&self, attacker: &UserId, amount: u64) {
        if let Err(e) = self.ports.ledger.credit(attacker, amount) {
            error!(attacker = %attacker, amount, error = %e, "refund of raid cost failed");
        }
    }

    // ========== Tactics ==========

    /// Parse a tactic word and fight the current zone with it
    ///
    /// Checks the raid before the word, so a player without a raid hears
    /// about that first.
    pub fn choose_tactic_str(&self, attacker: &UserId, input: &str) -> Result<RaidReport> {
        self.table
            .check_awaiting_tactic(attacker)
            .map_err(|e| reject(attacker, e))?;

        let tactic = Tactic::parse(input)
            .ok_or_else(|| reject(attacker, ValidationError::InvalidTactic(input.trim().to_string())))?;

        self.choose_tactic(attacker, tactic)
    }

    /// Lock in a tactic and resolve the current zone
    pub fn choose_tactic(&self, attacker: &UserId, tactic: Tactic) -> Result<RaidReport> {
        let mut raid = self
            .table
            .begin_resolution(attacker, tactic)
            .map_err(|e| reject(attacker, e))?;

        let zone = raid.current_zone() + 1;
        let step = {
            let mut dice = self.dice();
            self.machine.resolve(&mut raid, &mut **dice)
        };

        let step = match step {
            Ok(step) => step,
            Err(e) => {
                // Unreachable while the table gates phases; never leave the slot stuck
                error!(attacker = %attacker, error = %e, "raid resolution failed; releasing slot");
                self.table.release(attacker);
                return Err(e.into());
            }
        };

        let mut events = vec![RaidEvent::TacticChosen { zone, tactic }];
        events.extend(RaidEvent::from_step(&step));

        let status = match &step {
            RaidStep::Won { target } => {
                info!(attacker = %attacker, victim = %target, "raid succeeded");
                let settled = self.settlement.settle_success(attacker, target);
                self.table.release(attacker);
                append_settlement(&mut events, attacker, target, &settled);
                RaidStatus::Succeeded
            }
            RaidStep::Failed { zone, .. } => {
                info!(attacker = %attacker, victim = %raid.target(), zone = zone + 1, "raid failed");
                let settled = self.settlement.settle_failure(attacker);
                self.table.release(attacker);
                append_settlement(&mut events, attacker, raid.target(), &settled);
                RaidStatus::Failed
            }
            _ => {
                debug!(
                    attacker = %attacker,
                    zone = raid.current_zone() + 1,
                    team_alive = raid.team_alive(),
                    "raid awaiting tactic"
                );
                let status = RaidStatus::InProgress {
                    zone: raid.current_zone() + 1,
                    team_alive: raid.team_alive(),
                };
                self.table.store(raid);
                status
            }
        };

        Ok(RaidReport { events, status })
    }

    /// Free-form chat from a player
    ///
    /// While the player's raid waits for a tactic, whatever they type is
    /// taken as the tactic. Otherwise the message is not for us.
    pub fn handle_message(&self, attacker: &UserId, text: &str) -> Option<Result<RaidReport>> {
        self.table.check_awaiting_tactic(attacker).ok()?;
        Some(self.choose_tactic_str(attacker, text))
    }

    // ========== Queries ==========

    pub fn active_raid(&self, attacker: &UserId) -> Option<RaidAttempt> {
        self.table.get(attacker)
    }

    pub fn live_raids(&self) -> usize {
        self.table.live_count()
    }

    pub fn assassination_stats(&self, user: &UserId) -> Result<AssassinationStats> {
        Ok(self.ports.stats.get(user)?)
    }
}

fn reject(attacker: &UserId, error: ValidationError) -> GameError {
    debug!(attacker = %attacker, reason = %error, "raid command rejected");
    GameError::Validation(error)
}

fn append_settlement(
    events: &mut Vec<RaidEvent>,
    attacker: &UserId,
    target: &UserId,
    settled: &SettlementReport,
) {
    if let Some(amount) = settled.bounty_paid {
        events.push(RaidEvent::BountyPaid {
            killer: attacker.clone(),
            target: target.clone(),
            amount,
        });
    }
    for issue in &settled.issues {
        events.push(RaidEvent::SettlementTrouble { step: issue.step });
    }
}
