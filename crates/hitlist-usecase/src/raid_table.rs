//! Raid Table - The live raids, keyed by attacker
//!
//! Held in memory only. A restart forgets every raid in flight and the
//! hire cost is not refunded.
//!
//! A slot is reserved before the hire cost is charged, so two launches
//! racing for the same attacker cannot both pay.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use hitlist_domain::{RaidAttempt, RaidPhase, Tactic, UserId};

use crate::error::ValidationError;

#[derive(Debug, Clone)]
enum Slot {
    /// Launch in progress: cost being charged, defense being read
    Reserved,
    Live(RaidAttempt),
}

#[derive(Debug, Default)]
pub struct RaidTable {
    slots: Mutex<HashMap<UserId, Slot>>,
}

impl RaidTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<UserId, Slot>> {
        // A panic mid-update cannot leave a slot half-written
        self.slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Claim the attacker's slot for a launch
    pub fn reserve(&self, attacker: &UserId) -> Result<(), ValidationError> {
        let mut slots = self.slots();
        if slots.contains_key(attacker) {
            return Err(ValidationError::RaidAlreadyActive);
        }
        slots.insert(attacker.clone(), Slot::Reserved);
        Ok(())
    }

    /// Put a launched raid (or one waiting for its next tactic) in place
    pub fn store(&self, raid: RaidAttempt) {
        self.slots()
            .insert(raid.attacker().clone(), Slot::Live(raid));
    }

    /// Drop the attacker's slot, live or reserved
    pub fn release(&self, attacker: &UserId) -> bool {
        self.slots().remove(attacker).is_some()
    }

    /// Lock in a tactic and hand out a copy to resolve
    ///
    /// The stored raid moves to `Resolving`, so a second tactic for the
    /// same attacker is rejected until [`store`](Self::store) or
    /// [`release`](Self::release) is called.
    pub fn begin_resolution(
        &self,
        attacker: &UserId,
        tactic: Tactic,
    ) -> Result<RaidAttempt, ValidationError> {
        let mut slots = self.slots();
        match slots.get_mut(attacker) {
            Some(Slot::Live(raid)) => {
                raid.choose_tactic(tactic)
                    .map_err(|_| ValidationError::WrongPhase)?;
                Ok(raid.clone())
            }
            Some(Slot::Reserved) | None => Err(ValidationError::NoActiveRaid),
        }
    }

    /// Same checks as [`begin_resolution`](Self::begin_resolution), without the transition
    pub fn check_awaiting_tactic(&self, attacker: &UserId) -> Result<(), ValidationError> {
        match self.slots().get(attacker) {
            Some(Slot::Live(raid)) if raid.phase() == RaidPhase::AwaitingTactic => Ok(()),
            Some(Slot::Live(_)) => Err(ValidationError::WrongPhase),
            Some(Slot::Reserved) | None => Err(ValidationError::NoActiveRaid),
        }
    }

    /// Snapshot of the attacker's live raid
    pub fn get(&self, attacker: &UserId) -> Option<RaidAttempt> {
        match self.slots().get(attacker) {
            Some(Slot::Live(raid)) => Some(raid.clone()),
            _ => None,
        }
    }

    /// Live raids (reservations excluded)
    pub fn live_count(&self) -> usize {
        self.slots()
            .values()
            .filter(|slot| matches!(slot, Slot::Live(_)))
            .count()
    }
}
