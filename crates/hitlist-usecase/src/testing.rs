//! In-memory economy for use-case tests
//!
//! One mutex over everything, plus a journal of the money-moving calls so
//! tests can assert on ordering, and switches to make calls fail.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use hitlist_domain::model::zone::DEFAULT_ZONE_COUNT;
use hitlist_domain::{
    AssassinationStats, BountyLedger, DebitOutcome, Guard, GuardRegistry, Ledger,
    RepositoryError, StatsRepository, UserId, UserPurger,
};

use crate::ports::EconomyPorts;

#[derive(Default)]
struct State {
    balances: HashMap<UserId, u64>,
    guards: HashMap<UserId, Vec<Guard>>,
    zone_counts: HashMap<UserId, u32>,
    bounties: HashMap<UserId, u64>,
    stats: HashMap<UserId, AssassinationStats>,
    journal: Vec<String>,
    credit_error: Option<RepositoryError>,
    wipe_error: Option<RepositoryError>,
    registry_error: Option<RepositoryError>,
}

#[derive(Default)]
pub struct FakeEconomy {
    state: Mutex<State>,
}

impl FakeEconomy {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn ports(self: &Arc<Self>) -> EconomyPorts {
        EconomyPorts::from_store(self.clone())
    }

    fn with<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }

    pub fn set_balance(&self, user: &UserId, amount: u64) {
        self.with(|s| s.balances.insert(user.clone(), amount));
    }

    /// Any zone count, including below the default
    pub fn set_zone_count(&self, user: &UserId, count: u32) {
        self.with(|s| s.zone_counts.insert(user.clone(), count));
    }

    pub fn bounty_of(&self, user: &UserId) -> Option<u64> {
        self.with(|s| s.bounties.get(user).copied())
    }

    pub fn stats_of(&self, user: &UserId) -> AssassinationStats {
        self.with(|s| s.stats.get(user).copied().unwrap_or_default())
    }

    pub fn journal(&self) -> Vec<String> {
        self.with(|s| s.journal.clone())
    }

    pub fn fail_credits(&self, error: RepositoryError) {
        self.with(|s| s.credit_error = Some(error));
    }

    pub fn fail_wipes(&self, error: RepositoryError) {
        self.with(|s| s.wipe_error = Some(error));
    }

    pub fn fail_registry(&self, error: RepositoryError) {
        self.with(|s| s.registry_error = Some(error));
    }
}

impl Ledger for FakeEconomy {
    fn balance(&self, user: &UserId) -> Result<u64, RepositoryError> {
        Ok(self.with(|s| s.balances.get(user).copied().unwrap_or(0)))
    }

    fn debit(&self, user: &UserId, amount: u64) -> Result<DebitOutcome, RepositoryError> {
        Ok(self.with(|s| {
            let balance = s.balances.entry(user.clone()).or_insert(0);
            if *balance < amount {
                return DebitOutcome::Insufficient {
                    available: *balance,
                };
            }
            *balance -= amount;
            s.journal.push(format!("debit {} {}", user, amount));
            DebitOutcome::Debited
        }))
    }

    fn credit(&self, user: &UserId, amount: u64) -> Result<(), RepositoryError> {
        self.with(|s| {
            if let Some(error) = s.credit_error.clone() {
                return Err(error);
            }
            *s.balances.entry(user.clone()).or_insert(0) += amount;
            s.journal.push(format!("credit {} {}", user, amount));
            Ok(())
        })
    }

    fn transfer(
        &self,
        from: &UserId,
        to: &UserId,
        amount: u64,
    ) -> Result<DebitOutcome, RepositoryError> {
        let outcome = self.debit(from, amount)?;
        if outcome.is_debited() {
            self.credit(to, amount)?;
        }
        Ok(outcome)
    }
}

impl GuardRegistry for FakeEconomy {
    fn zone_count(&self, user: &UserId) -> Result<u32, RepositoryError> {
        self.with(|s| match &s.registry_error {
            Some(error) => Err(error.clone()),
            None => Ok(s.zone_counts.get(user).copied().unwrap_or(DEFAULT_ZONE_COUNT)),
        })
    }

    fn guards(&self, user: &UserId) -> Result<Vec<Guard>, RepositoryError> {
        self.with(|s| match &s.registry_error {
            Some(error) => Err(error.clone()),
            None => Ok(s.guards.get(user).cloned().unwrap_or_default()),
        })
    }

    fn add_guards(
        &self,
        user: &UserId,
        guards: &[Guard],
        capacity: usize,
    ) -> Result<usize, RepositoryError> {
        Ok(self.with(|s| {
            let owned = s.guards.entry(user.clone()).or_default();
            let room = capacity.saturating_sub(owned.len());
            let added = guards.len().min(room);
            owned.extend_from_slice(&guards[..added]);
            added
        }))
    }

    fn upgrade_zone_count(&self, user: &UserId, count: u32) -> Result<bool, RepositoryError> {
        self.with(|s| {
            if let Some(error) = &s.registry_error {
                return Err(error.clone());
            }
            let owned = s.zone_counts.entry(user.clone()).or_insert(DEFAULT_ZONE_COUNT);
            if *owned >= count {
                return Ok(false);
            }
            *owned = count;
            Ok(true)
        })
    }
}

impl BountyLedger for FakeEconomy {
    fn take_bounty(&self, target: &UserId) -> Result<Option<u64>, RepositoryError> {
        Ok(self.with(|s| {
            let taken = s.bounties.remove(target);
            if taken.is_some() {
                s.journal.push(format!("take_bounty {}", target));
            }
            taken
        }))
    }

    fn add_bounty(&self, target: &UserId, amount: u64) -> Result<u64, RepositoryError> {
        Ok(self.with(|s| {
            let total = s.bounties.entry(target.clone()).or_insert(0);
            *total += amount;
            *total
        }))
    }

    fn list(&self) -> Result<Vec<(UserId, u64)>, RepositoryError> {
        Ok(self.with(|s| {
            s.bounties
                .iter()
                .map(|(user, amount)| (user.clone(), *amount))
                .collect()
        }))
    }
}

impl StatsRepository for FakeEconomy {
    fn increment_attempt(&self, user: &UserId) -> Result<(), RepositoryError> {
        self.with(|s| s.stats.entry(user.clone()).or_default().attempts += 1);
        Ok(())
    }

    fn increment_success(&self, user: &UserId) -> Result<(), RepositoryError> {
        self.with(|s| s.stats.entry(user.clone()).or_default().success += 1);
        Ok(())
    }

    fn increment_fail(&self, user: &UserId) -> Result<(), RepositoryError> {
        self.with(|s| s.stats.entry(user.clone()).or_default().fails += 1);
        Ok(())
    }

    fn get(&self, user: &UserId) -> Result<AssassinationStats, RepositoryError> {
        Ok(self.stats_of(user))
    }
}

impl UserPurger for FakeEconomy {
    fn wipe(&self, user: &UserId) -> Result<(), RepositoryError> {
        self.with(|s| {
            if let Some(error) = s.wipe_error.clone() {
                return Err(error);
            }
            s.balances.remove(user);
            s.guards.remove(user);
            s.zone_counts.remove(user);
            s.journal.push(format!("wipe {}", user));
            Ok(())
        })
    }
}
