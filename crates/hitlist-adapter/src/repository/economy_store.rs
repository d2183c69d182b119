//! Economy Store - Every economy port over a set of JSON documents
//!
//! One [`Document`] per file, each with its own lock. A call only ever
//! holds one document lock at a time, so there is no lock ordering to get
//! wrong; transfers stay atomic because both balances live in `bank.json`.

use std::path::Path;

use hitlist_domain::model::zone::DEFAULT_ZONE_COUNT;
use hitlist_domain::{
    AssassinationStats, BountyLedger, DebitOutcome, Guard, GuardRegistry, Ledger,
    RepositoryError, StatsRepository, UserId, UserPurger,
};
use serde_json::Value;
use tracing::{info, warn};

use super::document::Document;
use super::records::{self, AccountRecord, ByUser, GuardRecord, StatsRecord};

#[derive(Debug)]
pub struct EconomyStore {
    bank: Document<ByUser<AccountRecord>>,
    guards: Document<ByUser<Vec<GuardRecord>>>,
    zone_slots: Document<ByUser<u32>>,
    bounties: Document<ByUser<u64>>,
    stats: Document<ByUser<StatsRecord>>,
    companies: Document<ByUser<Value>>,
    inventory: Document<ByUser<Value>>,
    user_stocks: Document<ByUser<Value>>,
}

impl EconomyStore {
    /// Store that lives and dies with the process
    pub fn in_memory() -> Self {
        Self {
            bank: Document::in_memory(records::BANK),
            guards: Document::in_memory(records::GUARDS),
            zone_slots: Document::in_memory(records::ZONE_SLOTS),
            bounties: Document::in_memory(records::BOUNTIES),
            stats: Document::in_memory(records::STATS),
            companies: Document::in_memory(records::COMPANIES),
            inventory: Document::in_memory(records::INVENTORY),
            user_stocks: Document::in_memory(records::USER_STOCKS),
        }
    }

    /// Load every document from `dir`, creating the directory if needed
    pub fn open(dir: &Path) -> Result<Self, RepositoryError> {
        std::fs::create_dir_all(dir).map_err(|e| RepositoryError::PersistenceError {
            message: format!("Failed to create {}: {}", dir.display(), e),
        })?;

        let store = Self {
            bank: Document::open(dir, records::BANK)?,
            guards: Document::open(dir, records::GUARDS)?,
            zone_slots: Document::open(dir, records::ZONE_SLOTS)?,
            bounties: Document::open(dir, records::BOUNTIES)?,
            stats: Document::open(dir, records::STATS)?,
            companies: Document::open(dir, records::COMPANIES)?,
            inventory: Document::open(dir, records::INVENTORY)?,
            user_stocks: Document::open(dir, records::USER_STOCKS)?,
        };
        info!(dir = %dir.display(), "economy store opened");
        Ok(store)
    }

    fn bump_stat(
        &self,
        user: &UserId,
        field: impl FnOnce(&mut StatsRecord) -> &mut u64,
    ) -> Result<(), RepositoryError> {
        self.stats.update(|stats| {
            let counter = field(stats.entry(user.as_str().to_string()).or_default());
            *counter = counter.saturating_add(1);
        })
    }
}

fn remove_user<T>(doc: &Document<ByUser<T>>, user: &UserId) -> Result<(), RepositoryError>
where
    T: serde::Serialize + serde::de::DeserializeOwned + Clone + PartialEq,
{
    doc.update(|by_user| {
        by_user.remove(user.as_str());
    })
}

impl Ledger for EconomyStore {
    fn balance(&self, user: &UserId) -> Result<u64, RepositoryError> {
        self.bank.read(|bank| {
            bank.get(user.as_str())
                .map(|account| account.bank_points)
                .unwrap_or(0)
        })
    }

    fn debit(&self, user: &UserId, amount: u64) -> Result<DebitOutcome, RepositoryError> {
        self.bank.update(|bank| {
            let available = bank
                .get(user.as_str())
                .map(|account| account.bank_points)
                .unwrap_or(0);
            if available < amount {
                return DebitOutcome::Insufficient { available };
            }
            if let Some(account) = bank.get_mut(user.as_str()) {
                account.bank_points -= amount;
            }
            DebitOutcome::Debited
        })
    }

    fn credit(&self, user: &UserId, amount: u64) -> Result<(), RepositoryError> {
        self.bank.update(|bank| {
            let account = bank.entry(user.as_str().to_string()).or_default();
            account.bank_points = account.bank_points.saturating_add(amount);
        })
    }

    fn transfer(
        &self,
        from: &UserId,
        to: &UserId,
        amount: u64,
    ) -> Result<DebitOutcome, RepositoryError> {
        self.bank.update(|bank| {
            let available = bank
                .get(from.as_str())
                .map(|account| account.bank_points)
                .unwrap_or(0);
            if available < amount {
                return DebitOutcome::Insufficient { available };
            }
            if let Some(account) = bank.get_mut(from.as_str()) {
                account.bank_points -= amount;
            }
            let payee = bank.entry(to.as_str().to_string()).or_default();
            payee.bank_points = payee.bank_points.saturating_add(amount);
            DebitOutcome::Debited
        })
    }
}

impl GuardRegistry for EconomyStore {
    fn zone_count(&self, user: &UserId) -> Result<u32, RepositoryError> {
        self.zone_slots.read(|slots| {
            slots
                .get(user.as_str())
                .copied()
                .unwrap_or(DEFAULT_ZONE_COUNT)
        })
    }

    fn guards(&self, user: &UserId) -> Result<Vec<Guard>, RepositoryError> {
        self.guards.read(|guards| {
            guards
                .get(user.as_str())
                .map(|owned| owned.iter().map(Guard::from).collect())
                .unwrap_or_default()
        })
    }

    fn add_guards(
        &self,
        user: &UserId,
        guards: &[Guard],
        capacity: usize,
    ) -> Result<usize, RepositoryError> {
        self.guards.update(|all| {
            let owned = all.entry(user.as_str().to_string()).or_default();
            let added = guards.len().min(capacity.saturating_sub(owned.len()));
            owned.extend(guards[..added].iter().map(GuardRecord::from));
            added
        })
    }

    fn upgrade_zone_count(&self, user: &UserId, count: u32) -> Result<bool, RepositoryError> {
        self.zone_slots.update(|slots| {
            let owned = slots
                .get(user.as_str())
                .copied()
                .unwrap_or(DEFAULT_ZONE_COUNT);
            if owned >= count {
                return false;
            }
            slots.insert(user.as_str().to_string(), count);
            true
        })
    }
}

impl BountyLedger for EconomyStore {
    fn take_bounty(&self, target: &UserId) -> Result<Option<u64>, RepositoryError> {
        self.bounties.update(|bounties| bounties.remove(target.as_str()))
    }

    fn add_bounty(&self, target: &UserId, amount: u64) -> Result<u64, RepositoryError> {
        self.bounties.update(|bounties| {
            let total = bounties.entry(target.as_str().to_string()).or_insert(0);
            *total = total.saturating_add(amount);
            *total
        })
    }

    fn list(&self) -> Result<Vec<(UserId, u64)>, RepositoryError> {
        self.bounties.read(|bounties| {
            bounties
                .iter()
                .map(|(user, amount)| (UserId::new(user.as_str()), *amount))
                .collect()
        })
    }
}

impl StatsRepository for EconomyStore {
    fn increment_attempt(&self, user: &UserId) -> Result<(), RepositoryError> {
        self.bump_stat(user, |s| &mut s.attempts)
    }

    fn increment_success(&self, user: &UserId) -> Result<(), RepositoryError> {
        self.bump_stat(user, |s| &mut s.success)
    }

    fn increment_fail(&self, user: &UserId) -> Result<(), RepositoryError> {
        self.bump_stat(user, |s| &mut s.fails)
    }

    fn get(&self, user: &UserId) -> Result<AssassinationStats, RepositoryError> {
        self.stats.read(|stats| {
            stats
                .get(user.as_str())
                .copied()
                .map(AssassinationStats::from)
                .unwrap_or_default()
        })
    }
}

impl UserPurger for EconomyStore {
    /// Remove the player from every economy document
    ///
    /// Each document is tried even if an earlier one failed; the first
    /// failure is returned.
    fn wipe(&self, user: &UserId) -> Result<(), RepositoryError> {
        let outcomes = [
            (self.bank.name(), remove_user(&self.bank, user)),
            (self.companies.name(), remove_user(&self.companies, user)),
            (self.inventory.name(), remove_user(&self.inventory, user)),
            (self.user_stocks.name(), remove_user(&self.user_stocks, user)),
            (self.guards.name(), remove_user(&self.guards, user)),
            (self.zone_slots.name(), remove_user(&self.zone_slots, user)),
        ];

        let mut first_error = None;
        for (document, outcome) in outcomes {
            if let Err(e) = outcome {
                warn!(user = %user, document, error = %e, "wipe incomplete");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
