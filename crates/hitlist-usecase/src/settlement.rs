//! Settlement - The economic aftermath of a finished raid
//!
//! Run exactly once per terminal raid step. Nothing here returns an
//! error: a failed credit or purge is logged, reported, and left for an
//! admin to reconcile, so the attacker's raid slot is always released.

use std::sync::Arc;

use hitlist_domain::{BountyLedger, Ledger, StatsRepository, UserId, UserPurger};
use tracing::{error, info};

use crate::ports::EconomyPorts;

/// A settlement step that did not go through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementIssue {
    pub step: &'static str,
    pub user: UserId,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettlementReport {
    /// Bounty credited to the killer
    pub bounty_paid: Option<u64>,
    /// Player whose economy was purged
    pub wiped: Option<UserId>,
    pub issues: Vec<SettlementIssue>,
}

impl SettlementReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    fn record(&mut self, step: &'static str, user: &UserId, message: String) {
        error!(step, user = %user, %message, "settlement step failed");
        self.issues.push(SettlementIssue {
            step,
            user: user.clone(),
            message,
        });
    }
}

pub struct Settlement {
    ledger: Arc<dyn Ledger>,
    bounties: Arc<dyn BountyLedger>,
    stats: Arc<dyn StatsRepository>,
    purger: Arc<dyn UserPurger>,
}

impl Settlement {
    pub fn new(ports: &EconomyPorts) -> Self {
        Self {
            ledger: ports.ledger.clone(),
            bounties: ports.bounties.clone(),
            stats: ports.stats.clone(),
            purger: ports.purger.clone(),
        }
    }

    /// The target is dead: pay out their bounty, then wipe them
    ///
    /// The bounty is popped and credited before the wipe starts.
    pub fn settle_success(&self, killer: &UserId, target: &UserId) -> SettlementReport {
        let mut report = SettlementReport::default();

        match self.bounties.take_bounty(target) {
            Ok(Some(amount)) => match self.ledger.credit(killer, amount) {
                Ok(()) => {
                    info!(killer = %killer, victim = %target, amount, "bounty paid");
                    report.bounty_paid = Some(amount);
                }
                Err(e) => report.record(
                    "bounty payout",
                    killer,
                    format!("bounty of {} on {} was taken but not credited: {}", amount, target, e),
                ),
            },
            Ok(None) => {}
            Err(e) => report.record("bounty lookup", target, e.to_string()),
        }

        self.wipe(target, &mut report);

        if let Err(e) = self.stats.increment_success(killer) {
            report.record("success stat", killer, e.to_string());
        }

        report
    }

    /// The whole team died: the attacker pays with their own economy
    pub fn settle_failure(&self, attacker: &UserId) -> SettlementReport {
        let mut report = SettlementReport::default();

        self.wipe(attacker, &mut report);

        if let Err(e) = self.stats.increment_fail(attacker) {
            report.record("fail stat", attacker, e.to_string());
        }

        report
    }

    fn wipe(&self, user: &UserId, report: &mut SettlementReport) {
        match self.purger.wipe(user) {
            Ok(()) => {
                info!(user = %user, "economy wiped");
                report.wiped = Some(user.clone());
            }
            Err(e) => report.record("wipe", user, e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeEconomy;
    use hitlist_domain::{GuardRegistry, Guard, GuardType, RepositoryError};

    #[test]
    fn test_success_pays_bounty_before_wipe() {
        let economy = FakeEconomy::new();
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");
        economy.set_balance(&alice, 1_000);
        economy.set_balance(&bob, 500_000);
        economy.add_bounty(&bob, 50_000).unwrap();
        economy
            .add_guards(&bob, &[Guard::new(1, GuardType::Normal)], 25)
            .unwrap();
        let settlement = Settlement::new(&economy.ports());

        let report = settlement.settle_success(&alice, &bob);

        assert!(report.is_clean());
        assert_eq!(report.bounty_paid, Some(50_000));
        assert_eq!(report.wiped, Some(bob.clone()));
        assert_eq!(economy.balance(&alice).unwrap(), 51_000);
        assert_eq!(economy.balance(&bob).unwrap(), 0);
        assert!(economy.guards(&bob).unwrap().is_empty());
        assert_eq!(economy.bounty_of(&bob), None);
        assert_eq!(economy.stats_of(&alice).success, 1);
        assert_eq!(
            economy.journal(),
            vec!["take_bounty bob", "credit alice 50000", "wipe bob"]
        );
    }

    #[test]
    fn test_success_without_bounty_still_wipes() {
        let economy = FakeEconomy::new();
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");
        economy.set_balance(&bob, 10);
        let settlement = Settlement::new(&economy.ports());

        let report = settlement.settle_success(&alice, &bob);

        assert_eq!(report.bounty_paid, None);
        assert_eq!(report.wiped, Some(bob.clone()));
        assert_eq!(economy.balance(&alice).unwrap(), 0);
    }

    #[test]
    fn test_failure_wipes_the_attacker() {
        let economy = FakeEconomy::new();
        let alice = UserId::new("alice");
        economy.set_balance(&alice, 80_000);
        let settlement = Settlement::new(&economy.ports());

        let report = settlement.settle_failure(&alice);

        assert_eq!(report.wiped, Some(alice.clone()));
        assert_eq!(economy.balance(&alice).unwrap(), 0);
        assert_eq!(economy.stats_of(&alice).fails, 1);
    }

    #[test]
    fn test_failed_credit_is_reported_not_raised() {
        let economy = FakeEconomy::new();
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");
        economy.add_bounty(&bob, 20_000).unwrap();
        economy.fail_credits(RepositoryError::PersistenceError {
            message: "disk full".to_string(),
        });
        let settlement = Settlement::new(&economy.ports());

        let report = settlement.settle_success(&alice, &bob);

        assert_eq!(report.bounty_paid, None);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].step, "bounty payout");
        assert_eq!(report.wiped, Some(bob));
        assert_eq!(economy.stats_of(&alice).success, 1);
    }
}
