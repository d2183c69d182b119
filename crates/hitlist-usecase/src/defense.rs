//! Defense Service - Hiring guards and buying zone slots
//!
//! Guards are what a raid fights through. Each hired guard lands in a
//! random zone of its owner's current layout.

use std::sync::{Mutex, MutexGuard};

use hitlist_domain::model::zone::guard_capacity;
use hitlist_domain::{DebitOutcome, Guard, GuardType, RollSource, UserId, ZoneSlots};
use tracing::{debug, error, info};

use crate::error::{GameError, Result, ValidationError};
use crate::ports::EconomyPorts;

/// Outcome of a guard purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HireReport {
    pub kind: GuardType,
    /// Guards actually registered (may be fewer than requested)
    pub hired: usize,
    pub charged: u64,
    pub capacity: u32,
}

/// How a player's guards are spread over their zones
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardLayout {
    pub zone_count: u32,
    /// Registered guards per zone, index 0 is zone 1
    pub per_zone: Vec<usize>,
    /// Guards from old saves that each raid posts at random
    pub unplaced: usize,
}

impl GuardLayout {
    pub fn total(&self) -> usize {
        self.per_zone.iter().sum::<usize>() + self.unplaced
    }
}

pub struct DefenseService {
    ports: EconomyPorts,
    dice: Mutex<Box<dyn RollSource>>,
}

impl DefenseService {
    pub fn new(ports: EconomyPorts, dice: Box<dyn RollSource>) -> Self {
        Self {
            ports,
            dice: Mutex::new(dice),
        }
    }

    fn dice(&self) -> MutexGuard<'_, Box<dyn RollSource>> {
        self.dice
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Hire `amount` guards of `kind` (normal when empty)
    ///
    /// The whole batch is charged up front. If the zones fill up part way,
    /// the remainder is dropped and the report says how many made it.
    pub fn hire_guards(&self, user: &UserId, amount: u32, kind: &str) -> Result<HireReport> {
        if amount == 0 {
            return Err(reject(user, ValidationError::NothingToHire));
        }

        let kind = if kind.trim().is_empty() {
            GuardType::Normal
        } else {
            GuardType::parse(kind)
                .ok_or_else(|| reject(user, ValidationError::InvalidGuardType(kind.trim().to_string())))?
        };

        let zone_count = self.ports.registry.zone_count(user)?;
        let capacity = guard_capacity(zone_count);
        let owned = self.ports.registry.guards(user)?.len();
        if owned >= capacity as usize {
            return Err(reject(user, ValidationError::GuardCapacityReached { capacity }));
        }

        let price = kind.hire_price().saturating_mul(u64::from(amount));
        if let DebitOutcome::Insufficient { available } = self.ports.ledger.debit(user, price)? {
            debug!(user = %user, price, available, "guard hire rejected: insufficient funds");
            return Err(GameError::insufficient(price, available));
        }

        let batch: Vec<Guard> = {
            let mut dice = self.dice();
            (0..amount)
                .map(|_| Guard::new(dice.pick_zone(zone_count), kind))
                .collect()
        };

        let hired = match self.ports.registry.add_guards(user, &batch, capacity as usize) {
            Ok(hired) => hired,
            Err(e) => {
                self.refund(user, price);
                return Err(e.into());
            }
        };

        // Someone else filled the last places between the check and the append
        if hired == 0 {
            self.refund(user, price);
            return Err(reject(user, ValidationError::GuardCapacityReached { capacity }));
        }

        info!(user = %user, kind = kind.name(), requested = amount, hired, charged = price, "guards hired");
        Ok(HireReport {
            kind,
            hired,
            charged: price,
            capacity,
        })
    }

    /// Upgrade to 10, 15 or 20 zones
    pub fn buy_zone_slots(&self, user: &UserId, slots: u32) -> Result<ZoneSlots> {
        let tier = ZoneSlots::from_count(slots)
            .ok_or_else(|| reject(user, ValidationError::InvalidZoneSlots(slots)))?;

        let owned = self.ports.registry.zone_count(user)?;
        if owned >= tier.count() {
            return Err(reject(user, ValidationError::ZoneSlotsOwned { owned }));
        }

        if let DebitOutcome::Insufficient { available } =
            self.ports.ledger.debit(user, tier.price())?
        {
            debug!(user = %user, price = tier.price(), available, "zone upgrade rejected: insufficient funds");
            return Err(GameError::insufficient(tier.price(), available));
        }

        match self.ports.registry.upgrade_zone_count(user, tier.count()) {
            Ok(true) => {}
            // A concurrent purchase already reached this tier
            Ok(false) => {
                self.refund(user, tier.price());
                let owned = self.ports.registry.zone_count(user).unwrap_or(tier.count());
                return Err(reject(user, ValidationError::ZoneSlotsOwned { owned }));
            }
            Err(e) => {
                self.refund(user, tier.price());
                return Err(e.into());
            }
        }

        info!(user = %user, zones = tier.count(), "zone slots bought");
        Ok(tier)
    }

    pub fn guard_layout(&self, user: &UserId) -> Result<GuardLayout> {
        let zone_count = self.ports.registry.zone_count(user)?;
        let mut per_zone = vec![0usize; zone_count as usize];
        let mut unplaced = 0;
        for guard in self.ports.registry.guards(user)? {
            let slot = guard
                .zone()
                .and_then(|zone| (zone as usize).checked_sub(1))
                .and_then(|index| per_zone.get_mut(index));
            match slot {
                Some(slot) => *slot += 1,
                None if guard.zone().is_none() => unplaced += 1,
                None => {}
            }
        }
        Ok(GuardLayout {
            zone_count,
            per_zone,
            unplaced,
        })
    }

    fn refund(&self, user: &UserId, amount: u64) {
        if let Err(e) = self.ports.ledger.credit(user, amount) {
            error!(user = %user, amount, error = %e, "refund failed");
        }
    }
}

fn reject(user: &UserId, error: ValidationError) -> GameError {
    debug!(user = %user, reason = %error, "defense command rejected");
    GameError::Validation(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeEconomy;
    use hitlist_domain::model::zone::DEFAULT_ZONE_COUNT;
    use hitlist_domain::{FixedRolls, GuardRegistry, Ledger, RepositoryError};
    use std::sync::Arc;

    fn dave() -> UserId {
        UserId::new("dave")
    }

    fn service(economy: &Arc<FakeEconomy>) -> DefenseService {
        DefenseService::new(economy.ports(), Box::new(FixedRolls::always(0.0)))
    }

    #[test]
    fn test_hire_charges_and_spreads_guards() {
        let economy = FakeEconomy::new();
        economy.set_balance(&dave(), 100_000);
        let defense = service(&economy);

        let report = defense.hire_guards(&dave(), 7, "SNIPER").unwrap();

        assert_eq!(report.kind, GuardType::Sniper);
        assert_eq!(report.hired, 7);
        assert_eq!(report.charged, 84_000);
        assert_eq!(report.capacity, 25);
        assert_eq!(economy.balance(&dave()).unwrap(), 16_000);

        let layout = defense.guard_layout(&dave()).unwrap();
        assert_eq!(layout.zone_count, 5);
        assert_eq!(layout.per_zone, vec![2, 2, 1, 1, 1]);
        assert_eq!(layout.total(), 7);
    }

    #[test]
    fn test_default_type_is_normal() {
        let economy = FakeEconomy::new();
        economy.set_balance(&dave(), 4_500);
        let defense = service(&economy);

        let report = defense.hire_guards(&dave(), 1, "").unwrap();

        assert_eq!(report.kind, GuardType::Normal);
        assert_eq!(economy.balance(&dave()).unwrap(), 0);
    }

    #[test]
    fn test_hire_rejections_leave_balance_alone() {
        let economy = FakeEconomy::new();
        economy.set_balance(&dave(), 10_000);
        let defense = service(&economy);

        assert!(matches!(
            defense.hire_guards(&dave(), 0, "normal"),
            Err(GameError::Validation(ValidationError::NothingToHire))
        ));
        assert!(matches!(
            defense.hire_guards(&dave(), 1, "wizard"),
            Err(GameError::Validation(ValidationError::InvalidGuardType(_)))
        ));
        assert!(matches!(
            defense.hire_guards(&dave(), 3, "normal"),
            Err(GameError::InsufficientFunds { .. })
        ));
        assert_eq!(economy.balance(&dave()).unwrap(), 10_000);
        assert!(economy.guards(&dave()).unwrap().is_empty());
    }

    #[test]
    fn test_capacity_truncates_but_charges_full_batch() {
        let economy = FakeEconomy::new();
        economy.set_balance(&dave(), 1_000_000);
        let defense = service(&economy);
        defense.hire_guards(&dave(), 20, "normal").unwrap();

        let report = defense.hire_guards(&dave(), 10, "normal").unwrap();

        assert_eq!(report.hired, 5);
        assert_eq!(report.charged, 45_000);
        assert_eq!(economy.guards(&dave()).unwrap().len(), 25);
        assert_eq!(economy.balance(&dave()).unwrap(), 1_000_000 - 90_000 - 45_000);

        let full = defense.hire_guards(&dave(), 1, "normal").unwrap_err();
        assert!(matches!(
            full,
            GameError::Validation(ValidationError::GuardCapacityReached { capacity: 25 })
        ));
        assert_eq!(economy.balance(&dave()).unwrap(), 1_000_000 - 135_000);
    }

    #[test]
    fn test_buy_zone_slots() {
        let economy = FakeEconomy::new();
        economy.set_balance(&dave(), 600_000);
        let defense = service(&economy);

        assert!(matches!(
            defense.buy_zone_slots(&dave(), 12),
            Err(GameError::Validation(ValidationError::InvalidZoneSlots(12)))
        ));

        let tier = defense.buy_zone_slots(&dave(), 15).unwrap();
        assert_eq!(tier, ZoneSlots::Fifteen);
        assert_eq!(economy.zone_count(&dave()).unwrap(), 15);
        assert_eq!(economy.balance(&dave()).unwrap(), 250_000);

        assert!(matches!(
            defense.buy_zone_slots(&dave(), 10),
            Err(GameError::Validation(ValidationError::ZoneSlotsOwned { owned: 15 }))
        ));
        assert!(matches!(
            defense.buy_zone_slots(&dave(), 20),
            Err(GameError::InsufficientFunds { .. })
        ));
        assert_eq!(economy.balance(&dave()).unwrap(), 250_000);
    }

    /// Reports the default zone count whatever the store holds, as a
    /// purchase racing against another one would see it
    struct StaleZoneCount(Arc<FakeEconomy>);

    impl GuardRegistry for StaleZoneCount {
        fn zone_count(&self, _user: &UserId) -> std::result::Result<u32, RepositoryError> {
            Ok(DEFAULT_ZONE_COUNT)
        }

        fn guards(&self, user: &UserId) -> std::result::Result<Vec<Guard>, RepositoryError> {
            self.0.guards(user)
        }

        fn add_guards(
            &self,
            user: &UserId,
            guards: &[Guard],
            capacity: usize,
        ) -> std::result::Result<usize, RepositoryError> {
            self.0.add_guards(user, guards, capacity)
        }

        fn upgrade_zone_count(
            &self,
            user: &UserId,
            count: u32,
        ) -> std::result::Result<bool, RepositoryError> {
            self.0.upgrade_zone_count(user, count)
        }
    }

    #[test]
    fn test_zone_upgrade_lost_to_a_bigger_one_is_refunded() {
        let economy = FakeEconomy::new();
        economy.set_balance(&dave(), 1_000_000);
        let mut ports = economy.ports();
        ports.registry = Arc::new(StaleZoneCount(economy.clone()));
        let defense = DefenseService::new(ports, Box::new(FixedRolls::always(0.0)));

        defense.buy_zone_slots(&dave(), 20).unwrap();
        let late = defense.buy_zone_slots(&dave(), 10).unwrap_err();

        assert!(matches!(
            late,
            GameError::Validation(ValidationError::ZoneSlotsOwned { .. })
        ));
        assert_eq!(economy.zone_count(&dave()).unwrap(), 20);
        assert_eq!(
            economy.balance(&dave()).unwrap(),
            1_000_000 - ZoneSlots::Twenty.price()
        );
    }

    #[test]
    fn test_concurrent_zone_upgrades_keep_the_biggest() {
        let economy = FakeEconomy::new();
        economy.set_balance(&dave(), 10_000_000);
        let defense = Arc::new(service(&economy));

        let handles: Vec<_> = [20, 10, 15, 20]
            .into_iter()
            .map(|slots| {
                let defense = defense.clone();
                std::thread::spawn(move || defense.buy_zone_slots(&dave(), slots).ok())
            })
            .collect();
        let spent: u64 = handles
            .into_iter()
            .filter_map(|h| h.join().unwrap())
            .map(|tier| tier.price())
            .sum();

        assert_eq!(economy.zone_count(&dave()).unwrap(), 20);
        assert_eq!(economy.balance(&dave()).unwrap(), 10_000_000 - spent);
    }

    #[test]
    fn test_layout_ignores_out_of_range_guards() {
        let economy = FakeEconomy::new();
        economy
            .add_guards(
                &dave(),
                &[
                    Guard::new(1, GuardType::Normal),
                    Guard::new(9, GuardType::Sniper),
                ],
                25,
            )
            .unwrap();
        let defense = service(&economy);

        let layout = defense.guard_layout(&dave()).unwrap();

        assert_eq!(layout.per_zone, vec![1, 0, 0, 0, 0]);
        assert_eq!(layout.total(), 1);
    }

    #[test]
    fn test_layout_counts_unplaced_guards_apart() {
        let economy = FakeEconomy::new();
        economy
            .add_guards(
                &dave(),
                &[
                    Guard::unplaced(GuardType::Shielder),
                    Guard::new(2, GuardType::Normal),
                ],
                25,
            )
            .unwrap();
        let defense = service(&economy);

        let layout = defense.guard_layout(&dave()).unwrap();

        assert_eq!(layout.per_zone, vec![0, 1, 0, 0, 0]);
        assert_eq!(layout.unplaced, 1);
        assert_eq!(layout.total(), 2);
    }

    #[test]
    fn test_registry_outage_surfaces_as_storage_error() {
        let economy = FakeEconomy::new();
        economy.set_balance(&dave(), 50_000);
        economy.fail_registry(RepositoryError::PersistenceError {
            message: "zone_slots.json unreadable".to_string(),
        });
        let defense = service(&economy);

        let err = defense.hire_guards(&dave(), 1, "normal").unwrap_err();

        assert!(!err.is_rejection());
        assert_eq!(economy.balance(&dave()).unwrap(), 50_000);
    }
}
