//! Economy ports bundle
//!
//! The services only ever see these trait objects; which store sits
//! behind them is decided once, at wiring time.

use std::sync::Arc;

use hitlist_domain::{BountyLedger, GuardRegistry, Ledger, StatsRepository, UserPurger};

#[derive(Clone)]
pub struct EconomyPorts {
    pub ledger: Arc<dyn Ledger>,
    pub registry: Arc<dyn GuardRegistry>,
    pub bounties: Arc<dyn BountyLedger>,
    pub stats: Arc<dyn StatsRepository>,
    pub purger: Arc<dyn UserPurger>,
}

impl EconomyPorts {
    /// Use one store for every port
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: Ledger + GuardRegistry + BountyLedger + StatsRepository + UserPurger + 'static,
    {
        Self {
            ledger: store.clone(),
            registry: store.clone(),
            bounties: store.clone(),
            stats: store.clone(),
            purger: store,
        }
    }
}
