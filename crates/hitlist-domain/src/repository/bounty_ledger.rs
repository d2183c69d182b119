//! Bounty Ledger - Prices on players' heads

use super::RepositoryError;
use crate::model::user::UserId;

pub trait BountyLedger: Send + Sync {
    /// Remove and return the target's bounty, if any
    ///
    /// Pop semantics: two callers racing on the same target never both
    /// receive the amount.
    fn take_bounty(&self, target: &UserId) -> Result<Option<u64>, RepositoryError>;

    /// Add to the target's bounty, returning the new total
    fn add_bounty(&self, target: &UserId, amount: u64) -> Result<u64, RepositoryError>;

    /// All open bounties, in no particular order
    fn list(&self) -> Result<Vec<(UserId, u64)>, RepositoryError>;
}
