//! Ledger - The bank balance port
//!
//! Balances are whole dollars. Unknown players have a balance of 0.

use super::RepositoryError;
use crate::model::user::UserId;

/// Result of an attempted debit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebitOutcome {
    /// Funds were removed
    Debited,
    /// Nothing was removed; the balance is what it was
    Insufficient { available: u64 },
}

impl DebitOutcome {
    pub fn is_debited(&self) -> bool {
        matches!(self, DebitOutcome::Debited)
    }
}

/// Ledger Trait
///
/// Each call is atomic with respect to other callers touching the same
/// user: a debit checks and subtracts inside one critical section.
pub trait Ledger: Send + Sync {
    /// Current balance (0 for players without an account)
    fn balance(&self, user: &UserId) -> Result<u64, RepositoryError>;

    /// Remove `amount` if the balance covers it
    fn debit(&self, user: &UserId, amount: u64) -> Result<DebitOutcome, RepositoryError>;

    /// Add `amount`, opening an account if needed
    fn credit(&self, user: &UserId, amount: u64) -> Result<(), RepositoryError>;

    /// Move funds between two players in one step
    fn transfer(
        &self,
        from: &UserId,
        to: &UserId,
        amount: u64,
    ) -> Result<DebitOutcome, RepositoryError>;
}
