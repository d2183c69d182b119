//! Bounty Board - Prices on players' heads
//!
//! Bounties accumulate per target and are paid out in full to whoever
//! finishes a raid on them (see [`Settlement`](crate::Settlement)).

use std::sync::Arc;

use hitlist_domain::{BountyLedger, DebitOutcome, Ledger, UserId};
use shared::Money;
use tracing::{debug, error, info};

use crate::error::{GameError, Result, ValidationError};
use crate::ports::EconomyPorts;

pub const MIN_BOUNTY: u64 = 10_000;

/// Default length of the public listing
pub const DEFAULT_LISTING: usize = 10;

pub struct BountyBoard {
    ledger: Arc<dyn Ledger>,
    bounties: Arc<dyn BountyLedger>,
}

impl BountyBoard {
    pub fn new(ports: &EconomyPorts) -> Self {
        Self {
            ledger: ports.ledger.clone(),
            bounties: ports.bounties.clone(),
        }
    }

    /// Pay `amount` into the bounty on `target`, returning the new total
    pub fn place_bounty(&self, placer: &UserId, target: &UserId, amount: u64) -> Result<u64> {
        if placer == target {
            return Err(reject(placer, ValidationError::SelfTarget));
        }
        if amount < MIN_BOUNTY {
            return Err(reject(
                placer,
                ValidationError::BountyTooSmall {
                    minimum: Money(MIN_BOUNTY),
                },
            ));
        }

        if let DebitOutcome::Insufficient { available } = self.ledger.debit(placer, amount)? {
            debug!(placer = %placer, amount, available, "bounty rejected: insufficient funds");
            return Err(GameError::insufficient(amount, available));
        }

        match self.bounties.add_bounty(target, amount) {
            Ok(total) => {
                info!(placer = %placer, victim = %target, amount, total, "bounty placed");
                Ok(total)
            }
            Err(e) => {
                if let Err(refund) = self.ledger.credit(placer, amount) {
                    error!(placer = %placer, amount, error = %refund, "bounty refund failed");
                }
                Err(e.into())
            }
        }
    }

    /// Highest bounties first; equal amounts ordered by player id
    pub fn top_bounties(&self, limit: usize) -> Result<Vec<(UserId, u64)>> {
        let mut listing = self.bounties.list()?;
        listing.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        listing.truncate(limit);
        Ok(listing)
    }
}

fn reject(placer: &UserId, error: ValidationError) -> GameError {
    debug!(placer = %placer, reason = %error, "bounty rejected");
    GameError::Validation(error)
}
