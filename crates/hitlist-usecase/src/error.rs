//! Error types for Hitlist commands
//!
//! Every message here is shown to the player as-is.

use hitlist_domain::{RaidError, RepositoryError};
use shared::Money;
use thiserror::Error;

/// Rejected before anything was touched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("You cannot target yourself.")]
    SelfTarget,

    #[error("Invalid method `{method}`. Choose one: {available}.")]
    UnknownMethod { method: String, available: String },

    #[error("You already have an active assassination raid.")]
    RaidAlreadyActive,

    #[error("You don't have an active assassination raid.")]
    NoActiveRaid,

    #[error("You cannot choose a tactic right now.")]
    WrongPhase,

    #[error("Invalid tactic `{0}`. Choose `siper` (defensive) or `charge` (aggressive).")]
    InvalidTactic(String),

    #[error("Invalid guard type `{0}`. Choose one: normal, shielder, sniper.")]
    InvalidGuardType(String),

    #[error("You must hire at least one guard.")]
    NothingToHire,

    #[error("You already have the maximum number of guards ({capacity}) for your zones.")]
    GuardCapacityReached { capacity: u32 },

    #[error("You can only buy 10, 15 or 20 zone slots (got {0}).")]
    InvalidZoneSlots(u32),

    #[error("You already own {owned} zones.")]
    ZoneSlotsOwned { owned: u32 },

    #[error("Bounties must be at least {minimum}.")]
    BountyTooSmall { minimum: Money },

    #[error("Amount must be greater than zero.")]
    ZeroAmount,
}

/// General Hitlist error type
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("You need {needed} for this, but you only have {available}.")]
    InsufficientFunds { needed: Money, available: Money },

    #[error("Storage error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Raid state error: {0}")]
    Raid(#[from] RaidError),
}

impl GameError {
    pub fn insufficient(needed: u64, available: u64) -> Self {
        GameError::InsufficientFunds {
            needed: Money(needed),
            available: Money(available),
        }
    }

    /// Player mistakes, as opposed to storage trouble
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            GameError::Validation(_) | GameError::InsufficientFunds { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
