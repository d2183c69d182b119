//! # Hitlist Domain Layer
//!
//! The heart of Hitlist - raid rules and combat math with zero external
//! dependencies.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Domain Layer (This Crate)                     │
//! │  ┌─────────────────────────────────────────────────────────────┐│
//! │  │  model/     - Entities & Value Objects                      ││
//! │  │  repository/- Ports to the economy (ledger, guards, ...)    ││
//! │  │  service/   - Combat odds, RaidMachine, RollSource          ││
//! │  └─────────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in here performs I/O. Documents are reached through the
//! repository traits and every random draw goes through [`RollSource`],
//! so a raid can be replayed exactly in tests.

pub mod model;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use model::{
    guard::{Guard, GuardType},
    method::MethodTier,
    raid::{RaidAttempt, RaidError, RaidPhase},
    stats::AssassinationStats,
    tactic::Tactic,
    user::UserId,
    zone::{ZoneDefense, ZoneSlots},
};

pub use repository::{
    bounty_ledger::BountyLedger,
    guard_registry::GuardRegistry,
    ledger::{DebitOutcome, Ledger},
    purge::UserPurger,
    stats_repository::StatsRepository,
    RepositoryError,
};

pub use service::{
    combat::{ZoneClash, ZoneOdds},
    raid_machine::{RaidMachine, RaidStep},
    roll::{FixedRolls, RollSource},
};
