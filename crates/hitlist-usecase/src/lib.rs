//! # Hitlist Use Case Layer
//!
//! Application-specific business rules.
//! This layer drives the domain's RaidMachine against the economy ports
//! and turns every outcome into narrative events for the chat layer.
//!
//! - [`RaidService`] - launch raids, take tactics, settle the ending
//! - [`DefenseService`] - hire guards, buy zone slots
//! - [`BountyBoard`] - put prices on heads

pub mod bounty_board;
pub mod defense;
pub mod error;
pub mod events;
pub mod ports;
pub mod raid_service;
pub mod raid_table;
pub mod settlement;

#[cfg(test)]
pub(crate) mod testing;

pub use hitlist_domain;

pub use bounty_board::{BountyBoard, DEFAULT_LISTING, MIN_BOUNTY};
pub use defense::{DefenseService, GuardLayout, HireReport};
pub use error::{GameError, Result, ValidationError};
pub use events::{RaidEvent, RaidReport, RaidStatus};
pub use ports::EconomyPorts;
pub use raid_service::RaidService;
pub use raid_table::RaidTable;
pub use settlement::{Settlement, SettlementIssue, SettlementReport};
