//! Domain Services - Business logic that doesn't belong to a single entity
//!
//! `combat` is the balance math for one zone, `raid_machine` walks a
//! RaidAttempt through its zones, and `roll` is the randomness port.

pub mod combat;
pub mod raid_machine;
pub mod roll;
