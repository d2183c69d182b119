//! Domain Models - The vocabulary of Hitlist
//!
//! These types represent the "Ubiquitous Language" of the raid game.
//! Every name here should match how players talk about it.

pub mod guard;
pub mod method;
pub mod raid;
pub mod stats;
pub mod tactic;
pub mod user;
pub mod zone;
