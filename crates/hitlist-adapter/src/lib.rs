//! # Hitlist Adapter Layer
//!
//! Outbound adapters (Hexagonal Architecture).
//!
//! ## Structure
//!
//! - `repository/` - JSON document store implementing every economy port
//! - `dice` - Random sources for combat and guard placement

pub mod dice;
pub mod repository;

pub use dice::{EntropyDice, SeededDice};
pub use repository::economy_store::EconomyStore;
