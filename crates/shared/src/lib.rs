//! # Hitlist Shared
//!
//! Configuration, error types and player-facing money formatting.

pub mod config;
pub mod error;
pub mod money;

// Re-exports
pub use config::*;
pub use error::*;
pub use money::Money;
