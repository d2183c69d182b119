//! Repository Traits - The "Ports" of Hexagonal Architecture
//!
//! These traits define WHAT the raid engine needs from the economy,
//! but NOT how it's stored. That's the adapter's job.
//!
//! ```text
//! Domain Layer          │  Adapter Layer
//! ──────────────────────┼────────────────────────
//! trait Ledger          │  EconomyStore (JSON documents)
//!   fn debit()          │  EconomyStore::in_memory()
//! trait GuardRegistry   │
//!   fn guards()         │
//! ```
//!
//! Every method takes `&self`: documents are shared by every player's
//! commands, so implementations guard each document with its own lock
//! and make each call one read-modify-write critical section.

pub mod bounty_ledger;
pub mod guard_registry;
pub mod ledger;
pub mod purge;
pub mod stats_repository;

/// Errors that can occur during repository operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Record not found
    NotFound { id: String },
    /// Failed to persist or load a document
    PersistenceError { message: String },
    /// Lock on a document could not be acquired
    ConcurrencyError { document: String },
}

impl core::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RepositoryError::NotFound { id } => {
                write!(f, "Record not found: {}", id)
            }
            RepositoryError::PersistenceError { message } => {
                write!(f, "Persistence error: {}", message)
            }
            RepositoryError::ConcurrencyError { document } => {
                write!(f, "Could not lock document: {}", document)
            }
        }
    }
}

impl std::error::Error for RepositoryError {}
