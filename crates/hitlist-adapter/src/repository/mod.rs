//! Persistence Adapters - Repository implementations
//!
//! These implement the repository traits from hitlist-domain.

pub mod document;
pub mod economy_store;
pub mod records;
