//! Purge - Wiping a player out of the economy

use super::RepositoryError;
use crate::model::user::UserId;

/// Deletes every economic record a player owns
///
/// A wipe covers the bank account, company, inventory, stock holdings,
/// guards and zone slots. Bounties and raid stats are not touched.
pub trait UserPurger: Send + Sync {
    fn wipe(&self, user: &UserId) -> Result<(), RepositoryError>;
}
