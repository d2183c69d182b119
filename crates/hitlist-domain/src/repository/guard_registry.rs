//! Guard Registry - Who defends a player and how many zones they own

use super::RepositoryError;
use crate::model::guard::Guard;
use crate::model::user::UserId;

pub trait GuardRegistry: Send + Sync {
    /// Owned zone count ([`DEFAULT_ZONE_COUNT`](crate::model::zone::DEFAULT_ZONE_COUNT) if never upgraded)
    fn zone_count(&self, user: &UserId) -> Result<u32, RepositoryError>;

    /// All registered guards, in hiring order
    fn guards(&self, user: &UserId) -> Result<Vec<Guard>, RepositoryError>;

    /// Append newly hired guards without exceeding `capacity` in total
    ///
    /// Returns how many were actually added. The capacity check and the
    /// append happen in the same critical section.
    fn add_guards(
        &self,
        user: &UserId,
        guards: &[Guard],
        capacity: usize,
    ) -> Result<usize, RepositoryError>;

    /// Raise the owned zone count to `count`
    ///
    /// Returns `false` and changes nothing when the player already owns at
    /// least `count` zones. The check and the write happen in the same
    /// critical section.
    fn upgrade_zone_count(&self, user: &UserId, count: u32) -> Result<bool, RepositoryError>;
}
