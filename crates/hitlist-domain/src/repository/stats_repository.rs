//! Stats Repository - Raid counters per attacker

use super::RepositoryError;
use crate::model::stats::AssassinationStats;
use crate::model::user::UserId;

pub trait StatsRepository: Send + Sync {
    fn increment_attempt(&self, user: &UserId) -> Result<(), RepositoryError>;

    fn increment_success(&self, user: &UserId) -> Result<(), RepositoryError>;

    fn increment_fail(&self, user: &UserId) -> Result<(), RepositoryError>;

    /// Counters for a player (all zero if they never raided)
    fn get(&self, user: &UserId) -> Result<AssassinationStats, RepositoryError>;
}
