//! Assassination stats - Per-attacker scoreboard

/// Monotonic raid counters for one player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssassinationStats {
    pub attempts: u64,
    pub success: u64,
    pub fails: u64,
}

impl AssassinationStats {
    /// Raids started but not yet settled (abandoned raids stay here forever)
    pub fn unresolved(&self) -> u64 {
        self.attempts.saturating_sub(self.success + self.fails)
    }
}
