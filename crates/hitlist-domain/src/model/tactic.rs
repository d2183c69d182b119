//! Tactic - The attacker's per-zone choice
//!
//! Aggressive trades casualties for a better chance at the zone.
//! Players also type the old chat words: `siper` (dig in) and `charge`.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tactic {
    Defensive,
    Aggressive,
}

impl Tactic {
    /// Parse a player's tactic word (case-insensitive)
    pub fn parse(input: &str) -> Option<Tactic> {
        match input.trim().to_ascii_lowercase().as_str() {
            "defensive" | "siper" => Some(Tactic::Defensive),
            "aggressive" | "charge" => Some(Tactic::Aggressive),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tactic::Defensive => "defensive",
            Tactic::Aggressive => "aggressive",
        }
    }
}

impl core::fmt::Display for Tactic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name())
    }
}
