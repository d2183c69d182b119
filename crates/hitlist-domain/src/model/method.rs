//! MethodTier - How big a team the attacker hires
//!
//! Tiers are a static price list. A tier is picked by name when a raid is
//! launched and fixes the team size for the whole raid.

/// One entry of the hit-squad price list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodTier {
    name: &'static str,
    cost: u64,
    team_size: u32,
}

const TIERS: [MethodTier; 9] = [
    MethodTier::new("solo", 20_000, 1),
    MethodTier::new("squad", 100_000, 5),
    MethodTier::new("army", 350_000, 10),
    MethodTier::new("platoon", 900_000, 20),
    MethodTier::new("taskforce", 1_500_000, 30),
    MethodTier::new("division", 4_500_000, 40),
    MethodTier::new("brigade", 7_500_000, 50),
    MethodTier::new("battalion", 23_000_000, 75),
    MethodTier::new("regiment", 42_500_000, 100),
];

impl MethodTier {
    const fn new(name: &'static str, cost: u64, team_size: u32) -> Self {
        Self {
            name,
            cost,
            team_size,
        }
    }

    /// Look up a tier by name (case-insensitive)
    pub fn lookup(name: &str) -> Option<MethodTier> {
        let name = name.trim();
        TIERS
            .iter()
            .find(|tier| tier.name.eq_ignore_ascii_case(name))
            .copied()
    }

    /// All tiers, cheapest first
    pub fn all() -> &'static [MethodTier] {
        &TIERS
    }

    /// Comma separated tier names, for rejection messages
    pub fn names() -> String {
        TIERS
            .iter()
            .map(|tier| tier.name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn cost(&self) -> u64 {
        self.cost
    }

    pub fn team_size(&self) -> u32 {
        self.team_size
    }
}
