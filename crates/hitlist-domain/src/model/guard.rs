//! Guard - A hired defender standing in one of a player's zones
//!
//! GuardType is a Value Object: the type alone decides how hard the guard
//! hits back and what it costs to hire.

/// The three kinds of guard a player can hire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuardType {
    /// Baseline defender
    Normal,
    /// Absorbs part of the attackers' casualties
    Shielder,
    /// Lowers the attackers' chance to take the zone
    Sniper,
}

impl GuardType {
    /// Combat strength contributed to the zone total
    pub fn strength(&self) -> f64 {
        match self {
            GuardType::Normal => 1.0,
            GuardType::Shielder => 1.5,
            GuardType::Sniper => 2.0,
        }
    }

    /// Price of hiring a single guard of this type
    pub fn hire_price(&self) -> u64 {
        match self {
            GuardType::Normal => 4_500,
            GuardType::Shielder => 9_000,
            GuardType::Sniper => 12_000,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GuardType::Normal => "normal",
            GuardType::Shielder => "shielder",
            GuardType::Sniper => "sniper",
        }
    }

    /// Parse a user-supplied guard type (case-insensitive)
    pub fn parse(input: &str) -> Option<GuardType> {
        match input.trim().to_ascii_lowercase().as_str() {
            "normal" => Some(GuardType::Normal),
            "shielder" => Some(GuardType::Shielder),
            "sniper" => Some(GuardType::Sniper),
            _ => None,
        }
    }

    pub fn all() -> &'static [GuardType] {
        &[GuardType::Normal, GuardType::Shielder, GuardType::Sniper]
    }
}

impl core::fmt::Display for GuardType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A guard as registered by its owner
///
/// `zone` is the 1-based zone number the guard was posted to when hired.
/// It is not validated against the owner's current zone count; raids clamp
/// it into range when the defense snapshot is built. Guards from old saves
/// may have no zone at all and are posted at random by each raid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guard {
    zone: Option<u32>,
    kind: GuardType,
}

impl Guard {
    pub fn new(zone: u32, kind: GuardType) -> Self {
        Self {
            zone: Some(zone),
            kind,
        }
    }

    /// A guard that was never posted to a zone
    pub fn unplaced(kind: GuardType) -> Self {
        Self { zone: None, kind }
    }

    pub fn zone(&self) -> Option<u32> {
        self.zone
    }

    pub fn kind(&self) -> GuardType {
        self.kind
    }
}
