//! Zones - The checkpoints a raid must clear in order
//!
//! A player owns 5 zones until they buy more. [`ZoneDefense`] is the frozen
//! picture of who stands where, taken once when a raid starts.

use super::guard::{Guard, GuardType};
use crate::service::roll::RollSource;

/// Zone count for players who never bought an upgrade
pub const DEFAULT_ZONE_COUNT: u32 = 5;

/// Guards visible to an attacker in a single zone
pub const MAX_VISIBLE_GUARDS_PER_ZONE: usize = 5;

/// How many guards a player may employ for a given zone count
pub fn guard_capacity(zone_count: u32) -> u32 {
    match zone_count {
        5 => 25,
        10 => 65,
        15 => 95,
        20 => 135,
        _ => 25,
    }
}

/// Purchasable zone-slot upgrades
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneSlots {
    Ten,
    Fifteen,
    Twenty,
}

impl ZoneSlots {
    pub fn from_count(count: u32) -> Option<ZoneSlots> {
        match count {
            10 => Some(ZoneSlots::Ten),
            15 => Some(ZoneSlots::Fifteen),
            20 => Some(ZoneSlots::Twenty),
            _ => None,
        }
    }

    pub fn count(&self) -> u32 {
        match self {
            ZoneSlots::Ten => 10,
            ZoneSlots::Fifteen => 15,
            ZoneSlots::Twenty => 20,
        }
    }

    pub fn price(&self) -> u64 {
        match self {
            ZoneSlots::Ten => 150_000,
            ZoneSlots::Fifteen => 350_000,
            ZoneSlots::Twenty => 750_000,
        }
    }
}

/// Per-zone guard lists as seen by one raid
///
/// Built from the registry at raid start and never refreshed afterwards:
/// guards hired mid-raid do not join the fight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneDefense {
    zones: Vec<Vec<GuardType>>,
}

impl ZoneDefense {
    /// Bucket registered guards into `zone_count` zones
    ///
    /// Zone numbers are 1-based and clamped into `1..=zone_count`. Guards
    /// without a zone are posted with `dice` for this raid only. Each zone
    /// keeps at most [`MAX_VISIBLE_GUARDS_PER_ZONE`] guards, in
    /// registration order; the rest are invisible to combat.
    pub fn snapshot(zone_count: u32, guards: &[Guard], dice: &mut dyn RollSource) -> Self {
        let mut zones: Vec<Vec<GuardType>> = vec![Vec::new(); zone_count as usize];
        if zone_count == 0 {
            return Self { zones };
        }

        for guard in guards {
            let posted = guard.zone().unwrap_or_else(|| dice.pick_zone(zone_count));
            let zone = posted.clamp(1, zone_count) as usize - 1;
            if zones[zone].len() < MAX_VISIBLE_GUARDS_PER_ZONE {
                zones[zone].push(guard.kind());
            }
        }

        Self { zones }
    }

    /// Build a defense directly from per-zone lists (tests, replays)
    pub fn from_zones(zones: Vec<Vec<GuardType>>) -> Self {
        Self { zones }
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn guards(&self, index: usize) -> Option<&[GuardType]> {
        self.zones.get(index).map(|z| z.as_slice())
    }

    /// Remove every guard from a zone once it has been taken
    pub fn clear(&mut self, index: usize) {
        if let Some(zone) = self.zones.get_mut(index) {
            zone.clear();
        }
    }

    pub fn total_guards(&self) -> usize {
        self.zones.iter().map(|z| z.len()).sum()
    }
}
