//! On-disk record shapes
//!
//! Every document is a JSON object keyed by player id. Field names match
//! the files the game has always written, so existing data loads as-is.

use std::collections::BTreeMap;

use hitlist_domain::{AssassinationStats, Guard, GuardType};
use serde::{Deserialize, Serialize};

pub type ByUser<T> = BTreeMap<String, T>;

pub const BANK: &str = "bank.json";
pub const GUARDS: &str = "guards.json";
pub const ZONE_SLOTS: &str = "zone_slots.json";
pub const BOUNTIES: &str = "bounties.json";
pub const STATS: &str = "assassination_stats.json";
pub const COMPANIES: &str = "companies.json";
pub const INVENTORY: &str = "inventory.json";
pub const USER_STOCKS: &str = "user_stocks.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub bank_points: u64,
    #[serde(default)]
    pub loan_amount: u64,
    #[serde(default)]
    pub loan_timestamp: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<u32>,
    #[serde(rename = "type", default = "normal_kind")]
    pub kind: String,
}

fn normal_kind() -> String {
    GuardType::Normal.name().to_string()
}

impl From<&Guard> for GuardRecord {
    fn from(guard: &Guard) -> Self {
        Self {
            zone: guard.zone(),
            kind: guard.kind().name().to_string(),
        }
    }
}

impl From<&GuardRecord> for Guard {
    /// Unrecognised types fight as normal guards
    fn from(record: &GuardRecord) -> Self {
        let kind = GuardType::parse(&record.kind).unwrap_or(GuardType::Normal);
        match record.zone {
            Some(zone) => Guard::new(zone, kind),
            None => Guard::unplaced(kind),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsRecord {
    #[serde(default)]
    pub attempts: u64,
    #[serde(default)]
    pub success: u64,
    #[serde(default)]
    pub fails: u64,
}

impl From<StatsRecord> for AssassinationStats {
    fn from(record: StatsRecord) -> Self {
        AssassinationStats {
            attempts: record.attempts,
            success: record.success,
            fails: record.fails,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_record_wire_shape() {
        let record = GuardRecord::from(&Guard::new(3, GuardType::Shielder));

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            serde_json::json!({"zone": 3, "type": "shielder"})
        );
    }

    #[test]
    fn test_legacy_guard_without_fields() {
        let record: GuardRecord = serde_json::from_str("{}").unwrap();
        let guard = Guard::from(&record);

        assert_eq!(guard.zone(), None);
        assert_eq!(guard.kind(), GuardType::Normal);
    }

    #[test]
    fn test_unplaced_guard_is_saved_without_zone() {
        let record = GuardRecord::from(&Guard::unplaced(GuardType::Sniper));

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            serde_json::json!({"type": "sniper"})
        );
    }

    #[test]
    fn test_unknown_guard_type_fights_as_normal() {
        let record: GuardRecord = serde_json::from_str(r#"{"zone": 2, "type": "ninja"}"#).unwrap();

        assert_eq!(Guard::from(&record).kind(), GuardType::Normal);
    }

    #[test]
    fn test_account_without_loan_fields() {
        let account: AccountRecord = serde_json::from_str(r#"{"bank_points": 500}"#).unwrap();

        assert_eq!(account.bank_points, 500);
        assert_eq!(account.loan_timestamp, None);
    }
}
