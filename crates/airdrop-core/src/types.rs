use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::constants::{
    LOCK_180_MULTIPLIER, LOCK_360_MULTIPLIER, LOCK_720_MULTIPLIER, LOCK_FOREVER_MULTIPLIER,
    OUTPUT_DECIMALS,
};

/// Chain account identifier, e.g. `1.2.12345`.
pub type AccountId = String;

/// Ticket object identifier, e.g. `1.18.42`.
pub type TicketId = String;

/// One lottery number produced by a distribution method.
pub type DrawNumber = u64;

// ── LockKind ─────────────────────────────────────────────────────────────────

/// Lock duration of a staked ticket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LockKind {
    #[serde(rename = "liquid")]
    Liquid,
    #[serde(rename = "lock_180_days", alias = "lock_180")]
    Lock180,
    #[serde(rename = "lock_360_days", alias = "lock_360")]
    Lock360,
    #[serde(rename = "lock_720_days", alias = "lock_720")]
    Lock720,
    #[serde(rename = "lock_forever")]
    LockForever,
}

impl LockKind {
    /// Weight multiplier for this lock, or `None` for liquid tickets which
    /// never take part in the leaderboard.
    pub fn multiplier(self) -> Option<u64> {
        match self {
            LockKind::Liquid => None,
            LockKind::Lock180 => Some(LOCK_180_MULTIPLIER),
            LockKind::Lock360 => Some(LOCK_360_MULTIPLIER),
            LockKind::Lock720 => Some(LOCK_720_MULTIPLIER),
            LockKind::LockForever => Some(LOCK_FOREVER_MULTIPLIER),
        }
    }

    pub fn is_locked(self) -> bool {
        self != LockKind::Liquid
    }
}

// ── LedgerEntry ──────────────────────────────────────────────────────────────

/// A raw ticket record as returned by the chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: TicketId,
    pub account: AccountId,
    pub current_type: LockKind,
    /// Staked amount in the asset's smallest unit.
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: u64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AmountValue {
    Number(u64),
    Text(String),
}

#[derive(Deserialize)]
struct AssetAmount {
    amount: AmountValue,
    #[allow(dead_code)]
    #[serde(default)]
    asset_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AmountRepr {
    Plain(AmountValue),
    Asset(AssetAmount),
}

/// Accepts `123`, `"123"` or the chain's asset object `{"amount": "123", "asset_id": "1.3.0"}`.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match AmountRepr::deserialize(deserializer)? {
        AmountRepr::Plain(v) => v,
        AmountRepr::Asset(a) => a.amount,
    };
    match value {
        AmountValue::Number(n) => Ok(n),
        AmountValue::Text(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| D::Error::custom(format!("invalid ticket amount: {s:?}"))),
    }
}

// ── Leaderboard ──────────────────────────────────────────────────────────────

/// Inclusive integer range `[from, to]` owned by one leaderboard entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub from: u64,
    pub to: u64,
}

impl Range {
    pub fn contains(&self, n: u64) -> bool {
        self.from <= n && n <= self.to
    }

    /// Number of integers covered (always ≥ 1).
    pub fn size(&self) -> u64 {
        self.to - self.from + 1
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.from, self.to)
    }
}

/// One holder on the leaderboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: AccountId,
    /// Weighted total in whole tokens, 5 decimal places.
    pub amount: f64,
    pub name: String,
    pub tickets: Vec<TicketId>,
    pub percent: f64,
    pub range: Range,
}

// ── Airdrop artifact ─────────────────────────────────────────────────────────

/// Lottery outcome for one leaderboard entry with at least one hit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WinnerRecord {
    pub id: AccountId,
    pub name: String,
    /// Sorted, distinct winning draw numbers.
    pub numbers: Vec<DrawNumber>,
    pub count: usize,
    pub percent: f64,
    pub reward: f64,
}

/// The published audit artifact of one airdrop run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AirdropResult {
    pub result: Vec<WinnerRecord>,
    pub block_number: u64,
    pub generation_methods: Vec<String>,
    pub total_distributed: f64,
    pub hash: String,
    pub normalization: String,
    /// Size of the normalized draw pool (the percent denominator).
    pub total_draws: usize,
}

/// Round to the fixed number of published decimal places (half away from zero).
pub fn round_fixed(value: f64) -> f64 {
    let scale = 10f64.powi(OUTPUT_DECIMALS);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_accepts_asset_object_and_plain_forms() {
        let json = r#"[
            {"id": "1.18.1", "account": "1.2.10", "current_type": "lock_180_days",
             "amount": {"amount": "250000", "asset_id": "1.3.0"}},
            {"id": "1.18.2", "account": "1.2.11", "current_type": "lock_forever", "amount": 42},
            {"id": "1.18.3", "account": "1.2.12", "current_type": "liquid", "amount": "7"}
        ]"#;
        let entries: Vec<LedgerEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries[0].amount, 250_000);
        assert_eq!(entries[0].current_type, LockKind::Lock180);
        assert_eq!(entries[1].amount, 42);
        assert_eq!(entries[2].amount, 7);
        assert_eq!(entries[2].current_type, LockKind::Liquid);
    }

    #[test]
    fn short_lock_aliases_parse() {
        let kind: LockKind = serde_json::from_str("\"lock_360\"").unwrap();
        assert_eq!(kind, LockKind::Lock360);
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"lock_360_days\"");
    }

    #[test]
    fn negative_or_garbage_amount_is_rejected() {
        let bad = r#"{"id": "1.18.1", "account": "1.2.10", "current_type": "lock_180_days", "amount": "-5"}"#;
        assert!(serde_json::from_str::<LedgerEntry>(bad).is_err());
        let bad = r#"{"id": "1.18.1", "account": "1.2.10", "current_type": "lock_180_days", "amount": -5}"#;
        assert!(serde_json::from_str::<LedgerEntry>(bad).is_err());
    }

    #[test]
    fn multipliers_match_lock_durations() {
        assert_eq!(LockKind::Liquid.multiplier(), None);
        assert_eq!(LockKind::Lock180.multiplier(), Some(2));
        assert_eq!(LockKind::Lock360.multiplier(), Some(4));
        assert_eq!(LockKind::Lock720.multiplier(), Some(8));
        assert_eq!(LockKind::LockForever.multiplier(), Some(8));
    }

    #[test]
    fn round_fixed_keeps_five_decimals() {
        assert_eq!(round_fixed(100.0 / 3.0), 33.33333);
        assert_eq!(round_fixed(2.0 / 3.0), 0.66667);
        assert_eq!(round_fixed(12.5), 12.5);
    }

    #[test]
    fn range_is_inclusive() {
        let r = Range { from: 101, to: 121 };
        assert!(r.contains(101));
        assert!(r.contains(121));
        assert!(!r.contains(122));
        assert_eq!(r.size(), 21);
    }
}
