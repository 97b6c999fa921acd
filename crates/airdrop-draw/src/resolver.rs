//! Mapping pooled draw numbers onto leaderboard ranges.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use airdrop_core::error::AirdropError;
use airdrop_core::types::{round_fixed, DrawNumber, LeaderboardEntry, WinnerRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// What happens to draws beyond the highest leaderboard bound.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// Reduce out-of-range draws modulo the highest bound.
    #[default]
    Wraparound,
    /// Leave draws untouched; out-of-range draws simply miss.
    Strict,
}

impl Normalization {
    pub fn as_str(self) -> &'static str {
        match self {
            Normalization::Wraparound => "wraparound",
            Normalization::Strict => "strict",
        }
    }
}

impl fmt::Display for Normalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Normalization {
    type Err = AirdropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wraparound" | "wrap" => Ok(Normalization::Wraparound),
            "strict" => Ok(Normalization::Strict),
            other => Err(AirdropError::UnknownNormalization(other.to_string())),
        }
    }
}

/// Winners plus the bookkeeping needed for the audit artifact.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub winners: Vec<WinnerRecord>,
    /// Distinct normalized draws: the percent denominator.
    pub total_draws: usize,
    /// Draws that fell outside every range.
    pub unmatched: usize,
}

/// Remove repeated draws, keeping the first occurrence of each.
pub fn dedup_draws(draws: &[DrawNumber]) -> Vec<DrawNumber> {
    let mut seen = BTreeSet::new();
    draws.iter().copied().filter(|n| seen.insert(*n)).collect()
}

/// `n - ⌊n / max⌋ · max` for draws above `max`; everything else passes through.
/// A zero bound leaves a single target, so every draw maps to 0.
pub fn wrap(n: DrawNumber, max: DrawNumber) -> DrawNumber {
    if max == 0 {
        0
    } else if n > max {
        n % max
    } else {
        n
    }
}

/// Deduplicate, normalize, and deduplicate again in case wraparound folded
/// two draws onto the same number.
pub fn normalize_pool(
    draws: &[DrawNumber],
    mode: Normalization,
    max: DrawNumber,
) -> Vec<DrawNumber> {
    let unique = dedup_draws(draws);
    match mode {
        Normalization::Strict => unique,
        Normalization::Wraparound => {
            let wrapped: Vec<_> = unique.iter().map(|&n| wrap(n, max)).collect();
            dedup_draws(&wrapped)
        }
    }
}

/// Indices of `board` sorted by range start, after checking ranges are disjoint.
fn range_index(board: &[LeaderboardEntry]) -> Result<Vec<usize>, AirdropError> {
    let mut order: Vec<usize> = (0..board.len()).collect();
    order.sort_by_key(|&i| board[i].range.from);
    for pair in order.windows(2) {
        let (a, b) = (&board[pair[0]], &board[pair[1]]);
        if a.range.to >= b.range.from {
            return Err(AirdropError::InvalidLeaderboard(format!(
                "ranges of {} {} and {} {} overlap",
                a.id, a.range, b.id, b.range
            )));
        }
    }
    if let Some(bad) = board.iter().find(|e| e.range.from > e.range.to) {
        return Err(AirdropError::InvalidLeaderboard(format!(
            "range of {} is inverted: {}",
            bad.id, bad.range
        )));
    }
    Ok(order)
}

/// Position in `board` of the entry whose range holds `n`.
fn locate(board: &[LeaderboardEntry], order: &[usize], n: DrawNumber) -> Option<usize> {
    let pos = order.partition_point(|&i| board[i].range.from <= n);
    let candidate = order[pos.checked_sub(1)?];
    board[candidate].range.contains(n).then_some(candidate)
}

/// Resolve pooled draws against the leaderboard.
///
/// # Errors
/// `EmptyLeaderboard` for an empty board, `InvalidLeaderboard` for
/// overlapping or inverted ranges, `NoValidDraws` for an empty pool.
pub fn resolve_winners(
    pool: &[DrawNumber],
    board: &[LeaderboardEntry],
    mode: Normalization,
    reward_pool: f64,
) -> Result<Resolution, AirdropError> {
    if board.is_empty() {
        return Err(AirdropError::EmptyLeaderboard);
    }
    let order = range_index(board)?;
    // Ranges are disjoint and sorted by start, so the last one ends highest.
    let max = order.last().map_or(0, |&i| board[i].range.to);

    let draws = normalize_pool(pool, mode, max);
    if draws.is_empty() {
        return Err(AirdropError::NoValidDraws);
    }

    let mut hits: Vec<Vec<DrawNumber>> = vec![Vec::new(); board.len()];
    let mut unmatched = 0usize;
    for &n in &draws {
        match locate(board, &order, n) {
            Some(i) => hits[i].push(n),
            None => unmatched += 1,
        }
    }

    let total = draws.len();
    let winners: Vec<WinnerRecord> = board
        .iter()
        .zip(hits)
        .filter(|(_, numbers)| !numbers.is_empty())
        .map(|(entry, mut numbers)| {
            numbers.sort_unstable();
            let percent = round_fixed(numbers.len() as f64 / total as f64 * 100.0);
            WinnerRecord {
                id: entry.id.clone(),
                name: entry.name.clone(),
                count: numbers.len(),
                numbers,
                percent,
                reward: round_fixed(percent / 100.0 * reward_pool),
            }
        })
        .collect();

    debug!(pooled = pool.len(), normalized = total, unmatched, "draws resolved");
    info!(
        winners = winners.len(),
        total_draws = total,
        mode = %mode,
        "winners resolved"
    );
    Ok(Resolution {
        winners,
        total_draws: total,
        unmatched,
    })
}
