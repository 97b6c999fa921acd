//! Leaderboard partitioning.
//!
//! Holders are ordered by weight (descending, ties by account id) and each is
//! given the inclusive range `[from, from + round(tokens)]`. The cursor then
//! moves past the range's end, so ranges never overlap and the next holder
//! starts on the following integer. The ranges are the lottery's target zones.

use std::cmp::Ordering;

use airdrop_core::constants::{UNITS_PER_TOKEN, UNKNOWN_NAME};
use airdrop_core::error::AirdropError;
use airdrop_core::source::NameLookup;
use airdrop_core::types::{round_fixed, LeaderboardEntry, Range};
use tracing::info;

use crate::weighting::Tallies;

/// Weight in whole tokens, rounded to 5 decimals.
pub fn human_amount(weight: u64) -> f64 {
    round_fixed(weight as f64 / UNITS_PER_TOKEN as f64)
}

/// `round(weight / UNITS_PER_TOKEN)`, half away from zero, in exact integers.
pub fn range_span(weight: u64) -> u64 {
    let whole = weight / UNITS_PER_TOKEN;
    let rest = weight % UNITS_PER_TOKEN;
    if rest * 2 >= UNITS_PER_TOKEN {
        whole + 1
    } else {
        whole
    }
}

/// Build the ordered, range-partitioned leaderboard.
///
/// # Errors
/// `AirdropError::EmptyLeaderboard` if the total weight is zero.
pub fn build_leaderboard(
    tallies: &Tallies,
    names: Option<&dyn NameLookup>,
) -> Result<Vec<LeaderboardEntry>, AirdropError> {
    let total: u128 = tallies.values().map(|t| u128::from(t.weight)).sum();
    if total == 0 {
        return Err(AirdropError::EmptyLeaderboard);
    }

    let mut ordered: Vec<_> = tallies.iter().collect();
    ordered.sort_by(|(a_id, a), (b_id, b)| match b.weight.cmp(&a.weight) {
        Ordering::Equal => a_id.cmp(b_id),
        other => other,
    });

    let mut cursor: u64 = 0;
    let mut leaderboard = Vec::with_capacity(ordered.len());
    for (account, tally) in ordered {
        let to = cursor
            .checked_add(range_span(tally.weight))
            .ok_or_else(|| AirdropError::numeric("leaderboard", "range bound overflow"))?;
        let name = names
            .and_then(|n| n.display_name(account))
            .unwrap_or_else(|| UNKNOWN_NAME.to_string());

        leaderboard.push(LeaderboardEntry {
            id: account.clone(),
            amount: human_amount(tally.weight),
            name,
            tickets: tally.tickets.clone(),
            percent: round_fixed(tally.weight as f64 / total as f64 * 100.0),
            range: Range { from: cursor, to },
        });
        cursor = to.saturating_add(1);
    }

    info!(
        holders = leaderboard.len(),
        max_bound = cursor.saturating_sub(1),
        "leaderboard partitioned"
    );
    Ok(leaderboard)
}
