use std::collections::{BTreeMap, BTreeSet};

use airdrop_core::error::AirdropError;
use airdrop_core::types::{AccountId, LedgerEntry, TicketId};
use tracing::{info, warn};

/// Accumulated weight and contributing tickets of one holder.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HolderTally {
    /// Σ amount × lock multiplier, in smallest units.
    pub weight: u64,
    /// Ticket ids in snapshot order.
    pub tickets: Vec<TicketId>,
}

/// Holder → tally, ordered by account id.
pub type Tallies = BTreeMap<AccountId, HolderTally>;

/// Weighted amount of a single ticket, or `None` for liquid tickets.
pub fn ticket_weight(entry: &LedgerEntry) -> Result<Option<u64>, AirdropError> {
    let Some(multiplier) = entry.current_type.multiplier() else {
        return Ok(None);
    };
    entry
        .amount
        .checked_mul(multiplier)
        .map(Some)
        .ok_or_else(|| AirdropError::AmountOverflow {
            ticket: entry.id.clone(),
            amount: entry.amount,
            multiplier,
        })
}

/// The non-liquid part of a snapshot, duplicates removed.
pub fn locked_tickets(entries: &[LedgerEntry]) -> Vec<LedgerEntry> {
    let mut seen = BTreeSet::new();
    entries
        .iter()
        .filter(|e| e.current_type.is_locked())
        .filter(|e| seen.insert(e.id.as_str()))
        .cloned()
        .collect()
}

/// Sum weighted amounts per holder.
///
/// Liquid tickets are ignored. A ticket id seen twice only counts once.
pub fn tally_weights(entries: &[LedgerEntry]) -> Result<Tallies, AirdropError> {
    let mut tallies = Tallies::new();
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut liquid = 0usize;

    for entry in entries {
        if !seen.insert(entry.id.as_str()) {
            warn!(ticket = %entry.id, "duplicate ticket skipped");
            continue;
        }
        let Some(weight) = ticket_weight(entry)? else {
            liquid += 1;
            continue;
        };

        let tally = tallies.entry(entry.account.clone()).or_default();
        tally.weight = tally
            .weight
            .checked_add(weight)
            .ok_or_else(|| AirdropError::AmountOverflow {
                ticket: entry.id.clone(),
                amount: entry.amount,
                multiplier: entry.current_type.multiplier().unwrap_or(1),
            })?;
        tally.tickets.push(entry.id.clone());
    }

    info!(
        tickets = entries.len(),
        liquid,
        holders = tallies.len(),
        "ticket weights tallied"
    );
    Ok(tallies)
}
