//! Seams to the collaborators that talk to the chain.
//!
//! The lottery core never fetches anything itself; hosts hand it tickets,
//! block signatures and display names through these traits.

use std::collections::BTreeMap;

use crate::error::AirdropError;
use crate::types::{AccountId, LedgerEntry};

/// Provides the ledger snapshot of staked tickets.
pub trait TicketSource {
    fn tickets(&self) -> Result<Vec<LedgerEntry>, AirdropError>;
}

/// Provides the raw witness signature of a block.
///
/// Implementations must fail rather than return a partial signature.
pub trait SignatureSource {
    fn block_signature(&self, block_number: u64) -> Result<String, AirdropError>;
}

/// Resolves account ids to display names. `None` renders as the unknown placeholder.
pub trait NameLookup {
    fn display_name(&self, account: &str) -> Option<String>;
}

impl NameLookup for BTreeMap<AccountId, String> {
    fn display_name(&self, account: &str) -> Option<String> {
        self.get(account).cloned()
    }
}

impl SignatureSource for BTreeMap<u64, String> {
    fn block_signature(&self, block_number: u64) -> Result<String, AirdropError> {
        self.get(&block_number)
            .cloned()
            .ok_or(AirdropError::SignatureUnavailable(block_number))
    }
}
