//! airdrop-ledger
//!
//! Ledger snapshot → weighted holder tallies → range-partitioned leaderboard.

pub mod leaderboard;
pub mod weighting;

pub use leaderboard::{build_leaderboard, human_amount, range_span};
pub use weighting::{locked_tickets, tally_weights, ticket_weight, HolderTally, Tallies};
