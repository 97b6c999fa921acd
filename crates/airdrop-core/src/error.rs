use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AirdropError {
    // ── Leaderboard / resolution ─────────────────────────────────────────────
    #[error("empty leaderboard: total ticket weight is zero")]
    EmptyLeaderboard,

    #[error("no valid draws: the normalized draw pool is empty")]
    NoValidDraws,

    #[error("invalid leaderboard: {0}")]
    InvalidLeaderboard(String),

    // ── Ledger input ─────────────────────────────────────────────────────────
    #[error("invalid ticket amount: {0}")]
    InvalidAmount(String),

    #[error("weight overflow on ticket {ticket}: {amount} × {multiplier}")]
    AmountOverflow {
        ticket: String,
        amount: u64,
        multiplier: u64,
    },

    // ── Entropy / sampling ───────────────────────────────────────────────────
    #[error("malformed chunk: {0:?}")]
    MalformedChunk(String),

    #[error("numeric domain error in {method}: {detail}")]
    NumericDomain { method: String, detail: String },

    #[error("signature unavailable for block {0}")]
    SignatureUnavailable(u64),

    // ── Configuration ────────────────────────────────────────────────────────
    #[error("unknown distribution method: {0}")]
    UnknownMethod(String),

    #[error("unknown hash mode: {0}")]
    UnknownHashMode(String),

    #[error("unknown normalization mode: {0}")]
    UnknownNormalization(String),

    // ── Serialization / storage ──────────────────────────────────────────────
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("io error: {0}")]
    Io(String),
}

impl AirdropError {
    /// Shorthand for a `NumericDomain` error raised by a named sampler.
    pub fn numeric(method: &str, detail: impl Into<String>) -> Self {
        Self::NumericDomain {
            method: method.to_string(),
            detail: detail.into(),
        }
    }
}
