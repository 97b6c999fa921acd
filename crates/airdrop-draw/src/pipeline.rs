//! End-to-end airdrop run: signature → digit stream → draws → winners.

use airdrop_core::error::AirdropError;
use airdrop_core::types::{AirdropResult, DrawNumber, LeaderboardEntry};
use airdrop_entropy::{DigitStream, HashMode};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::methods::DistributionMethod;
use crate::resolver::{resolve_winners, Normalization};

/// Everything that shapes an airdrop besides its inputs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirdropConfig {
    /// Pre-hash applied to the block signature.
    pub hash: HashMode,
    /// Selected methods, pooled in this order.
    pub methods: Vec<DistributionMethod>,
    pub normalization: Normalization,
    /// Amount of the airdropped asset shared among winners.
    pub reward_pool: f64,
}

impl Default for AirdropConfig {
    fn default() -> Self {
        Self {
            hash: HashMode::None,
            methods: vec![DistributionMethod::Forward],
            normalization: Normalization::Wraparound,
            reward_pool: 0.0,
        }
    }
}

impl AirdropConfig {
    pub fn method_names(&self) -> Vec<String> {
        self.methods.iter().map(|m| m.name().to_string()).collect()
    }

    pub fn validate(&self) -> Result<(), AirdropError> {
        if !self.reward_pool.is_finite() || self.reward_pool < 0.0 {
            return Err(AirdropError::InvalidAmount(format!(
                "reward pool must be a non-negative number, got {}",
                self.reward_pool
            )));
        }
        Ok(())
    }
}

/// Output of one method, kept apart for auditing before pooling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MethodDraws {
    pub method: DistributionMethod,
    pub numbers: Vec<DrawNumber>,
}

pub fn generate_draws(
    stream: &DigitStream,
    methods: &[DistributionMethod],
) -> Result<Vec<MethodDraws>, AirdropError> {
    methods
        .iter()
        .map(|&method| {
            Ok(MethodDraws {
                method,
                numbers: method.generate(stream)?,
            })
        })
        .collect()
}

/// Concatenate method outputs in selection order.
pub fn pooled(draws: &[MethodDraws]) -> Vec<DrawNumber> {
    draws.iter().flat_map(|d| d.numbers.iter().copied()).collect()
}

/// Run the full lottery for one block against a leaderboard.
pub fn run_airdrop(
    board: &[LeaderboardEntry],
    signature: &str,
    block_number: u64,
    config: &AirdropConfig,
) -> Result<AirdropResult, AirdropError> {
    config.validate()?;
    let stream = DigitStream::from_signature(signature, config.hash);
    let draws = generate_draws(&stream, &config.methods)?;
    let pool = pooled(&draws);

    info!(
        block_number,
        methods = ?config.method_names(),
        pooled = pool.len(),
        "draw pool generated"
    );

    let resolution = resolve_winners(&pool, board, config.normalization, config.reward_pool)?;

    Ok(AirdropResult {
        result: resolution.winners,
        block_number,
        generation_methods: config.method_names(),
        total_distributed: config.reward_pool,
        hash: config.hash.to_string(),
        normalization: config.normalization.to_string(),
        total_draws: resolution.total_draws,
    })
}
