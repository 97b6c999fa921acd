use std::path::PathBuf;

use airdrop_core::error::AirdropError;
use airdrop_draw::{AirdropConfig, DistributionMethod, Normalization};
use airdrop_entropy::HashMode;
use clap::Args;

use crate::sources::load_json;

/// Draw options shared by the `airdrop` and `draws` commands.
/// Flags override values from `--config`.
#[derive(Args, Debug, Clone, Default)]
pub struct DrawOptions {
    /// JSON file with `hash`, `methods`, `normalization`, `reward_pool`.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Signature pre-hash: none, sha512 (hash-512), sha256 (hash-256).
    #[arg(long)]
    pub hash: Option<HashMode>,

    /// Distribution methods, comma-separated (see `airdrop methods`).
    #[arg(long, value_delimiter = ',')]
    pub methods: Option<Vec<DistributionMethod>>,

    /// Out-of-range handling: wraparound or strict.
    #[arg(long)]
    pub normalization: Option<Normalization>,

    /// Amount shared among winners.
    #[arg(long)]
    pub reward_pool: Option<f64>,
}

impl DrawOptions {
    pub fn resolve(&self) -> Result<AirdropConfig, AirdropError> {
        let mut config = match &self.config {
            Some(path) => load_json::<AirdropConfig>(path)?,
            None => AirdropConfig::default(),
        };
        if let Some(hash) = self.hash {
            config.hash = hash;
        }
        if let Some(methods) = &self.methods {
            config.methods = methods.clone();
        }
        if let Some(normalization) = self.normalization {
            config.normalization = normalization;
        }
        if let Some(pool) = self.reward_pool {
            config.reward_pool = pool;
        }
        config.validate()?;
        Ok(config)
    }
}
