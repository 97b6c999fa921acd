//! airdrop-draw
//!
//! The lottery engine: distribution methods over a block's digit stream,
//! the geometry they share, and resolution of draws against the leaderboard.

pub mod geometry;
pub mod methods;
pub mod pipeline;
pub mod resolver;

pub use geometry::{sample_along, sample_quantity, Point3, Segment3, Step};
pub use methods::DistributionMethod;
pub use pipeline::{generate_draws, pooled, run_airdrop, AirdropConfig, MethodDraws};
pub use resolver::{normalize_pool, resolve_winners, Normalization, Resolution};
