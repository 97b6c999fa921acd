/// ─── Ticket Airdrop Constants ───────────────────────────────────────────────
///
/// Amounts on chain are integers in the asset's smallest unit. The core asset
/// carries 5 decimal places, so 1 whole token = 100,000 units.

// ── Amounts ──────────────────────────────────────────────────────────────────

/// Decimal places of the core asset.
pub const ASSET_PRECISION: u32 = 5;

/// 1 whole token expressed in smallest units (10^ASSET_PRECISION).
pub const UNITS_PER_TOKEN: u64 = 10u64.pow(ASSET_PRECISION);

/// Fixed decimal places used for every published monetary or percent field.
pub const OUTPUT_DECIMALS: i32 = 5;

/// Display name used when an account id cannot be resolved.
pub const UNKNOWN_NAME: &str = "???";

// ── Lock multipliers ─────────────────────────────────────────────────────────

pub const LOCK_180_MULTIPLIER: u64 = 2;
pub const LOCK_360_MULTIPLIER: u64 = 4;
pub const LOCK_720_MULTIPLIER: u64 = 8;
pub const LOCK_FOREVER_MULTIPLIER: u64 = 8;

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Largest coordinate value on each axis of the sampling cube [0, 999]³.
pub const AXIS_MAX: u64 = 999;

/// Squared length of the cube's main diagonal: 999² × 3.
pub const MAX_DISTANCE_SQ: u64 = AXIS_MAX * AXIS_MAX * 3;

/// Sampling depth of an unimpeded line (also the fixed vertical sample count).
pub const BEAM_DEPTH: u64 = 999;

/// Sampling depth of a decelerating projectile.
pub const SLOW_DEPTH: u64 = 333;

// ── Chunk widths ─────────────────────────────────────────────────────────────

pub const POINT_CHUNK_WIDTH: usize = 9;
pub const PAIR_CHUNK_WIDTH: usize = 6;
pub const HYPERCUBE_CHUNK_WIDTH: usize = 5;
pub const CUBED_CHUNK_WIDTH: usize = 3;
pub const COORD_WIDTH: usize = 3;
