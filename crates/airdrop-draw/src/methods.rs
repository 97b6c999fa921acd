//! Registry of draw-number generators.
//!
//! Each method is a pure function of the digit stream. Methods are
//! independently selectable and their outputs are concatenated into one pool
//! in the configured order; the resolver deduplicates later.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use airdrop_core::constants::{
    BEAM_DEPTH, CUBED_CHUNK_WIDTH, HYPERCUBE_CHUNK_WIDTH, PAIR_CHUNK_WIDTH, POINT_CHUNK_WIDTH,
    SLOW_DEPTH,
};
use airdrop_core::error::AirdropError;
use airdrop_core::types::DrawNumber;
use airdrop_entropy::{chunk_values, chunks, reversed_chunk_values, DigitStream};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::{mean_point, sample_along, sample_segment, Point3, Segment3, Step};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionMethod {
    /// 9-digit chunks as-is.
    Forward,
    /// 9-digit chunks with their digits reversed.
    Reverse,
    /// Triangular pairing of chunk square roots scaled by π.
    Pi,
    ReversePi,
    /// 3-digit chunks cubed.
    Cubed,
    /// ⌊3·(√x·π)³⌋ over forward then reversed 5-digit chunks.
    Hypercube,
    /// Lines from every point to the mean point.
    AvgPointLines,
    /// Full-height vertical columns above 6-digit (x, y) pairs.
    AlienBlood,
    /// A ball dropped through the points, bouncing whenever it falls.
    BouncingBall,
    /// One projectile from the first point to the second, unimpeded.
    FishBeam,
    /// One projectile from the first point to the second, decelerating.
    FishSlow,
    /// The first point splinters towards every other point, unimpeded.
    FishSplinterBeam,
    /// The first point splinters towards every other point, decelerating.
    FishSplinterSlow,
}

/// How many projectiles leave the impact point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FishSpread {
    Single,
    Splinter,
}

impl DistributionMethod {
    pub const ALL: [DistributionMethod; 13] = [
        DistributionMethod::Forward,
        DistributionMethod::Reverse,
        DistributionMethod::Pi,
        DistributionMethod::ReversePi,
        DistributionMethod::Cubed,
        DistributionMethod::Hypercube,
        DistributionMethod::AvgPointLines,
        DistributionMethod::AlienBlood,
        DistributionMethod::BouncingBall,
        DistributionMethod::FishBeam,
        DistributionMethod::FishSlow,
        DistributionMethod::FishSplinterBeam,
        DistributionMethod::FishSplinterSlow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DistributionMethod::Forward => "forward",
            DistributionMethod::Reverse => "reverse",
            DistributionMethod::Pi => "pi",
            DistributionMethod::ReversePi => "reverse_pi",
            DistributionMethod::Cubed => "cubed",
            DistributionMethod::Hypercube => "hypercube",
            DistributionMethod::AvgPointLines => "avg_point_lines",
            DistributionMethod::AlienBlood => "alien_blood",
            DistributionMethod::BouncingBall => "bouncing_ball",
            DistributionMethod::FishBeam => "fish_beam",
            DistributionMethod::FishSlow => "fish_slow",
            DistributionMethod::FishSplinterBeam => "fish_splinter_beam",
            DistributionMethod::FishSplinterSlow => "fish_splinter_slow",
        }
    }

    /// Chunk width this method slices the digit stream into.
    pub fn chunk_width(self) -> usize {
        match self {
            DistributionMethod::Cubed => CUBED_CHUNK_WIDTH,
            DistributionMethod::Hypercube => HYPERCUBE_CHUNK_WIDTH,
            DistributionMethod::AlienBlood => PAIR_CHUNK_WIDTH,
            _ => POINT_CHUNK_WIDTH,
        }
    }

    fn fish_params(self) -> Option<(FishSpread, u64)> {
        match self {
            DistributionMethod::FishBeam => Some((FishSpread::Single, BEAM_DEPTH)),
            DistributionMethod::FishSlow => Some((FishSpread::Single, SLOW_DEPTH)),
            DistributionMethod::FishSplinterBeam => Some((FishSpread::Splinter, BEAM_DEPTH)),
            DistributionMethod::FishSplinterSlow => Some((FishSpread::Splinter, SLOW_DEPTH)),
            _ => None,
        }
    }

    /// Generate this method's draw numbers from the digit stream.
    pub fn generate(self, stream: &DigitStream) -> Result<Vec<DrawNumber>, AirdropError> {
        let width = self.chunk_width();
        let draws = match self {
            DistributionMethod::Forward => chunk_values(stream, width),
            DistributionMethod::Reverse => reversed_chunk_values(stream, width),
            DistributionMethod::Pi => pi_products(&chunk_values(stream, width), self.name())?,
            DistributionMethod::ReversePi => {
                pi_products(&reversed_chunk_values(stream, width), self.name())?
            }
            DistributionMethod::Cubed => cubed(&chunk_values(stream, width), self.name())?,
            DistributionMethod::Hypercube => {
                let mut values = chunk_values(stream, width);
                values.extend(reversed_chunk_values(stream, width));
                hypercube(&values, self.name())?
            }
            DistributionMethod::AvgPointLines => avg_point_lines(&points(stream, width)),
            DistributionMethod::AlienBlood => alien_blood(&columns(stream, width)),
            DistributionMethod::BouncingBall => bouncing_ball(&points(stream, width)),
            DistributionMethod::FishBeam
            | DistributionMethod::FishSlow
            | DistributionMethod::FishSplinterBeam
            | DistributionMethod::FishSplinterSlow => {
                let (spread, depth) = self
                    .fish_params()
                    .ok_or_else(|| AirdropError::UnknownMethod(self.name().to_string()))?;
                fish(&points(stream, width), spread, depth)
            }
        };
        debug!(method = self.name(), draws = draws.len(), "method generated");
        Ok(draws)
    }
}

impl fmt::Display for DistributionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistributionMethod {
    type Err = AirdropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        DistributionMethod::ALL
            .into_iter()
            .find(|m| m.name() == wanted)
            .ok_or_else(|| AirdropError::UnknownMethod(s.to_string()))
    }
}

// ── Numeric samplers ─────────────────────────────────────────────────────────

/// ⌊√x⌋ in exact integer arithmetic.
pub fn floor_sqrt(x: u64) -> u64 {
    let mut r = (x as f64).sqrt() as u64;
    while r.checked_mul(r).map_or(true, |sq| sq > x) {
        r -= 1;
    }
    while (r + 1).checked_mul(r + 1).is_some_and(|sq| sq <= x) {
        r += 1;
    }
    r
}

/// Truncate a floating result toward zero, refusing values that cannot be a draw.
fn to_draw(value: f64, method: &str) -> Result<DrawNumber, AirdropError> {
    if !value.is_finite() || value < 0.0 || value >= u64::MAX as f64 {
        return Err(AirdropError::numeric(method, format!("unrepresentable value {value}")));
    }
    Ok(value.trunc() as u64)
}

/// For each i with i ≤ n−1−i and each y in i..=n−1−i: ⌊√C[i]⌋·⌊√C[y]⌋·π, truncated.
pub fn pi_products(values: &[u64], method: &str) -> Result<Vec<DrawNumber>, AirdropError> {
    let n = values.len();
    let roots: Vec<u64> = values.iter().map(|&v| floor_sqrt(v)).collect();
    let mut out = Vec::new();
    for i in 0..n {
        let last = n - 1 - i;
        if i > last {
            break;
        }
        for y in i..=last {
            let product = roots[i]
                .checked_mul(roots[y])
                .ok_or_else(|| AirdropError::numeric(method, "root product overflow"))?;
            out.push(to_draw(product as f64 * PI, method)?);
        }
    }
    Ok(out)
}

pub fn cubed(values: &[u64], method: &str) -> Result<Vec<DrawNumber>, AirdropError> {
    values
        .iter()
        .map(|&x| {
            x.checked_mul(x)
                .and_then(|sq| sq.checked_mul(x))
                .ok_or_else(|| AirdropError::numeric(method, format!("{x}³ overflows")))
        })
        .collect()
}

/// ⌊3·(√x·π)³⌋, evaluated as `s = sqrt(x) * π; 3 * (s * s * s)`.
pub fn hypercube(values: &[u64], method: &str) -> Result<Vec<DrawNumber>, AirdropError> {
    values
        .iter()
        .map(|&x| {
            let s = (x as f64).sqrt() * PI;
            to_draw(3.0 * (s * s * s), method)
        })
        .collect()
}

// ── Geometric samplers ───────────────────────────────────────────────────────

fn points(stream: &DigitStream, width: usize) -> Vec<Point3> {
    chunks(stream.as_str(), width)
        .into_iter()
        .filter_map(|c| Point3::from_chunk(c).ok())
        .collect()
}

fn columns(stream: &DigitStream, width: usize) -> Vec<Point3> {
    chunks(stream.as_str(), width)
        .into_iter()
        .filter_map(|c| Point3::column_from_chunk(c).ok())
        .collect()
}

pub fn avg_point_lines(points: &[Point3]) -> Vec<DrawNumber> {
    let Some(mean) = mean_point(points) else {
        return Vec::new();
    };
    points
        .iter()
        .flat_map(|&p| sample_segment(&Segment3::new(p, mean), BEAM_DEPTH))
        .collect()
}

pub fn alien_blood(columns: &[Point3]) -> Vec<DrawNumber> {
    let count = BEAM_DEPTH;
    columns
        .iter()
        .flat_map(|c| sample_along(&Segment3::vertical(c.x, c.y), count, Step::per(count)))
        .map(Point3::draw_number)
        .collect()
}

/// Points visited by the ball: a ground bounce is inserted between a point and
/// its successor whenever the successor is not higher, and the path ends on
/// the ground below the last point.
pub fn bounce_path(points: &[Point3]) -> Vec<Point3> {
    let Some(&last) = points.last() else {
        return Vec::new();
    };
    let mut path = Vec::with_capacity(points.len() * 2 + 1);
    for pair in points.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        path.push(current);
        if next.z <= current.z {
            path.push(current.ground_midpoint(next));
        }
    }
    path.push(last);
    path.push(last.grounded());
    path
}

pub fn bouncing_ball(points: &[Point3]) -> Vec<DrawNumber> {
    bounce_path(points)
        .windows(2)
        .flat_map(|pair| sample_segment(&Segment3::new(pair[0], pair[1]), BEAM_DEPTH))
        .collect()
}

pub fn fish(points: &[Point3], spread: FishSpread, depth: u64) -> Vec<DrawNumber> {
    let Some((&impact, rest)) = points.split_first() else {
        return Vec::new();
    };
    let targets = match spread {
        FishSpread::Single => &rest[..rest.len().min(1)],
        FishSpread::Splinter => rest,
    };
    targets
        .iter()
        .flat_map(|&target| sample_segment(&Segment3::new(impact, target), depth))
        .collect()
}
