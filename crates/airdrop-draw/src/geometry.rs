//! Integer geometry inside the sampling cube [0, 999]³.
//!
//! Every geometric distribution method reduces to: build points from chunks,
//! connect them with segments, sample each segment at evenly spaced
//! parametric offsets, and read each sampled point back as one draw number.
//! Interpolation is done in exact integer arithmetic (truncating toward zero)
//! so results do not depend on floating-point behaviour.

use airdrop_core::constants::{AXIS_MAX, COORD_WIDTH, MAX_DISTANCE_SQ};
use airdrop_core::error::AirdropError;
use airdrop_core::types::DrawNumber;
use airdrop_entropy::parse_chunk;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point3 {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl Point3 {
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// Build a point from a 9-digit chunk: x = digits 0..3, y = 3..6, z = 6..9.
    pub fn from_chunk(text: &str) -> Result<Self, AirdropError> {
        let [x, y, z] = coords::<3>(text)?;
        Ok(Self::new(x, y, z))
    }

    /// Build a ground-level point from a 6-digit chunk: x = digits 0..3, y = 3..6.
    pub fn column_from_chunk(text: &str) -> Result<Self, AirdropError> {
        let [x, y] = coords::<2>(text)?;
        Ok(Self::new(x, y, 0))
    }

    /// The same (x, y) position at z = 0.
    pub fn grounded(self) -> Self {
        Self { z: 0, ..self }
    }

    /// Ground point halfway between two points in the horizontal plane.
    pub fn ground_midpoint(self, other: Point3) -> Self {
        Self::new((self.x + other.x) / 2, (self.y + other.y) / 2, 0)
    }

    /// `z·10⁶ + y·10³ + x`: the three 3-digit coordinates read as one number.
    pub fn draw_number(self) -> DrawNumber {
        u64::from(self.z) * 1_000_000 + u64::from(self.y) * 1_000 + u64::from(self.x)
    }

    pub fn distance_sq(self, other: Point3) -> u64 {
        let d = |a: u32, b: u32| {
            let diff = u64::from(a.abs_diff(b));
            diff * diff
        };
        d(self.x, other.x) + d(self.y, other.y) + d(self.z, other.z)
    }
}

fn coords<const N: usize>(text: &str) -> Result<[u32; N], AirdropError> {
    if text.len() != N * COORD_WIDTH || !text.is_ascii() {
        return Err(AirdropError::MalformedChunk(text.to_string()));
    }
    let mut out = [0u32; N];
    for (i, slot) in out.iter_mut().enumerate() {
        let part = &text[i * COORD_WIDTH..(i + 1) * COORD_WIDTH];
        // Three digits always fit in u32.
        *slot = parse_chunk(part)? as u32;
    }
    Ok(out)
}

/// Coordinate-wise mean of the points, truncated. `None` for an empty slice.
pub fn mean_point(points: &[Point3]) -> Option<Point3> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as u64;
    let sum = |f: fn(&Point3) -> u32| points.iter().map(|p| u64::from(f(p))).sum::<u64>();
    Some(Point3::new(
        (sum(|p| p.x) / n) as u32,
        (sum(|p| p.y) / n) as u32,
        (sum(|p| p.z) / n) as u32,
    ))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment3 {
    pub start: Point3,
    pub end: Point3,
}

impl Segment3 {
    pub const fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    /// Full-height column from (x, y, 0) to (x, y, 999).
    pub fn vertical(x: u32, y: u32) -> Self {
        Self::new(Point3::new(x, y, 0), Point3::new(x, y, AXIS_MAX as u32))
    }

    pub fn distance_sq(&self) -> u64 {
        self.start.distance_sq(self.end)
    }
}

/// Parametric increment `num / den` between consecutive samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    num: u64,
    den: u64,
}

impl Step {
    /// `1 / count`: `count` samples land evenly on the segment, the last one on its end.
    pub fn per(count: u64) -> Self {
        Self {
            num: 1,
            den: count.max(1),
        }
    }

    pub fn ratio(num: u64, den: u64) -> Option<Self> {
        (den > 0).then_some(Self { num, den })
    }
}

/// `⌊distance_sq × depth / (999² × 3)⌋`: longer segments get more samples.
pub fn sample_quantity(segment: &Segment3, depth: u64) -> u64 {
    segment.distance_sq() * depth / MAX_DISTANCE_SQ
}

/// Sample `count` points at offsets `step × i` for i = 1..=count.
///
/// Each axis is interpolated independently and truncated toward zero.
/// Offsets past the segment end are clamped to the cube.
pub fn sample_along(segment: &Segment3, count: u64, step: Step) -> Vec<Point3> {
    // The whole coordinate is divided once so it truncates toward zero on
    // descending axes too, not just the delta.
    let lerp = |a: u32, b: u32, t_num: u64| -> u32 {
        let (a, b, den) = (i128::from(a), i128::from(b), i128::from(step.den));
        let v = (a * den + (b - a) * i128::from(t_num)) / den;
        v.clamp(0, i128::from(AXIS_MAX)) as u32
    };
    (1..=count)
        .map(|i| {
            let t = step.num * i;
            Point3::new(
                lerp(segment.start.x, segment.end.x, t),
                lerp(segment.start.y, segment.end.y, t),
                lerp(segment.start.z, segment.end.z, t),
            )
        })
        .collect()
}

/// Sample a segment with a distance-scaled quantity and evenly spread offsets,
/// returning draw numbers.
pub fn sample_segment(segment: &Segment3, depth: u64) -> Vec<DrawNumber> {
    let count = sample_quantity(segment, depth);
    sample_along(segment, count, Step::per(count))
        .into_iter()
        .map(Point3::draw_number)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use airdrop_core::constants::BEAM_DEPTH;

    #[test]
    fn chunk_to_point() {
        let p = Point3::from_chunk("001020300").unwrap();
        assert_eq!(p, Point3::new(1, 20, 300));
        assert_eq!(p.draw_number(), 300_020_001);
        assert!(Point3::from_chunk("12345").is_err());
        assert_eq!(
            Point3::column_from_chunk("999000").unwrap(),
            Point3::new(999, 0, 0)
        );
    }

    #[test]
    fn diagonal_gets_full_depth() {
        let seg = Segment3::new(Point3::new(0, 0, 0), Point3::new(999, 999, 999));
        assert_eq!(seg.distance_sq(), MAX_DISTANCE_SQ);
        assert_eq!(sample_quantity(&seg, BEAM_DEPTH), 999);
        assert_eq!(sample_quantity(&seg, 333), 333);
    }

    #[test]
    fn short_segment_gets_nothing() {
        let seg = Segment3::new(Point3::new(10, 10, 10), Point3::new(11, 11, 11));
        assert_eq!(sample_quantity(&seg, BEAM_DEPTH), 0);
        assert!(sample_segment(&seg, BEAM_DEPTH).is_empty());
    }

    #[test]
    fn vertical_column_hits_every_height() {
        let seg = Segment3::vertical(5, 7);
        let points = sample_along(&seg, 999, Step::per(999));
        assert_eq!(points.len(), 999);
        for (i, p) in points.iter().enumerate() {
            assert_eq!((p.x, p.y, p.z), (5, 7, i as u32 + 1));
        }
    }

    #[test]
    fn interpolation_truncates_toward_zero() {
        let seg = Segment3::new(Point3::new(999, 0, 10), Point3::new(0, 10, 0));
        let points = sample_along(&seg, 3, Step::per(3));
        assert_eq!(points[0], Point3::new(666, 3, 6));
        assert_eq!(points[1], Point3::new(333, 6, 3));
        assert_eq!(points[2], Point3::new(0, 10, 0));
    }

    #[test]
    fn descending_axis_truncates_the_coordinate() {
        let down = Segment3::new(Point3::new(0, 0, 10), Point3::new(0, 0, 0));
        let up = Segment3::new(Point3::new(0, 0, 0), Point3::new(0, 0, 10));
        let z = |seg: &Segment3| -> Vec<u32> {
            sample_along(seg, 3, Step::per(3)).iter().map(|p| p.z).collect()
        };
        // 20/3 and 10/3 on the way down, 10/3 and 20/3 on the way up.
        assert_eq!(z(&down), vec![6, 3, 0]);
        assert_eq!(z(&up), vec![3, 6, 10]);
    }

    #[test]
    fn overshooting_step_is_clamped() {
        let seg = Segment3::new(Point3::new(0, 0, 0), Point3::new(600, 600, 600));
        let step = Step::ratio(1, 1).unwrap();
        let points = sample_along(&seg, 2, step);
        assert_eq!(points[1], Point3::new(999, 999, 999));
        assert!(Step::ratio(1, 0).is_none());
    }

    #[test]
    fn mean_is_truncated() {
        let pts = [Point3::new(0, 1, 2), Point3::new(1, 2, 4)];
        assert_eq!(mean_point(&pts), Some(Point3::new(0, 1, 3)));
        assert_eq!(mean_point(&[]), None);
    }
}
