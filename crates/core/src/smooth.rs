//! Chaikin corner-cutting smoothing.
//!
//! Each round replaces every edge with two points at 1/4 and 3/4 of its
//! length. Open paths keep their endpoints as anchors; closed paths wrap the
//! closing edge.

use crate::context::CanvasSettings;
use crate::falloff::{blend_point, calculate_falloff, FalloffParams};
use crate::geometry::{Path, Point};

/// Smoothing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChaikinOptions {
    pub iterations: usize,
    /// Keep the first two and last two points of an open path un-smoothed so
    /// the endpoint tangents survive.
    pub preserve_end_segments: bool,
}

impl Default for ChaikinOptions {
    fn default() -> Self {
        Self {
            iterations: 2,
            preserve_end_segments: false,
        }
    }
}

/// Smooths `path` with `options.iterations` rounds of corner cutting.
///
/// Paths with fewer than two points come back unchanged.
pub fn chaikin(path: &Path, options: ChaikinOptions) -> Path {
    if path.is_degenerate() || options.iterations == 0 {
        return path.clone();
    }
    if path.closed {
        let reclose = path.has_closing_point();
        let mut ring = path.ring().to_vec();
        for _ in 0..options.iterations {
            ring = cut_ring(&ring);
        }
        Path::from_ring(ring, true, reclose)
    } else {
        let mut points = path.points.clone();
        for _ in 0..options.iterations {
            points = if options.preserve_end_segments {
                cut_open_preserving_ends(&points)
            } else {
                cut_open(&points)
            };
        }
        Path::open(points)
    }
}

/// Smooths `path` and blends each smoothed point back toward the original.
///
/// The smoothed path has a different point count, so smoothed point `j` of
/// `m` is paired with the original path sampled at index fraction
/// `j / (m - 1) * (n - 1)`. The falloff strength is taken at that sampled
/// original position. The pairing follows point indices, not arc length.
pub fn chaikin_with_falloff(
    path: &Path,
    options: ChaikinOptions,
    falloff: &FalloffParams,
    canvas: &CanvasSettings,
) -> Path {
    let smoothed = chaikin(path, options);
    if !falloff.enabled || path.is_degenerate() {
        return smoothed;
    }
    let n = path.points.len();
    let m = smoothed.points.len();
    let points = smoothed
        .points
        .iter()
        .enumerate()
        .map(|(j, &target)| {
            let t = if m > 1 {
                j as f64 / (m - 1) as f64 * (n - 1) as f64
            } else {
                0.0
            };
            let original = sample_by_index(&path.points, t);
            let strength = calculate_falloff(original, falloff, canvas);
            blend_point(original, target, strength)
        })
        .collect();
    Path::new(points, smoothed.closed)
}

/// Linear interpolation between `points[floor(t)]` and `points[ceil(t)]`.
pub fn sample_by_index(points: &[Point], t: f64) -> Point {
    let last = points.len().saturating_sub(1);
    let t = t.clamp(0.0, last as f64);
    let i = t.floor() as usize;
    let j = (i + 1).min(last);
    points[i].lerp(points[j], t - i as f64)
}

fn quarter_points(a: Point, b: Point) -> [Point; 2] {
    [a.lerp(b, 0.25), a.lerp(b, 0.75)]
}

fn cut_open(points: &[Point]) -> Vec<Point> {
    let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
        return points.to_vec();
    };
    let mut out = Vec::with_capacity(points.len() * 2);
    out.push(first);
    for w in points.windows(2) {
        out.extend(quarter_points(w[0], w[1]));
    }
    out.push(last);
    out
}

fn cut_open_preserving_ends(points: &[Point]) -> Vec<Point> {
    let n = points.len();
    if n < 4 {
        return points.to_vec();
    }
    let mut out = Vec::with_capacity(n * 2);
    out.extend_from_slice(&points[..2]);
    for w in points[1..n - 1].windows(2) {
        out.extend(quarter_points(w[0], w[1]));
    }
    out.extend_from_slice(&points[n - 2..]);
    out
}

fn cut_ring(ring: &[Point]) -> Vec<Point> {
    let k = ring.len();
    if k < 2 {
        return ring.to_vec();
    }
    (0..k)
        .flat_map(|i| quarter_points(ring[i], ring[(i + 1) % k]))
        .collect()
}
