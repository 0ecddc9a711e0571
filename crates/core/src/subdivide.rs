//! Edge subdivision: uniform or length-adaptive resampling.

use crate::geometry::{Path, Point};

/// Shortest segment length an adaptive subdivision will aim for.
const MIN_SEGMENT_FLOOR: f64 = 1e-6;

/// How many pieces each edge is split into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SubdivisionMode {
    /// Every edge split into the same number of pieces.
    Uniform { divisions: usize },
    /// `floor(edge_length / min_segment_length)` pieces, clamped to
    /// `[1, max_divisions]`.
    Adaptive {
        min_segment_length: f64,
        max_divisions: usize,
    },
}

impl SubdivisionMode {
    /// Number of pieces for an edge of `length`.
    pub fn divisions_for(&self, length: f64) -> usize {
        match *self {
            SubdivisionMode::Uniform { divisions } => divisions.max(1),
            SubdivisionMode::Adaptive {
                min_segment_length,
                max_divisions,
            } => adaptive_divisions(length, min_segment_length, max_divisions),
        }
    }
}

/// `floor(length / min_segment_length)` clamped to `[1, max_divisions]`.
///
/// Zero-length edges get one division; a non-positive minimum length is
/// raised to a tiny floor so long edges saturate at `max_divisions`.
pub fn adaptive_divisions(length: f64, min_segment_length: f64, max_divisions: usize) -> usize {
    let max_divisions = max_divisions.max(1);
    if length.is_nan() || length <= 0.0 {
        return 1;
    }
    let raw = (length / min_segment_length.max(MIN_SEGMENT_FLOOR)).floor();
    if raw >= max_divisions as f64 {
        max_divisions
    } else {
        (raw as usize).max(1)
    }
}

/// Inserts evenly spaced interior points on every edge of `path`.
///
/// Closed paths also subdivide their closing edge. Shared endpoints appear
/// once. Paths with fewer than two points come back unchanged.
pub fn subdivide(path: &Path, mode: SubdivisionMode) -> Path {
    if path.is_degenerate() {
        return path.clone();
    }
    if !path.closed {
        let mut out = vec![path.points[0]];
        for w in path.points.windows(2) {
            push_edge(&mut out, w[0], w[1], mode, true);
        }
        return Path::open(out);
    }

    let reclose = path.has_closing_point();
    let ring = path.ring();
    let mut out = vec![ring[0]];
    for w in ring.windows(2) {
        push_edge(&mut out, w[0], w[1], mode, true);
    }
    // Closing edge: interior points only, the ring start is already present.
    push_edge(&mut out, ring[ring.len() - 1], ring[0], mode, false);
    Path::from_ring(out, true, reclose)
}

/// Appends the points after `a` along `a -> b`, ending with `b` when
/// `include_end` is set.
fn push_edge(out: &mut Vec<Point>, a: Point, b: Point, mode: SubdivisionMode, include_end: bool) {
    let d = mode.divisions_for(a.distance(b));
    out.extend((1..d).map(|k| a.lerp(b, k as f64 / d as f64)));
    if include_end {
        out.push(b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(divisions: usize) -> SubdivisionMode {
        SubdivisionMode::Uniform { divisions }
    }

    fn triangle(with_closing_point: bool) -> Path {
        let mut pts = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
        ];
        if with_closing_point {
            pts.push(pts[0]);
        }
        Path::closed(pts)
    }

    #[test]
    fn uniform_open_point_count() {
        let path = Path::open(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ]);
        let out = subdivide(&path, uniform(4));
        assert_eq!(out.len(), (3 - 1) * 4 + 1);
        assert_eq!(out.points[4], Point::new(10.0, 0.0));
        assert_eq!(out.points[2], Point::new(5.0, 0.0));
    }

    #[test]
    fn uniform_one_division_is_identity() {
        let path = Path::open(vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)]);
        assert_eq!(subdivide(&path, uniform(1)), path);
        assert_eq!(subdivide(&path, uniform(0)), path);
    }

    #[test]
    fn closed_path_subdivides_closing_edge() {
        let out = subdivide(&triangle(false), uniform(2));
        assert_eq!(out.len(), 6);
        assert!(out.closed);
        // midpoint of the closing edge (0,10) -> (0,0)
        assert_eq!(out.points[5], Point::new(0.0, 5.0));
    }

    #[test]
    fn closed_path_with_closing_point_keeps_it() {
        let out = subdivide(&triangle(true), uniform(2));
        assert_eq!(out.len(), 7);
        assert_eq!(out.points.first(), out.points.last());
        assert_eq!(out.points[5], Point::new(0.0, 5.0));
    }

    #[test]
    fn adaptive_divisions_follow_edge_length() {
        assert_eq!(adaptive_divisions(10.0, 2.0, 100), 5);
        assert_eq!(adaptive_divisions(10.0, 3.0, 100), 3);
        assert_eq!(adaptive_divisions(1.0, 3.0, 100), 1);
        assert_eq!(adaptive_divisions(1000.0, 1.0, 8), 8);
        assert_eq!(adaptive_divisions(0.0, 1.0, 8), 1);
        assert_eq!(adaptive_divisions(5.0, 0.0, 8), 8);
    }

    #[test]
    fn adaptive_mode_densifies_long_edges_only() {
        let path = Path::open(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(11.0, 0.0),
        ]);
        let mode = SubdivisionMode::Adaptive {
            min_segment_length: 2.0,
            max_divisions: 50,
        };
        let out = subdivide(&path, mode);
        // short edge: 1 division, long edge: 5 divisions
        assert_eq!(out.len(), 1 + 1 + 5);
    }

    #[test]
    fn degenerate_paths_pass_through() {
        let single = Path::open(vec![Point::new(1.0, 1.0)]);
        assert_eq!(subdivide(&single, uniform(5)), single);
        let empty = Path::closed(vec![]);
        assert_eq!(subdivide(&empty, uniform(5)), empty);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn uniform_point_count_law(
                pts in prop::collection::vec((-100.0_f64..100.0, -100.0_f64..100.0), 2..30),
                d in 1_usize..12,
            ) {
                let n = pts.len();
                let path = Path::open(pts.into_iter().map(|(x, y)| Point::new(x, y)).collect());
                let out = subdivide(&path, uniform(d));
                prop_assert_eq!(out.len(), (n - 1) * d + 1);
                prop_assert_eq!(out.points.first(), path.points.first());
                prop_assert_eq!(out.points.last(), path.points.last());
            }

            #[test]
            fn adaptive_divisions_in_range(
                length in 0.0_f64..1e4,
                min_len in -1.0_f64..50.0,
                max_div in 0_usize..64,
            ) {
                let d = adaptive_divisions(length, min_len, max_div);
                prop_assert!(d >= 1 && d <= max_div.max(1));
            }
        }
    }
}
