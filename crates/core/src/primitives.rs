//! Geometry primitives: path construction, rotation and rectangular clipping.

use std::f64::consts::TAU;

use glam::DVec2;

use crate::geometry::{Bounds, Path, Point};

/// Minimum segment count for a closed circle.
const MIN_CIRCLE_SEGMENTS: usize = 3;

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Open straight path from `a` to `b` with `segments` equal edges.
pub fn line_path(a: Point, b: Point, segments: usize) -> Path {
    let segments = segments.max(1);
    let points = (0..=segments)
        .map(|i| a.lerp(b, i as f64 / segments as f64))
        .collect();
    Path::open(points)
}

/// Closed circle approximation with `segments + 1` points.
///
/// The first vertex sits at angle 0 (`center.x + radius, center.y`) and the
/// last point is an exact copy of the first.
pub fn circle_path(center: Point, radius: f64, segments: usize) -> Path {
    let segments = segments.max(MIN_CIRCLE_SEGMENTS);
    let mut points: Vec<Point> = (0..segments)
        .map(|i| polar(center, radius, TAU * i as f64 / segments as f64))
        .collect();
    points.push(points[0]);
    Path::closed(points)
}

/// Open arc from `start_angle` to `end_angle` (radians) with `segments` edges.
pub fn arc_path(
    center: Point,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    segments: usize,
) -> Path {
    let segments = segments.max(1);
    let sweep = end_angle - start_angle;
    let points = (0..=segments)
        .map(|i| polar(center, radius, start_angle + sweep * i as f64 / segments as f64))
        .collect();
    Path::open(points)
}

/// Point at `angle` radians and `radius` from `center`.
pub fn polar(center: Point, radius: f64, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    Point::new(center.x + radius * cos, center.y + radius * sin)
}

/// Rotates `point` by `angle` radians around `center`.
pub fn rotate_point(point: Point, center: Point, angle: f64) -> Point {
    if angle == 0.0 {
        return point;
    }
    let c = DVec2::from(center);
    let v = DVec2::from(point) - c;
    Point::from(c + DVec2::from_angle(angle).rotate(v))
}

/// Rotates every vertex of a polygon by `angle` radians around `center`.
pub fn rotate_polygon(points: &[Point], center: Point, angle: f64) -> Vec<Point> {
    points
        .iter()
        .map(|&p| rotate_point(p, center, angle))
        .collect()
}

/// Clips a segment to `rect` (Liang-Barsky). Returns the visible part, with
/// endpoints that lie inside returned unchanged.
pub fn clip_segment(a: Point, b: Point, rect: &Bounds) -> Option<(Point, Point)> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    let edges = [
        (-dx, a.x - rect.min.x),
        (dx, rect.max.x - a.x),
        (-dy, a.y - rect.min.y),
        (dy, rect.max.y - a.y),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }
    }
    let start = if t0 == 0.0 { a } else { a.lerp(b, t0) };
    let end = if t1 == 1.0 { b } else { a.lerp(b, t1) };
    Some((start, end))
}

/// Clips a path to `rect`, returning the visible pieces.
///
/// A closed path lying entirely inside is returned unchanged. Any other
/// visible part comes back as open paths; a path entirely outside yields no
/// paths. Pieces with fewer than two points are dropped.
pub fn clip_path_to_rect(path: &Path, rect: &Bounds) -> Vec<Path> {
    if path.is_degenerate() {
        return Vec::new();
    }
    if path.points.iter().all(|&p| rect.contains(p)) {
        return vec![path.clone()];
    }

    let mut edges: Vec<(Point, Point)> = path.points.windows(2).map(|w| (w[0], w[1])).collect();
    if path.closed && !path.has_closing_point() {
        let ring = path.ring();
        edges.push((ring[ring.len() - 1], ring[0]));
    }

    let mut pieces: Vec<Vec<Point>> = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    for (a, b) in edges {
        match clip_segment(a, b, rect) {
            Some((start, end)) => {
                if current.last() != Some(&start) {
                    flush(&mut pieces, &mut current);
                    current.push(start);
                }
                current.push(end);
                if end != b {
                    flush(&mut pieces, &mut current);
                }
            }
            None => flush(&mut pieces, &mut current),
        }
    }
    flush(&mut pieces, &mut current);

    // A closed path that starts inside gets cut into a tail and a head that
    // meet at the first vertex; stitch them back into one piece.
    if path.closed && pieces.len() > 1 && rect.contains(path.points[0]) {
        let head_starts_at_origin = pieces[0].first() == Some(&path.points[0]);
        let tail_ends_at_origin = pieces[pieces.len() - 1].last() == Some(&path.points[0]);
        if head_starts_at_origin && tail_ends_at_origin {
            let head = pieces.remove(0);
            if let Some(tail) = pieces.last_mut() {
                tail.extend(head.into_iter().skip(1));
            }
        }
    }

    pieces.into_iter().map(Path::open).collect()
}

fn flush(pieces: &mut Vec<Vec<Point>>, current: &mut Vec<Point>) {
    let piece = std::mem::take(current);
    if piece.len() >= 2 {
        pieces.push(piece);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn rect() -> Bounds {
        Bounds::from_rect(50.0, 50.0, 100.0, 100.0)
    }

    fn assert_close(a: Point, b: Point) {
        assert!(a.distance(b) < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn line_path_has_segments_plus_one_points() {
        let path = line_path(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 5);
        assert_eq!(path.len(), 6);
        assert!(!path.closed);
        assert_eq!(path.points[5], Point::new(10.0, 0.0));
        assert_close(path.points[1], Point::new(2.0, 0.0));
    }

    #[test]
    fn circle_path_closes_exactly() {
        let path = circle_path(Point::new(100.0, 100.0), 10.0, 4);
        assert_eq!(path.len(), 5);
        assert!(path.closed);
        assert_eq!(path.points[0], path.points[4]);
        assert_eq!(path.points[0], Point::new(110.0, 100.0));
        for p in &path.points {
            assert!((p.distance(Point::new(100.0, 100.0)) - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn circle_path_enforces_minimum_segments() {
        assert_eq!(circle_path(Point::default(), 1.0, 0).len(), 4);
    }

    #[test]
    fn arc_path_spans_requested_angles() {
        let path = arc_path(Point::new(0.0, 0.0), 2.0, 0.0, FRAC_PI_2, 8);
        assert_eq!(path.len(), 9);
        assert_close(path.points[0], Point::new(2.0, 0.0));
        assert_close(path.points[8], Point::new(0.0, 2.0));
    }

    #[test]
    fn rotate_polygon_quarter_turn() {
        let square = [Point::new(1.0, 0.0), Point::new(0.0, 1.0)];
        let rotated = rotate_polygon(&square, Point::new(0.0, 0.0), FRAC_PI_2);
        assert_close(rotated[0], Point::new(0.0, 1.0));
        assert_close(rotated[1], Point::new(-1.0, 0.0));
    }

    #[test]
    fn rotate_by_zero_is_identity() {
        let p = Point::new(0.3, 0.7);
        assert_eq!(rotate_point(p, Point::new(5.0, 5.0), 0.0), p);
    }

    #[test]
    fn horizontal_line_outside_is_dropped() {
        let line = line_path(Point::new(0.0, 10.0), Point::new(200.0, 10.0), 1);
        assert!(clip_path_to_rect(&line, &rect()).is_empty());
    }

    #[test]
    fn line_crossing_rect_is_trimmed() {
        let line = line_path(Point::new(0.0, 100.0), Point::new(200.0, 100.0), 1);
        let pieces = clip_path_to_rect(&line, &rect());
        assert_eq!(pieces.len(), 1);
        assert_close(pieces[0].points[0], Point::new(50.0, 100.0));
        assert_close(pieces[0].points[1], Point::new(150.0, 100.0));
    }

    #[test]
    fn path_leaving_and_reentering_splits() {
        let zigzag = Path::open(vec![
            Point::new(60.0, 100.0),
            Point::new(100.0, 0.0),
            Point::new(140.0, 100.0),
        ]);
        let pieces = clip_path_to_rect(&zigzag, &rect());
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0].points[0], Point::new(60.0, 100.0));
        assert_eq!(pieces[1].points.last(), Some(&Point::new(140.0, 100.0)));
    }

    #[test]
    fn closed_path_inside_is_unchanged() {
        let circle = circle_path(Point::new(100.0, 100.0), 10.0, 16);
        assert_eq!(clip_path_to_rect(&circle, &rect()), vec![circle]);
    }

    #[test]
    fn closed_path_starting_inside_is_stitched() {
        // Starts inside, pokes out through the top edge, comes back.
        let shape = Path::closed(vec![
            Point::new(100.0, 100.0),
            Point::new(80.0, 0.0),
            Point::new(120.0, 0.0),
            Point::new(100.0, 100.0),
        ]);
        let pieces = clip_path_to_rect(&shape, &rect());
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].len(), 3);
        assert_eq!(pieces[0].points[1], Point::new(100.0, 100.0));
    }

    #[test]
    fn degenerate_path_clips_to_nothing() {
        let single = Path::open(vec![Point::new(100.0, 100.0)]);
        assert!(clip_path_to_rect(&single, &rect()).is_empty());
    }
}
