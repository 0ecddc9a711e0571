//! Point, path and layer records flowing through a pipeline.
//!
//! Every unit treats these as immutable input and builds fresh output, so the
//! types are plain data with `Clone` and a few constructors and queries.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A position in canvas coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Linear interpolation toward `other`. `t = 0` returns `self` and
    /// `t = 1` returns `other`, both exactly.
    pub fn lerp(self, other: Point, t: f64) -> Point {
        if t == 0.0 {
            return self;
        }
        if t == 1.0 {
            return other;
        }
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Point::new(v.x, v.y)
    }
}

impl From<Point> for DVec2 {
    fn from(p: Point) -> Self {
        DVec2::new(p.x, p.y)
    }
}

/// An ordered point sequence, open or closed.
///
/// Closed shapes built by generators repeat their first point at the end
/// (the closing point). Algorithms that walk the closing edge use
/// [`Path::ring`] so that duplicate is not treated as an extra edge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub points: Vec<Point>,
    pub closed: bool,
}

impl Path {
    pub fn new(points: Vec<Point>, closed: bool) -> Self {
        Self { points, closed }
    }

    pub fn open(points: Vec<Point>) -> Self {
        Self::new(points, false)
    }

    pub fn closed(points: Vec<Point>) -> Self {
        Self::new(points, true)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Fewer than two points: nothing to draw, nothing to smooth.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 2
    }

    /// True when the path is closed and stores its first point again at the end.
    pub fn has_closing_point(&self) -> bool {
        self.closed && self.points.len() >= 2 && self.points.first() == self.points.last()
    }

    /// The distinct vertices of the path, without a trailing closing point.
    pub fn ring(&self) -> &[Point] {
        if self.has_closing_point() {
            &self.points[..self.points.len() - 1]
        } else {
            &self.points
        }
    }

    /// Rebuilds a path from distinct vertices, re-appending the closing point
    /// when `reclose` is set and there is something to close.
    pub fn from_ring(mut ring: Vec<Point>, closed: bool, reclose: bool) -> Self {
        if closed && reclose {
            if let Some(&first) = ring.first() {
                ring.push(first);
            }
        }
        Self::new(ring, closed)
    }

    /// Returns a path with every point passed through `f`, keeping the closed flag.
    pub fn map_points(&self, mut f: impl FnMut(Point) -> Point) -> Path {
        Path::new(self.points.iter().map(|&p| f(p)).collect(), self.closed)
    }

    /// Sum of edge lengths, including the closing edge of a closed path.
    pub fn length(&self) -> f64 {
        let ring = self.ring();
        let open: f64 = ring.windows(2).map(|w| w[0].distance(w[1])).sum();
        match (self.closed, ring.first(), ring.last()) {
            (true, Some(&first), Some(&last)) if ring.len() > 1 => open + last.distance(first),
            _ => open,
        }
    }
}

/// A named group of paths; the unit of output grouping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: String,
    pub paths: Vec<Path>,
}

impl Layer {
    pub fn new(id: impl Into<String>, paths: Vec<Path>) -> Self {
        Self {
            id: id.into(),
            paths,
        }
    }

    /// A layer with the same id holding `paths`.
    pub fn with_paths(&self, paths: Vec<Path>) -> Self {
        Self {
            id: self.id.clone(),
            paths,
        }
    }

    /// Rebuilds the layer by mapping each path to zero or more output paths.
    pub fn flat_map_paths(&self, f: impl FnMut(&Path) -> Vec<Path>) -> Self {
        self.with_paths(self.paths.iter().flat_map(f).collect())
    }

    /// Rebuilds the layer by mapping each path to exactly one output path.
    pub fn map_paths(&self, f: impl FnMut(&Path) -> Path) -> Self {
        self.with_paths(self.paths.iter().map(f).collect())
    }

    pub fn point_count(&self) -> usize {
        self.paths.iter().map(Path::len).sum()
    }
}

/// Applies `f` to every path of every layer, preserving layer ids and order.
pub fn map_layers(layers: &[Layer], mut f: impl FnMut(&Path) -> Path) -> Vec<Layer> {
    layers.iter().map(|layer| layer.map_paths(&mut f)).collect()
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Box from an origin and a size.
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(Point::new(x, y), Point::new(x + width, y + height))
    }

    /// Smallest box holding every point, or `None` when there are none.
    pub fn of_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        points.into_iter().fold(None, |acc, &p| {
            Some(match acc {
                None => Bounds::new(p, p),
                Some(b) => Bounds::new(
                    Point::new(b.min.x.min(p.x), b.min.y.min(p.y)),
                    Point::new(b.max.x.max(p.x), b.max.y.max(p.y)),
                ),
            })
        })
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Shrinks every side by `amount`. May produce an inverted box.
    pub fn inset(&self, amount: f64) -> Self {
        Self::new(
            Point::new(self.min.x + amount, self.min.y + amount),
            Point::new(self.max.x - amount, self.max.y - amount),
        )
    }
}
