//! Rigid stamp placement: copy a donor path set onto target anchors.

use glam::DVec2;

use crate::geometry::{Bounds, Layer, Path, Point};

/// Donor geometry plus the anchor that lands on each placement target.
#[derive(Debug, Clone, PartialEq)]
pub struct Stamp {
    paths: Vec<Path>,
    anchor: Point,
}

impl Stamp {
    /// Collects every path of `layers`, anchored at the center of their
    /// bounding box. Returns `None` when the layers hold no points.
    pub fn from_layers(layers: &[Layer]) -> Option<Self> {
        let paths: Vec<Path> = layers
            .iter()
            .flat_map(|layer| layer.paths.iter().cloned())
            .collect();
        let bounds = Bounds::of_points(paths.iter().flat_map(|p| p.points.iter()))?;
        Some(Self {
            paths,
            anchor: bounds.center(),
        })
    }

    /// A stamp with an explicit anchor.
    pub fn with_anchor(paths: Vec<Path>, anchor: Point) -> Self {
        Self { paths, anchor }
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// Copies of the stamp's paths scaled and rotated (radians) about the
    /// anchor, then translated so the anchor lands on `target`.
    pub fn place(&self, target: Point, scale: f64, rotation: f64) -> Vec<Path> {
        let anchor = DVec2::from(self.anchor);
        let target = DVec2::from(target);
        let rotor = DVec2::from_angle(rotation);
        self.paths
            .iter()
            .map(|path| {
                path.map_points(|p| {
                    let local = (DVec2::from(p) - anchor) * scale;
                    let local = if rotation == 0.0 {
                        local
                    } else {
                        rotor.rotate(local)
                    };
                    Point::from(target + local)
                })
            })
            .collect()
    }
}
